/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::bootstrap::{BootstrapRole, DEFAULT_QUALIFIER};
use crate::environment::Environment;
use crate::error::InvalidConfigurationError;
use crate::github;
use iam_policy_types::{Arn, Conditions, PolicyDocument, Principal, Statement};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::time::Duration;

/// Name of the inline policy granting access to the bootstrap roles.
pub const INLINE_POLICY_NAME: &str = "CdkMinimalPolicy";

/// A deployment role assumable from GitHub Actions workflows.
///
/// Produced by [`Builder::build`]. Both fields are public so the definition
/// composes into a larger deployment description: `role` is the declarative
/// IAM role resource, `provider_arn` the OIDC provider its trust policy
/// references (caller-supplied, or derived from the well-known GitHub issuer).
#[derive(Clone, Debug, PartialEq)]
pub struct GithubActionsRole {
    /// The declarative role resource.
    pub role: RoleDefinition,
    /// The OIDC provider the trust policy federates with.
    pub provider_arn: Arn,
}

impl GithubActionsRole {
    /// Returns a builder for [`GithubActionsRole`].
    pub fn builder() -> Builder {
        Builder::default()
    }
}

/// Declarative definition of an IAM role.
///
/// A build-time value only: provisioning it is the deployment engine's job.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct RoleDefinition {
    /// Explicit role name, or `None` to let the engine generate one.
    pub role_name: Option<String>,
    /// Human-readable description.
    pub description: String,
    /// The trust policy controlling who may assume the role.
    pub assume_role_policy: PolicyDocument,
    /// Inline policies by name.
    pub inline_policies: BTreeMap<String, PolicyDocument>,
    /// Managed policy ARN bounding the role's effective permissions.
    pub permissions_boundary: Option<Arn>,
    /// Maximum duration of sessions assumed on this role.
    pub max_session_duration: Option<Duration>,
    /// Tags attached to the role.
    pub tags: BTreeMap<String, String>,
}

impl RoleDefinition {
    /// Renders the `AWS::IAM::Role` resource properties for this definition.
    ///
    /// The shape matches what the CDK synthesizes for the same inputs, so the
    /// output can be embedded in a CloudFormation template or asserted
    /// against one.
    pub fn to_cloudformation(&self) -> Result<Value, serde_json::Error> {
        let mut properties = serde_json::Map::new();
        properties.insert(
            "AssumeRolePolicyDocument".to_string(),
            serde_json::to_value(&self.assume_role_policy)?,
        );
        properties.insert("Description".to_string(), json!(self.description));
        if let Some(role_name) = &self.role_name {
            properties.insert("RoleName".to_string(), json!(role_name));
        }
        let mut policies = Vec::with_capacity(self.inline_policies.len());
        for (name, document) in &self.inline_policies {
            policies.push(json!({
                "PolicyName": name,
                "PolicyDocument": serde_json::to_value(document)?,
            }));
        }
        properties.insert("Policies".to_string(), Value::Array(policies));
        if let Some(boundary) = &self.permissions_boundary {
            properties.insert("PermissionsBoundary".to_string(), json!(boundary.to_string()));
        }
        if let Some(duration) = self.max_session_duration {
            properties.insert("MaxSessionDuration".to_string(), json!(duration.as_secs()));
        }
        if !self.tags.is_empty() {
            let tags: Vec<Value> = self
                .tags
                .iter()
                .map(|(key, value)| json!({ "Key": key, "Value": value }))
                .collect();
            properties.insert("Tags".to_string(), Value::Array(tags));
        }
        Ok(Value::Object(properties))
    }
}

/// A principal trusted to assume the deployment role in addition to the
/// GitHub OIDC identity.
///
/// Each one contributes its own `Allow` statement to the trust policy, so the
/// role is assumable by any one of them (OR semantics).
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum TrustedPrincipal {
    /// An IAM principal (role, user, or account root) by ARN.
    Aws(Arn),
    /// An AWS service principal, e.g. `lambda.amazonaws.com`.
    Service(String),
}

impl TrustedPrincipal {
    fn statement(&self) -> Statement {
        let principal = match self {
            TrustedPrincipal::Aws(arn) => Principal::aws(arn.clone()),
            TrustedPrincipal::Service(service) => Principal::service(service.clone()),
        };
        Statement::builder()
            .principal(principal)
            .action("sts:AssumeRole")
            .build()
    }
}

/// Builder for [`GithubActionsRole`].
///
/// `owner` and `repository` are required; everything else has a sensible
/// default for deploying a CDK v2 application from that repository's
/// workflows.
#[derive(Debug, Default)]
pub struct Builder {
    owner: Option<String>,
    repository: Option<String>,
    role_name: Option<String>,
    description: Option<String>,
    tags: BTreeMap<String, String>,
    provider_arn: Option<Arn>,
    subject_claims: Vec<String>,
    additional_principals: Vec<TrustedPrincipal>,
    permissions_boundary: Option<Arn>,
    max_session_duration: Option<Duration>,
    cdk_qualifier: Option<String>,
    account_id: Option<String>,
    region: Option<String>,
}

impl Builder {
    /// Sets the repository owner (user or organization). Required.
    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Sets the repository name. Required.
    pub fn repository(mut self, repository: impl Into<String>) -> Self {
        self.repository = Some(repository.into());
        self
    }

    /// Sets an explicit role name. Defaults to an engine-generated name.
    pub fn role_name(mut self, role_name: impl Into<String>) -> Self {
        self.role_name = Some(role_name.into());
        self
    }

    /// Sets the role description. Defaults to a description naming the
    /// repository the role deploys for.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a tag to the role.
    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Replaces the role tags.
    pub fn tags(mut self, tags: BTreeMap<String, String>) -> Self {
        self.tags = tags;
        self
    }

    /// Reuses an existing GitHub OIDC provider instead of deriving the
    /// well-known provider ARN for the resolved account.
    ///
    /// The provider resource only needs to exist once per account.
    pub fn provider_arn(mut self, provider_arn: Arn) -> Self {
        self.provider_arn = Some(provider_arn);
        self
    }

    /// Adds a subject claim pattern, narrowing which workflows may assume
    /// the role (e.g. `ref:refs/heads/main`, `environment:prod`).
    ///
    /// When no claim is added the role trusts any subject within the
    /// repository (`*`).
    pub fn subject_claim(mut self, claim: impl Into<String>) -> Self {
        self.subject_claims.push(claim.into());
        self
    }

    /// Replaces the subject claim patterns.
    pub fn subject_claims(mut self, claims: Vec<String>) -> Self {
        self.subject_claims = claims;
        self
    }

    /// Adds a principal trusted alongside the GitHub OIDC identity.
    pub fn additional_principal(mut self, principal: TrustedPrincipal) -> Self {
        self.additional_principals.push(principal);
        self
    }

    /// Sets a permissions boundary on the role.
    pub fn permissions_boundary(mut self, boundary: Arn) -> Self {
        self.permissions_boundary = Some(boundary);
        self
    }

    /// Sets the maximum session duration for the role.
    pub fn max_session_duration(mut self, duration: Duration) -> Self {
        self.max_session_duration = Some(duration);
        self
    }

    /// Sets the CDK bootstrap qualifier. Defaults to [`DEFAULT_QUALIFIER`].
    pub fn cdk_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.cdk_qualifier = Some(qualifier.into());
        self
    }

    /// Overrides the account id from the deployment environment.
    pub fn account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    /// Overrides the region from the deployment environment.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Builds the role definition against a deployment environment.
    ///
    /// Fails only when `owner` or `repository` is missing or empty; every
    /// other field resolves to a default.
    pub fn build(
        self,
        environment: &Environment,
    ) -> Result<GithubActionsRole, InvalidConfigurationError> {
        let owner = require_non_empty(self.owner, "owner")?;
        let repository = require_non_empty(self.repository, "repository")?;

        let account_id = self
            .account_id
            .unwrap_or_else(|| environment.account_id().to_string());
        let region = self.region.unwrap_or_else(|| environment.region().to_string());
        let qualifier = self.cdk_qualifier.unwrap_or_else(|| {
            tracing::debug!(
                qualifier = DEFAULT_QUALIFIER,
                "no CDK qualifier supplied, using the bootstrap default"
            );
            DEFAULT_QUALIFIER.to_string()
        });
        let subject_claims = if self.subject_claims.is_empty() {
            vec!["*".to_string()]
        } else {
            self.subject_claims
        };
        let provider_arn = self.provider_arn.unwrap_or_else(|| {
            let arn = github::provider_arn(&account_id);
            tracing::debug!(provider_arn = %arn, "derived well-known GitHub OIDC provider");
            arn
        });

        let mut conditions = Conditions::new()
            .string_equals(github::condition_key("aud"), github::GITHUB_OIDC_AUDIENCE)
            .string_equals(github::condition_key("repository_owner"), &owner);
        for claim in &subject_claims {
            conditions = conditions.string_like(
                github::condition_key("sub"),
                github::subject_pattern(&owner, &repository, claim),
            );
        }

        let mut trust_statements = vec![Statement::builder()
            .principal(Principal::federated(provider_arn.clone()))
            .action("sts:AssumeRoleWithWebIdentity")
            .conditions(conditions)
            .build()];
        trust_statements.extend(
            self.additional_principals
                .iter()
                .map(TrustedPrincipal::statement),
        );

        let mut bootstrap_statement = Statement::builder().action("sts:AssumeRole");
        for role in BootstrapRole::ALL {
            bootstrap_statement =
                bootstrap_statement.resource(role.arn(&qualifier, &account_id, &region));
        }
        let mut inline_policies = BTreeMap::new();
        inline_policies.insert(
            INLINE_POLICY_NAME.to_string(),
            PolicyDocument::new(vec![bootstrap_statement.build()]),
        );

        let description = self.description.unwrap_or_else(|| {
            format!(
                "Minimal role for CI/CD pipelines to deploy CDK v2 applications for {owner}/{repository}"
            )
        });

        tracing::debug!(
            owner = %owner,
            repository = %repository,
            account_id = %account_id,
            region = %region,
            "resolved GitHub Actions deployment role"
        );

        Ok(GithubActionsRole {
            role: RoleDefinition {
                role_name: self.role_name,
                description,
                assume_role_policy: PolicyDocument::new(trust_statements),
                inline_policies,
                permissions_boundary: self.permissions_boundary,
                max_session_duration: self.max_session_duration,
                tags: self.tags,
            },
            provider_arn,
        })
    }
}

fn require_non_empty(
    value: Option<String>,
    field: &'static str,
) -> Result<String, InvalidConfigurationError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(InvalidConfigurationError::missing_field(field)),
    }
}

#[cfg(test)]
mod test {
    use super::{GithubActionsRole, TrustedPrincipal, INLINE_POLICY_NAME};
    use crate::environment::Environment;
    use iam_policy_types::Arn;
    use std::time::Duration;

    fn env() -> Environment {
        Environment::new("123456789012", "us-east-1")
    }

    #[test]
    fn missing_owner_fails_before_anything_is_built() {
        let err = GithubActionsRole::builder()
            .repository("my-repo")
            .build(&env())
            .unwrap_err();
        assert_eq!(err.field(), "owner");
    }

    #[test]
    fn empty_repository_is_rejected() {
        let err = GithubActionsRole::builder()
            .owner("my-owner")
            .repository("")
            .build(&env())
            .unwrap_err();
        assert_eq!(err.field(), "repository");
    }

    #[test]
    fn defaults_resolve_from_the_environment() {
        let built = GithubActionsRole::builder()
            .owner("my-owner")
            .repository("my-repo")
            .build(&env())
            .unwrap();
        assert_eq!(
            built.provider_arn.to_string(),
            "arn:aws:iam::123456789012:oidc-provider/token.actions.githubusercontent.com"
        );
        assert_eq!(
            built.role.description,
            "Minimal role for CI/CD pipelines to deploy CDK v2 applications for my-owner/my-repo"
        );
        assert_eq!(built.role.role_name, None);
        assert!(built.role.inline_policies.contains_key(INLINE_POLICY_NAME));
    }

    #[test]
    fn builder_overrides_win_over_the_environment() {
        let built = GithubActionsRole::builder()
            .owner("my-owner")
            .repository("my-repo")
            .account_id("999999999999")
            .region("eu-central-1")
            .build(&env())
            .unwrap();
        assert_eq!(
            built.provider_arn.account_id(),
            Some("999999999999"),
            "provider must live in the overridden account"
        );
        let policy = &built.role.inline_policies[INLINE_POLICY_NAME];
        for resource in policy.statements()[0].resources() {
            assert!(resource.contains("999999999999"));
            assert!(resource.ends_with("eu-central-1"));
        }
    }

    #[test]
    fn caller_supplied_provider_is_reused() {
        let provider = Arn::builder()
            .service("iam")
            .account_id("123456789012")
            .resource("oidc-provider/custom")
            .build();
        let built = GithubActionsRole::builder()
            .owner("my-owner")
            .repository("my-repo")
            .provider_arn(provider.clone())
            .build(&env())
            .unwrap();
        assert_eq!(built.provider_arn, provider);
    }

    #[test]
    fn additional_principals_extend_the_trust_policy() {
        let other = Arn::builder()
            .service("iam")
            .account_id("123456789012")
            .resource("role/break-glass")
            .build();
        let built = GithubActionsRole::builder()
            .owner("my-owner")
            .repository("my-repo")
            .additional_principal(TrustedPrincipal::Aws(other))
            .build(&env())
            .unwrap();
        let statements = built.role.assume_role_policy.statements();
        assert_eq!(statements.len(), 2);
        assert_eq!(statements[1].actions()[0], "sts:AssumeRole");
    }

    #[test]
    fn session_duration_and_boundary_pass_through() {
        let boundary = Arn::builder()
            .service("iam")
            .account_id("123456789012")
            .resource("policy/boundary")
            .build();
        let built = GithubActionsRole::builder()
            .owner("my-owner")
            .repository("my-repo")
            .permissions_boundary(boundary.clone())
            .max_session_duration(Duration::from_secs(3600))
            .build(&env())
            .unwrap();
        assert_eq!(built.role.permissions_boundary, Some(boundary));
        assert_eq!(built.role.max_session_duration, Some(Duration::from_secs(3600)));
    }
}
