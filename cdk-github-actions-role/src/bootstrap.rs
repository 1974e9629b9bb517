/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! CDK bootstrap stack naming.
//!
//! `cdk bootstrap` provisions a fixed set of roles per account/region that
//! deployments assume for their individual steps. Their names follow the
//! convention `cdk-{qualifier}-{kind}-role-{account}-{region}`; see
//! <https://docs.aws.amazon.com/cdk/v2/guide/bootstrapping-env.html>.

use iam_policy_types::Arn;

/// The qualifier the CDK uses when `cdk bootstrap` is run without `--qualifier`.
///
/// This constant tracks the CDK's own default and goes stale if the CDK ever
/// changes it; supply the qualifier explicitly when a bootstrap stack was
/// customized.
pub const DEFAULT_QUALIFIER: &str = "hnb659fds";

/// The bootstrap roles a CDK deployment assumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BootstrapRole {
    /// Uploads file assets to the staging bucket.
    FilePublishing,
    /// Performs context lookups during synthesis.
    Lookup,
    /// Pushes container images to the staging ECR repository.
    ImagePublishing,
    /// Executes the CloudFormation deployment itself.
    Deploy,
}

impl BootstrapRole {
    /// Every bootstrap role a deployment may assume, in the order the CDK
    /// documents them.
    pub const ALL: [BootstrapRole; 4] = [
        BootstrapRole::FilePublishing,
        BootstrapRole::Lookup,
        BootstrapRole::ImagePublishing,
        BootstrapRole::Deploy,
    ];

    fn kind(&self) -> &'static str {
        match self {
            BootstrapRole::FilePublishing => "file-publishing",
            BootstrapRole::Lookup => "lookup",
            BootstrapRole::ImagePublishing => "image-publishing",
            BootstrapRole::Deploy => "deploy",
        }
    }

    /// The role name the bootstrap stack creates in the given environment.
    pub fn role_name(&self, qualifier: &str, account_id: &str, region: &str) -> String {
        format!(
            "cdk-{qualifier}-{kind}-role-{account_id}-{region}",
            kind = self.kind()
        )
    }

    /// The ARN of this role in the given environment.
    pub fn arn(&self, qualifier: &str, account_id: &str, region: &str) -> Arn {
        Arn::builder()
            .service("iam")
            .account_id(account_id)
            .resource(format!(
                "role/{}",
                self.role_name(qualifier, account_id, region)
            ))
            .build()
    }
}

#[cfg(test)]
mod test {
    use super::{BootstrapRole, DEFAULT_QUALIFIER};

    #[test]
    fn role_names_follow_the_bootstrap_convention() {
        assert_eq!(
            BootstrapRole::Deploy.role_name(DEFAULT_QUALIFIER, "123456789012", "eu-west-1"),
            "cdk-hnb659fds-deploy-role-123456789012-eu-west-1"
        );
        assert_eq!(
            BootstrapRole::FilePublishing.role_name("custq", "123456789012", "eu-west-1"),
            "cdk-custq-file-publishing-role-123456789012-eu-west-1"
        );
    }

    #[test]
    fn arns_are_account_scoped_and_region_free() {
        let arn = BootstrapRole::Lookup.arn(DEFAULT_QUALIFIER, "123456789012", "us-east-1");
        assert_eq!(
            arn.to_string(),
            "arn:aws:iam::123456789012:role/cdk-hnb659fds-lookup-role-123456789012-us-east-1"
        );
    }

    #[test]
    fn all_lists_each_role_once() {
        let mut kinds: Vec<&str> = BootstrapRole::ALL.iter().map(|role| role.kind()).collect();
        kinds.sort_unstable();
        kinds.dedup();
        assert_eq!(kinds.len(), 4);
    }
}
