/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::arn::Arn;
use crate::ser::one_or_many;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// The principal block of a policy statement.
///
/// Each variant matches one of the JSON shapes IAM accepts: the `"*"`
/// wildcard, or a single-entry map keyed by principal type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Principal {
    /// Any principal (`"*"`).
    Any,
    /// One or more IAM principals (roles, users, account roots) by ARN.
    Aws(Vec<String>),
    /// A federated identity provider, e.g. an OIDC provider ARN.
    Federated(String),
    /// An AWS service principal, e.g. `lambda.amazonaws.com`.
    Service(String),
}

impl Principal {
    /// An IAM principal identified by ARN.
    pub fn aws(arn: Arn) -> Self {
        Principal::Aws(vec![arn.to_string()])
    }

    /// A federated identity provider identified by ARN.
    pub fn federated(provider_arn: Arn) -> Self {
        Principal::Federated(provider_arn.to_string())
    }

    /// An AWS service principal.
    pub fn service(service: impl Into<String>) -> Self {
        Principal::Service(service.into())
    }
}

impl Serialize for Principal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Principal::Any => serializer.serialize_str("*"),
            Principal::Aws(arns) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("AWS", &AwsArns(arns))?;
                map.end()
            }
            Principal::Federated(arn) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Federated", arn)?;
                map.end()
            }
            Principal::Service(service) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Service", service)?;
                map.end()
            }
        }
    }
}

struct AwsArns<'a>(&'a [String]);

impl Serialize for AwsArns<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        one_or_many(self.0, serializer)
    }
}

#[cfg(test)]
mod test {
    use super::Principal;
    use crate::arn::Arn;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn wildcard_is_a_bare_string() {
        assert_eq!(serde_json::to_value(Principal::Any).unwrap(), json!("*"));
    }

    #[test]
    fn federated_provider() {
        let provider = Arn::builder()
            .service("iam")
            .account_id("123456789012")
            .resource("oidc-provider/token.actions.githubusercontent.com")
            .build();
        assert_eq!(
            serde_json::to_value(Principal::federated(provider)).unwrap(),
            json!({
                "Federated":
                    "arn:aws:iam::123456789012:oidc-provider/token.actions.githubusercontent.com"
            })
        );
    }

    #[test]
    fn single_aws_principal_is_scalar() {
        let role = Arn::builder()
            .service("iam")
            .account_id("123456789012")
            .resource("role/other")
            .build();
        assert_eq!(
            serde_json::to_value(Principal::aws(role)).unwrap(),
            json!({ "AWS": "arn:aws:iam::123456789012:role/other" })
        );
    }

    #[test]
    fn several_aws_principals_are_a_list() {
        let principal = Principal::Aws(vec!["arn:a".to_string(), "arn:b".to_string()]);
        assert_eq!(
            serde_json::to_value(principal).unwrap(),
            json!({ "AWS": ["arn:a", "arn:b"] })
        );
    }

    #[test]
    fn service_principal() {
        assert_eq!(
            serde_json::to_value(Principal::service("lambda.amazonaws.com")).unwrap(),
            json!({ "Service": "lambda.amazonaws.com" })
        );
    }
}
