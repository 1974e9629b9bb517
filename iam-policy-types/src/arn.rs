/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Typed Amazon Resource Names.

use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::fmt::{Display, Formatter};

/// An Amazon Resource Name.
///
/// ARNs uniquely identify AWS resources. The colon-delimited form is
/// `arn:{partition}:{service}:{region}:{account-id}:{resource}`; global
/// services such as IAM leave the region slot empty.
///
/// `Arn` is a formatting type, not a validator. Components are rendered
/// exactly as supplied, and a nonsensical combination is rejected by AWS at
/// deployment time rather than here.
///
/// # Examples
/// ```rust
/// use iam_policy_types::Arn;
///
/// let arn = Arn::builder()
///     .service("iam")
///     .account_id("111111111111")
///     .resource("role/deploy")
///     .build();
/// assert_eq!(arn.to_string(), "arn:aws:iam::111111111111:role/deploy");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Arn {
    partition: Cow<'static, str>,
    service: Cow<'static, str>,
    region: Option<String>,
    account_id: Option<String>,
    resource: String,
}

impl Arn {
    /// Returns a builder for `Arn`.
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// The partition the resource lives in, `aws` unless overridden.
    pub fn partition(&self) -> &str {
        &self.partition
    }

    /// The service namespace, e.g. `iam` or `s3`.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// The region slot, empty for global services.
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// The owning account id, if the resource is account-scoped.
    pub fn account_id(&self) -> Option<&str> {
        self.account_id.as_deref()
    }

    /// The resource part, including any type prefix (`role/deploy`).
    pub fn resource(&self) -> &str {
        &self.resource
    }
}

impl Display for Arn {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "arn:{}:{}:{}:{}:{}",
            self.partition,
            self.service,
            self.region.as_deref().unwrap_or(""),
            self.account_id.as_deref().unwrap_or(""),
            self.resource
        )
    }
}

impl From<Arn> for String {
    fn from(arn: Arn) -> Self {
        arn.to_string()
    }
}

impl Serialize for Arn {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Builder for [`Arn`].
#[derive(Debug)]
pub struct Builder {
    inner: Arn,
}

impl Default for Builder {
    fn default() -> Self {
        Builder {
            inner: Arn {
                partition: Cow::Borrowed("aws"),
                service: Cow::Borrowed(""),
                region: None,
                account_id: None,
                resource: String::new(),
            },
        }
    }
}

impl Builder {
    /// Sets the partition. Defaults to `aws`.
    pub fn partition(mut self, partition: impl Into<Cow<'static, str>>) -> Self {
        self.inner.partition = partition.into();
        self
    }

    /// Sets the service namespace.
    pub fn service(mut self, service: impl Into<Cow<'static, str>>) -> Self {
        self.inner.service = service.into();
        self
    }

    /// Sets the region slot. Leave unset for global services.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.inner.region = Some(region.into());
        self
    }

    /// Sets the owning account id.
    pub fn account_id(mut self, account_id: impl Into<String>) -> Self {
        self.inner.account_id = Some(account_id.into());
        self
    }

    /// Sets the resource part, including any type prefix.
    pub fn resource(mut self, resource: impl Into<String>) -> Self {
        self.inner.resource = resource.into();
        self
    }

    /// Creates the `Arn`.
    pub fn build(self) -> Arn {
        self.inner
    }
}

#[cfg(test)]
mod test {
    use super::Arn;

    #[test]
    fn global_service_leaves_region_empty() {
        let arn = Arn::builder()
            .service("iam")
            .account_id("123456789012")
            .resource("oidc-provider/token.actions.githubusercontent.com")
            .build();
        assert_eq!(
            arn.to_string(),
            "arn:aws:iam::123456789012:oidc-provider/token.actions.githubusercontent.com"
        );
        assert_eq!(arn.region(), None);
    }

    #[test]
    fn regional_resource_renders_all_slots() {
        let arn = Arn::builder()
            .service("s3")
            .region("us-west-2")
            .account_id("123456789012")
            .resource("accesspoint/my-ap")
            .build();
        assert_eq!(
            arn.to_string(),
            "arn:aws:s3:us-west-2:123456789012:accesspoint/my-ap"
        );
    }

    #[test]
    fn partition_override() {
        let arn = Arn::builder()
            .partition("aws-cn")
            .service("iam")
            .account_id("123456789012")
            .resource("role/deploy")
            .build();
        assert!(arn.to_string().starts_with("arn:aws-cn:iam::"));
    }

    #[test]
    fn serializes_as_string() {
        let arn = Arn::builder()
            .service("iam")
            .account_id("123456789012")
            .resource("role/deploy")
            .build();
        assert_eq!(
            serde_json::to_value(&arn).unwrap(),
            serde_json::json!("arn:aws:iam::123456789012:role/deploy")
        );
    }
}
