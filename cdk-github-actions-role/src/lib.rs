/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Builds the definition of an IAM role that GitHub Actions workflows assume
//! via OpenID Connect to deploy an AWS CDK application.
//!
//! The produced role trusts the GitHub OIDC provider, scoped to one
//! repository's subject claims, and may do exactly one thing: assume the four
//! roles `cdk bootstrap` provisions (file publishing, lookup, image
//! publishing, deploy). The CDK CLI picks those roles up on its own, so the
//! workflow needs no further permissions and no long-lived credentials.
//!
//! This library performs no I/O. It validates its input, resolves defaults,
//! and returns plain data; the enclosing deployment definition (CDK,
//! CloudFormation, Terraform) is responsible for provisioning it.
//!
//! # Examples
//! ```rust
//! use cdk_github_actions_role::{Environment, GithubActionsRole};
//!
//! # fn main() -> Result<(), cdk_github_actions_role::InvalidConfigurationError> {
//! let environment = Environment::new("111122223333", "us-east-1");
//! let built = GithubActionsRole::builder()
//!     .owner("my-owner")
//!     .repository("my-repo")
//!     .subject_claim("ref:refs/heads/main")
//!     .build(&environment)?;
//!
//! // Only pushes to main may assume the role, and the inline policy covers
//! // exactly the bootstrap roles.
//! assert_eq!(built.role.inline_policies.len(), 1);
//! assert!(built
//!     .provider_arn
//!     .to_string()
//!     .ends_with("oidc-provider/token.actions.githubusercontent.com"));
//! # Ok(())
//! # }
//! ```

#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod bootstrap;
mod environment;
mod error;
pub mod github;
mod role;

pub use bootstrap::{BootstrapRole, DEFAULT_QUALIFIER};
pub use environment::Environment;
pub use error::InvalidConfigurationError;
pub use role::{
    Builder, GithubActionsRole, RoleDefinition, TrustedPrincipal, INLINE_POLICY_NAME,
};
