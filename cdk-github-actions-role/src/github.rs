/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! GitHub Actions OpenID Connect constants and claim formatting.
//!
//! GitHub's token issuer is shared by every repository; which workflows may
//! assume a role is decided entirely by the trust policy conditions built
//! from these helpers. See
//! <https://docs.github.com/en/actions/reference/security/oidc> for the claim
//! catalogue.

use iam_policy_types::Arn;

/// Hostname of the GitHub Actions token issuer.
pub const GITHUB_OIDC_HOST: &str = "token.actions.githubusercontent.com";

/// The audience GitHub mints tokens with when assuming AWS roles.
pub const GITHUB_OIDC_AUDIENCE: &str = "sts.amazonaws.com";

/// The ARN of the GitHub OIDC provider registered in the given account.
///
/// The provider resource is created once per account (outside this library);
/// its ARN is derived from the well-known issuer hostname.
pub fn provider_arn(account_id: &str) -> Arn {
    Arn::builder()
        .service("iam")
        .account_id(account_id)
        .resource(format!("oidc-provider/{GITHUB_OIDC_HOST}"))
        .build()
}

/// The trust policy condition key for a token claim, e.g. `sub` or `aud`.
pub fn condition_key(claim: &str) -> String {
    format!("{GITHUB_OIDC_HOST}:{claim}")
}

/// The `sub` claim pattern matching workflows of one repository.
///
/// `claim` narrows which refs or environments match; `*` matches any subject
/// within the repository.
pub fn subject_pattern(owner: &str, repository: &str, claim: &str) -> String {
    format!("repo:{owner}/{repository}:{claim}")
}
