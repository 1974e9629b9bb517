/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// The deployment target a role definition is resolved against.
///
/// CDK resolves account and region from the ambient stack environment. This
/// library keeps that resolution in the caller's hands instead: look the pair
/// up however fits your deployment (STS `GetCallerIdentity`, shared config,
/// hard-coded for tests) and pass it to [`Builder::build`](crate::Builder::build).
/// The library itself reads no environment variables and holds no globals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Environment {
    account_id: String,
    region: String,
}

impl Environment {
    /// Creates an environment from an account id and region.
    pub fn new(account_id: impl Into<String>, region: impl Into<String>) -> Self {
        Environment {
            account_id: account_id.into(),
            region: region.into(),
        }
    }

    /// The twelve-digit AWS account id.
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// The region the CDK application deploys into.
    pub fn region(&self) -> &str {
        &self.region
    }
}
