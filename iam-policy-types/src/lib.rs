/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Protocol-agnostic types for AWS IAM policy documents.
//!
//! This crate models the IAM policy language as plain Rust data: a
//! [`PolicyDocument`] holds [`Statement`]s, each of which names an [`Effect`],
//! an optional [`Principal`], actions, resources, and [`Conditions`].
//! Serializing a document with serde produces the JSON shape IAM accepts,
//! including the convention that single-element `Action`/`Resource` lists
//! render as a bare string rather than a one-element array.
//!
//! Nothing in this crate talks to AWS. Documents are build-time declarations
//! that a deployment engine (CloudFormation, CDK, Terraform) submits on the
//! caller's behalf.

#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod arn;
mod condition;
pub mod policy;
mod principal;
mod ser;

pub use arn::Arn;
pub use condition::Conditions;
pub use policy::{Effect, PolicyDocument, Statement, POLICY_VERSION};
pub use principal::Principal;
