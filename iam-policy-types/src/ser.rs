/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Serialization helpers shared across the policy model.

use serde::Serializer;

/// IAM accepts a bare string wherever a one-element list would appear.
/// Deployment engines emit the scalar form, so this crate does too.
pub(crate) fn one_or_many<S>(values: &[String], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match values {
        [single] => serializer.serialize_str(single),
        many => serializer.collect_seq(many),
    }
}
