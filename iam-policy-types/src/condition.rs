/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::ser::one_or_many;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// The condition block of a policy statement.
///
/// Conditions are keyed twice: by operator (`StringEquals`, `StringLike`, ...)
/// and then by condition key. Multiple values under one key are matched with
/// OR semantics by IAM. Both maps are ordered so that a document always
/// renders byte-identically for the same inputs.
///
/// # Examples
/// ```rust
/// use iam_policy_types::Conditions;
///
/// let conditions = Conditions::new()
///     .string_equals("token.actions.githubusercontent.com:aud", "sts.amazonaws.com")
///     .string_like("token.actions.githubusercontent.com:sub", "repo:my-owner/my-repo:*");
/// assert!(!conditions.is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Conditions {
    operators: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl Conditions {
    /// Returns an empty condition block.
    pub fn new() -> Self {
        Default::default()
    }

    /// True when no condition has been added.
    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    /// Adds a value under the given operator and condition key.
    ///
    /// Values accumulate: inserting twice under the same key yields a
    /// two-element (OR-matched) value list in insertion order.
    pub fn insert(
        &mut self,
        operator: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.operators
            .entry(operator.into())
            .or_default()
            .entry(key.into())
            .or_default()
            .push(value.into());
    }

    /// Adds a `StringEquals` condition.
    pub fn string_equals(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert("StringEquals", key, value);
        self
    }

    /// Adds a `StringLike` condition.
    pub fn string_like(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert("StringLike", key, value);
        self
    }

    /// Returns the values recorded under an operator and condition key.
    pub fn get(&self, operator: &str, key: &str) -> Option<&[String]> {
        self.operators
            .get(operator)
            .and_then(|keys| keys.get(key))
            .map(Vec::as_slice)
    }
}

impl Serialize for Conditions {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.operators.len()))?;
        for (operator, keys) in &self.operators {
            map.serialize_entry(operator, &KeyValues(keys))?;
        }
        map.end()
    }
}

struct KeyValues<'a>(&'a BTreeMap<String, Vec<String>>);

impl Serialize for KeyValues<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, values) in self.0 {
            map.serialize_entry(key, &Values(values))?;
        }
        map.end()
    }
}

struct Values<'a>(&'a [String]);

impl Serialize for Values<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        one_or_many(self.0, serializer)
    }
}
