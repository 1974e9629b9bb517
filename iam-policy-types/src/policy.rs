/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Policy documents and their statements.

use crate::condition::Conditions;
use crate::principal::Principal;
use crate::ser::one_or_many;
use serde::Serialize;

/// The current IAM policy language version.
pub const POLICY_VERSION: &str = "2012-10-17";

/// An IAM policy document.
///
/// Serializes to the `{"Version": ..., "Statement": [...]}` JSON that IAM
/// accepts for both identity policies and role trust policies.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PolicyDocument {
    #[serde(rename = "Version")]
    version: &'static str,
    #[serde(rename = "Statement")]
    statements: Vec<Statement>,
}

impl PolicyDocument {
    /// Creates a document at [`POLICY_VERSION`] from the given statements.
    pub fn new(statements: Vec<Statement>) -> Self {
        PolicyDocument {
            version: POLICY_VERSION,
            statements,
        }
    }

    /// The statements in document order.
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }
}

/// Whether a statement allows or denies the actions it names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Effect {
    /// Grants the listed actions.
    Allow,
    /// Denies the listed actions, overriding any allow.
    Deny,
}

/// A single policy statement.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Statement {
    #[serde(rename = "Sid", skip_serializing_if = "Option::is_none")]
    sid: Option<String>,
    #[serde(rename = "Effect")]
    effect: Effect,
    #[serde(rename = "Principal", skip_serializing_if = "Option::is_none")]
    principal: Option<Principal>,
    #[serde(rename = "Action", serialize_with = "one_or_many")]
    actions: Vec<String>,
    #[serde(
        rename = "Resource",
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "one_or_many"
    )]
    resources: Vec<String>,
    #[serde(rename = "Condition", skip_serializing_if = "Conditions::is_empty")]
    conditions: Conditions,
}

impl Statement {
    /// Returns a builder for `Statement`. The effect defaults to `Allow`.
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// The statement effect.
    pub fn effect(&self) -> Effect {
        self.effect
    }

    /// The statement principal, present in trust policies.
    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    /// The actions this statement covers.
    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    /// The resources this statement covers. Empty in trust policies, where
    /// the resource is implicitly the role carrying the document.
    pub fn resources(&self) -> &[String] {
        &self.resources
    }

    /// The condition block.
    pub fn conditions(&self) -> &Conditions {
        &self.conditions
    }
}

/// Builder for [`Statement`].
#[derive(Debug)]
pub struct Builder {
    inner: Statement,
}

impl Default for Builder {
    fn default() -> Self {
        Builder {
            inner: Statement {
                sid: None,
                effect: Effect::Allow,
                principal: None,
                actions: Vec::new(),
                resources: Vec::new(),
                conditions: Conditions::new(),
            },
        }
    }
}

impl Builder {
    /// Sets the statement id.
    pub fn sid(mut self, sid: impl Into<String>) -> Self {
        self.inner.sid = Some(sid.into());
        self
    }

    /// Sets the effect. Defaults to [`Effect::Allow`].
    pub fn effect(mut self, effect: Effect) -> Self {
        self.inner.effect = effect;
        self
    }

    /// Sets the principal. Only trust policies carry one.
    pub fn principal(mut self, principal: Principal) -> Self {
        self.inner.principal = Some(principal);
        self
    }

    /// Appends an action.
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.inner.actions.push(action.into());
        self
    }

    /// Appends a resource.
    pub fn resource(mut self, resource: impl Into<String>) -> Self {
        self.inner.resources.push(resource.into());
        self
    }

    /// Replaces the condition block.
    pub fn conditions(mut self, conditions: Conditions) -> Self {
        self.inner.conditions = conditions;
        self
    }

    /// Creates the `Statement`.
    pub fn build(self) -> Statement {
        self.inner
    }
}
