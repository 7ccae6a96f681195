// SPDX-License-Identifier: MIT

//! Rule records handed to external persistence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ast::Node;
use super::combiner::combine;
use super::evaluator::evaluate;
use super::parser::parse;
use super::record::AttributeRecord;
use crate::error::{EvaluationError, Result};

/// A rule string paired with its parsed tree.
///
/// The tree serializes in the `{kind, value, left, right}` document form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Rule {
    pub id: Uuid,
    pub rule_string: String,
    pub tree: Node,
    pub created_at: DateTime<Utc>,
}

impl Rule {
    /// Parse a rule string into a new rule
    pub fn new(rule_string: impl Into<String>) -> Result<Self> {
        let rule_string = rule_string.into();
        let tree = parse(&rule_string)?;
        Ok(Self::from_parts(rule_string, tree))
    }

    /// Wrap an already parsed tree with a fresh id and timestamp
    pub fn from_parts(rule_string: impl Into<String>, tree: Node) -> Self {
        Self {
            id: Uuid::new_v4(),
            rule_string: rule_string.into(),
            tree,
            created_at: Utc::now(),
        }
    }

    /// Conjunction of several rules as a new rule.
    ///
    /// The new rule string is the rendered combined tree, so it parses back
    /// to exactly that tree.
    pub fn combine(rules: &[Rule]) -> Result<Self> {
        let tree = combine(rules.iter().map(|r| r.tree.clone()))?;
        Ok(Self::from_parts(tree.to_string(), tree))
    }

    pub fn evaluate(&self, record: &AttributeRecord) -> Result<bool, EvaluationError> {
        evaluate(&self.tree, record)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
