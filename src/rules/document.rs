// SPDX-License-Identifier: MIT

//! Interchange form for rule trees
//!
//! A tree is stored as nested `{kind, value, left, right}` documents, with
//! `null` children on operands. [`Node`] serializes through this form, so any
//! serde format works; JSON helpers are provided for the common case.

use serde::{Deserialize, Serialize};

use super::ast::{LogicalOp, Node};
use super::evaluator::Comparison;
use crate::error::{DocumentError, Result};

/// Kind tag of a document node
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Operand,
    Operator,
}

/// One node of the interchange form
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct NodeDocument {
    pub kind: NodeKind,
    /// Comparison text for operands, `and`/`or` for operators
    pub value: String,
    #[serde(default)]
    pub left: Option<Box<NodeDocument>>,
    #[serde(default)]
    pub right: Option<Box<NodeDocument>>,
}

impl From<Node> for NodeDocument {
    fn from(node: Node) -> Self {
        match node {
            Node::Operand { expression } => NodeDocument {
                kind: NodeKind::Operand,
                value: expression,
                left: None,
                right: None,
            },
            Node::Operator { kind, left, right } => NodeDocument {
                kind: NodeKind::Operator,
                value: kind.keyword().to_string(),
                left: Some(Box::new(NodeDocument::from(*left))),
                right: Some(Box::new(NodeDocument::from(*right))),
            },
        }
    }
}

impl TryFrom<NodeDocument> for Node {
    type Error = DocumentError;

    fn try_from(doc: NodeDocument) -> Result<Self, Self::Error> {
        match doc.kind {
            NodeKind::Operand => {
                if doc.left.is_some() || doc.right.is_some() {
                    return Err(DocumentError::OperandWithChildren(doc.value));
                }
                if Comparison::split(&doc.value).is_none() {
                    return Err(DocumentError::InvalidOperand(doc.value));
                }
                Ok(Node::Operand {
                    expression: doc.value,
                })
            }
            NodeKind::Operator => {
                let kind = LogicalOp::from_keyword(&doc.value)
                    .ok_or_else(|| DocumentError::UnknownOperator(doc.value.clone()))?;
                match (doc.left, doc.right) {
                    (Some(left), Some(right)) => Ok(Node::operator(
                        kind,
                        Node::try_from(*left)?,
                        Node::try_from(*right)?,
                    )),
                    _ => Err(DocumentError::MissingChild(doc.value)),
                }
            }
        }
    }
}

/// Serialize a tree to its JSON document
pub fn to_json(node: &Node) -> Result<String> {
    Ok(serde_json::to_string(node)?)
}

/// Serialize a tree to an indented JSON document
pub fn to_json_pretty(node: &Node) -> Result<String> {
    Ok(serde_json::to_string_pretty(node)?)
}

/// Rebuild a tree from its JSON document
pub fn from_json(json: &str) -> Result<Node> {
    Ok(serde_json::from_str(json)?)
}
