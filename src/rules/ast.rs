// SPDX-License-Identifier: MIT

//! Tree model for parsed rules

use serde::{Deserialize, Serialize};

use super::document::NodeDocument;

/// A node of a rule tree.
///
/// Serializes through [`NodeDocument`], the `{kind, value, left, right}`
/// interchange form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "NodeDocument", try_from = "NodeDocument")]
pub enum Node {
    /// Leaf holding one unparsed comparison, e.g. `age > 30`
    Operand { expression: String },
    /// Logical combination of two subtrees
    Operator {
        kind: LogicalOp,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// Logical connectives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOp {
    And,
    Or,
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    /// >
    Gt,
    /// <
    Lt,
    /// =
    Eq,
}

impl Node {
    pub fn operand(expression: impl Into<String>) -> Self {
        Node::Operand {
            expression: expression.into(),
        }
    }

    pub fn operator(kind: LogicalOp, left: Node, right: Node) -> Self {
        Node::Operator {
            kind,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn and(left: Node, right: Node) -> Self {
        Self::operator(LogicalOp::And, left, right)
    }

    pub fn or(left: Node, right: Node) -> Self {
        Self::operator(LogicalOp::Or, left, right)
    }

    pub fn is_operand(&self) -> bool {
        matches!(self, Node::Operand { .. })
    }

    /// Number of nodes on the longest root-to-leaf path
    pub fn depth(&self) -> usize {
        match self {
            Node::Operand { .. } => 1,
            Node::Operator { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// Number of leaves
    pub fn operand_count(&self) -> usize {
        match self {
            Node::Operand { .. } => 1,
            Node::Operator { left, right, .. } => left.operand_count() + right.operand_count(),
        }
    }
}

impl LogicalOp {
    pub fn keyword(&self) -> &'static str {
        match self {
            LogicalOp::And => "and",
            LogicalOp::Or => "or",
        }
    }

    /// Case-insensitive keyword lookup
    pub fn from_keyword(word: &str) -> Option<Self> {
        if word.eq_ignore_ascii_case("and") {
            Some(LogicalOp::And)
        } else if word.eq_ignore_ascii_case("or") {
            Some(LogicalOp::Or)
        } else {
            None
        }
    }
}

impl Comparator {
    pub const SYMBOLS: [char; 3] = ['>', '<', '='];

    pub fn symbol(&self) -> char {
        match self {
            Comparator::Gt => '>',
            Comparator::Lt => '<',
            Comparator::Eq => '=',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '>' => Some(Comparator::Gt),
            '<' => Some(Comparator::Lt),
            '=' => Some(Comparator::Eq),
            _ => None,
        }
    }
}

impl std::fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

impl std::fmt::Display for Comparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Renders a fully parenthesized rule string that parses back to the same tree
impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Operand { expression } => f.write_str(expression),
            Node::Operator { kind, left, right } => write!(f, "({} {} {})", left, kind, right),
        }
    }
}
