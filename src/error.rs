// SPDX-License-Identifier: MIT

//! Typed error handling for rule-ast
//!
//! Each pipeline stage has its own error enum; `RuleError` wraps them for
//! callers that drive the whole pipeline.

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T, E = RuleError> = std::result::Result<T, E>;

/// Top-level error type for rule-ast
#[derive(Debug, Error)]
pub enum RuleError {
    /// Tokenizer rejected the input (strict mode only)
    #[error("Tokenize error: {0}")]
    Tokenize(#[from] TokenizeError),

    /// Token sequence does not describe a valid tree
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Evaluation of a tree against a record failed
    #[error("Evaluation error: {0}")]
    Evaluation(#[from] EvaluationError),

    /// Interchange document does not describe a valid tree
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Combining requires at least one tree
    #[error("Cannot combine an empty set of rules")]
    EmptyCombination,

    /// Attribute record input was not a flat object of integers and strings
    #[error("Invalid attribute record: {0}")]
    InvalidRecord(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl RuleError {
    /// Create an invalid record error
    pub fn invalid_record(message: impl Into<String>) -> Self {
        Self::InvalidRecord(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// Unrecognized input found by the tokenizer in strict mode
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized input '{fragment}' at position {position}")]
pub struct TokenizeError {
    pub fragment: String,
    pub position: usize,
}

/// Parse failures. A failed parse never yields a partial tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The rule string contained no tokens
    #[error("rule is empty")]
    EmptyRule,

    /// A `)` with no matching `(`
    #[error("unmatched ')' at token {index}")]
    UnmatchedClose { index: usize },

    /// A `(` that was never closed
    #[error("unclosed '(' in rule")]
    UnclosedGroup,

    /// `()` with nothing inside
    #[error("empty group '()' at token {index}")]
    EmptyGroup { index: usize },

    /// A flat segment that is neither a comparison nor joined by and/or
    #[error("malformed rule segment: {segment}")]
    MalformedSegment { segment: String },

    /// Tree nesting exceeds the configured limit
    #[error("rule nests {depth} levels deep, limit is {limit}")]
    TooDeep { depth: usize, limit: usize },
}

/// Evaluation failures, scoped to a single evaluation call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    /// The record has no value for the field
    #[error("field '{field}' missing from record (operand '{operand}')")]
    MissingField { field: String, operand: String },

    /// `>`/`<` against a record value that is not an integer
    #[error("field '{field}' is not an integer (operand '{operand}')")]
    NonNumericValue { field: String, operand: String },

    /// `>`/`<` against a literal that is not an integer
    #[error("literal '{literal}' is not an integer (operand '{operand}')")]
    InvalidLiteral { literal: String, operand: String },

    /// Operand text has no comparator or no field name
    #[error("malformed operand '{operand}'")]
    MalformedOperand { operand: String },

    /// Tree nesting exceeds the configured limit
    #[error("tree nests {depth} levels deep, limit is {limit}")]
    DepthExceeded { depth: usize, limit: usize },
}

impl EvaluationError {
    /// Field the error refers to, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingField { field, .. } | Self::NonNumericValue { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Operand text the error refers to, if any
    pub fn operand(&self) -> Option<&str> {
        match self {
            Self::MissingField { operand, .. }
            | Self::NonNumericValue { operand, .. }
            | Self::InvalidLiteral { operand, .. }
            | Self::MalformedOperand { operand } => Some(operand),
            Self::DepthExceeded { .. } => None,
        }
    }
}

/// Interchange document failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// Operator value other than `and`/`or`
    #[error("unknown operator '{0}'")]
    UnknownOperator(String),

    /// Operator without both children
    #[error("operator '{0}' requires both left and right children")]
    MissingChild(String),

    /// Operand carrying children
    #[error("operand '{0}' must not have children")]
    OperandWithChildren(String),

    /// Operand text that is not a comparison
    #[error("operand '{0}' is not a comparison")]
    InvalidOperand(String),
}
