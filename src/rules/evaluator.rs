//! Rule tree evaluator

use super::ast::{Comparator, LogicalOp, Node};
use super::record::AttributeRecord;
use crate::error::EvaluationError;

/// An operand's text split into its three parts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparison<'a> {
    pub field: &'a str,
    pub comparator: Comparator,
    /// Trimmed, with one pair of surrounding single quotes removed
    pub literal: &'a str,
}

impl<'a> Comparison<'a> {
    /// Split at the first comparator symbol. `None` when there is no
    /// comparator or nothing before it.
    pub fn split(expression: &'a str) -> Option<Self> {
        let idx = expression.find(&Comparator::SYMBOLS[..])?;
        let comparator = Comparator::from_symbol(expression[idx..].chars().next()?)?;
        let field = expression[..idx].trim();
        if field.is_empty() {
            return None;
        }
        let literal = strip_quotes(expression[idx + 1..].trim());
        Some(Self {
            field,
            comparator,
            literal,
        })
    }
}

fn strip_quotes(s: &str) -> &str {
    s.strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .unwrap_or(s)
}

/// Evaluate a rule tree against an attribute record.
///
/// Both children of an operator are always evaluated, so an error on either
/// side surfaces even when the other side alone would decide the result.
pub fn evaluate(node: &Node, record: &AttributeRecord) -> Result<bool, EvaluationError> {
    match node {
        Node::Operand { expression } => evaluate_operand(expression, record),
        Node::Operator { kind, left, right } => {
            let left = evaluate(left, record);
            let right = evaluate(right, record);
            let (left, right) = (left?, right?);
            Ok(match kind {
                LogicalOp::And => left && right,
                LogicalOp::Or => left || right,
            })
        }
    }
}

fn evaluate_operand(expression: &str, record: &AttributeRecord) -> Result<bool, EvaluationError> {
    let cmp = Comparison::split(expression).ok_or_else(|| EvaluationError::MalformedOperand {
        operand: expression.to_string(),
    })?;

    let value = record
        .get(cmp.field)
        .ok_or_else(|| EvaluationError::MissingField {
            field: cmp.field.to_string(),
            operand: expression.to_string(),
        })?;

    match cmp.comparator {
        Comparator::Eq => Ok(value.to_string() == cmp.literal),
        Comparator::Gt | Comparator::Lt => {
            let actual = value
                .as_integer()
                .ok_or_else(|| EvaluationError::NonNumericValue {
                    field: cmp.field.to_string(),
                    operand: expression.to_string(),
                })?;
            let expected: i64 = cmp
                .literal
                .parse()
                .map_err(|_| EvaluationError::InvalidLiteral {
                    literal: cmp.literal.to_string(),
                    operand: expression.to_string(),
                })?;
            Ok(match cmp.comparator {
                Comparator::Gt => actual > expected,
                _ => actual < expected,
            })
        }
    }
}
