// SPDX-License-Identifier: MIT

//! Boolean rule strings as trees.
//!
//! ```text
//! "age > 30 and department = 'Sales'"  --parse-->  and(age > 30, department = 'Sales')
//! ```
//!
//! Trees can be combined under `and`, serialized to a `{kind, value, left,
//! right}` document, and evaluated against an [`AttributeRecord`].

pub mod config;
pub mod engine;
pub mod error;
pub mod rules;

pub use config::{ConfigLoader, EngineConfig};
pub use engine::RuleEngine;
pub use error::{DocumentError, EvaluationError, ParseError, Result, RuleError, TokenizeError};
pub use rules::{
    combine, evaluate, parse, tokenize, AttributeRecord, AttributeValue, Comparator, LogicalOp,
    Node, Rule, Token,
};
