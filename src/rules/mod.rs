// SPDX-License-Identifier: MIT

//! Rule parsing, combination, and evaluation
//!
//! Rules are simple boolean expressions like:
//! - `age > 30`
//! - `department = 'Sales'`
//! - `(age > 30 and department = 'Sales') or salary > 50000`
//!
//! The pipeline is tokenize → parse → optionally combine → evaluate.

mod ast;
pub mod combiner;
pub mod document;
pub mod evaluator;
pub mod parser;
mod record;
mod rule;
pub mod tokenizer;

pub use ast::{Comparator, LogicalOp, Node};
pub use combiner::combine;
pub use document::{NodeDocument, NodeKind};
pub use evaluator::{evaluate, Comparison};
pub use parser::{parse, parse_tokens, parse_tokens_with_limit};
pub use record::{AttributeRecord, AttributeValue};
pub use rule::Rule;
pub use tokenizer::{tokenize, tokenize_strict, Token};
