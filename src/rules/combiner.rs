//! Conjunction of several rule trees

use super::ast::Node;
use crate::error::{Result, RuleError};

/// Fold trees left to right under `and`.
///
/// `[r0, r1, r2]` becomes `((r0 and r1) and r2)`. A single tree is returned
/// untouched. No simplification is attempted.
pub fn combine<I>(trees: I) -> Result<Node>
where
    I: IntoIterator<Item = Node>,
{
    let mut trees = trees.into_iter();
    let first = trees.next().ok_or(RuleError::EmptyCombination)?;

    let mut count = 1;
    let combined = trees.fold(first, |acc, tree| {
        count += 1;
        Node::and(acc, tree)
    });
    log::debug!("combined {} rule trees", count);
    Ok(combined)
}
