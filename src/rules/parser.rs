//! Rule parser
//!
//! Parses token sequences into trees with a bracket-matching stack. Each
//! closed group is handed to the flat-segment builder, which splits on the
//! first `and`, then on the first `or`, and otherwise expects a single
//! `field comparator literal` comparison. Chains of one keyword are split in
//! a single pass and folded right to left, so `a and b and c` becomes
//! `a and (b and c)` without recursing once per term.
//!
//! Within one flat segment `and` is always split before `or` is looked at,
//! whatever their order in the text:
//!
//! - `a > 1 or b > 2 and c > 3` parses as `(a > 1 or b > 2) and c > 3`
//! - `a > 1 and b > 2 or c > 3` parses as `a > 1 and (b > 2 or c > 3)`
//!
//! Parenthesize mixed connectives to get any other grouping.

use super::ast::{LogicalOp, Node};
use super::tokenizer::{tokenize, Token};
use crate::error::ParseError;

/// A built subtree with its depth, so limits never need a tree walk
#[derive(Debug)]
struct Subtree {
    node: Node,
    depth: usize,
}

/// Stack entry: a raw token or an already built subtree
#[derive(Debug)]
enum Pending {
    Token(Token),
    Tree(Subtree),
}

impl Pending {
    fn is_open(&self) -> bool {
        matches!(self, Pending::Token(Token::LParen))
    }

    fn is_keyword(&self, op: LogicalOp) -> bool {
        matches!(self, Pending::Token(t) if t.is_keyword(op))
    }
}

impl std::fmt::Display for Pending {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pending::Token(t) => write!(f, "{}", t),
            Pending::Tree(sub) => write!(f, "{}", sub.node),
        }
    }
}

/// Parse a rule string into a tree, dropping unrecognized input
pub fn parse(input: &str) -> Result<Node, ParseError> {
    parse_tokens(tokenize(input))
}

/// Parse a token sequence into a tree
pub fn parse_tokens(tokens: Vec<Token>) -> Result<Node, ParseError> {
    parse_tokens_with_limit(tokens, None)
}

/// Parse a token sequence, failing with [`ParseError::TooDeep`] as soon as
/// any subtree nests deeper than `max_depth`
pub fn parse_tokens_with_limit(
    tokens: Vec<Token>,
    max_depth: Option<usize>,
) -> Result<Node, ParseError> {
    let token_count = tokens.len();
    let mut stack: Vec<Pending> = Vec::with_capacity(token_count);

    for (index, token) in tokens.into_iter().enumerate() {
        match token {
            Token::RParen => {
                let open = stack
                    .iter()
                    .rposition(Pending::is_open)
                    .ok_or(ParseError::UnmatchedClose { index })?;
                let group = stack.split_off(open + 1);
                stack.pop();
                if group.is_empty() {
                    return Err(ParseError::EmptyGroup { index });
                }
                stack.push(Pending::Tree(build_segment(group, max_depth)?));
            }
            other => stack.push(Pending::Token(other)),
        }
    }

    if stack.iter().any(Pending::is_open) {
        return Err(ParseError::UnclosedGroup);
    }
    if stack.is_empty() {
        return Err(ParseError::EmptyRule);
    }

    // Whatever is left forms an implicit outermost group
    let tree = build_segment(stack, max_depth)?;
    check_depth(tree.depth, max_depth)?;
    log::debug!(
        "parsed {} tokens into tree of depth {}",
        token_count,
        tree.depth
    );
    Ok(tree.node)
}

fn check_depth(depth: usize, max_depth: Option<usize>) -> Result<(), ParseError> {
    match max_depth {
        Some(limit) if depth > limit => Err(ParseError::TooDeep { depth, limit }),
        _ => Ok(()),
    }
}

fn build_segment(
    mut segment: Vec<Pending>,
    max_depth: Option<usize>,
) -> Result<Subtree, ParseError> {
    if segment.len() == 1 {
        return match segment.remove(0) {
            Pending::Tree(sub) => Ok(sub),
            token => Err(malformed(std::slice::from_ref(&token))),
        };
    }

    for op in [LogicalOp::And, LogicalOp::Or] {
        if segment.iter().any(|p| p.is_keyword(op)) {
            return build_chain(segment, op, max_depth);
        }
    }

    match segment.as_slice() {
        [Pending::Token(Token::Word(field)), Pending::Token(Token::Comparator(cmp)), Pending::Token(Token::Word(literal))] => {
            Ok(Subtree {
                node: Node::operand(format!("{} {} {}", field, cmp, literal)),
                depth: 1,
            })
        }
        _ => Err(malformed(&segment)),
    }
}

/// Split on every `op` and fold the parts right to left, which gives the
/// same `a op (b op c)` shape as splitting on the first `op` recursively.
/// Parts hold no `op`, so nesting here is bounded by the keyword kinds.
fn build_chain(
    segment: Vec<Pending>,
    op: LogicalOp,
    max_depth: Option<usize>,
) -> Result<Subtree, ParseError> {
    let dangling = segment.first().is_some_and(|p| p.is_keyword(op))
        || segment.last().is_some_and(|p| p.is_keyword(op))
        || segment
            .windows(2)
            .any(|w| w[0].is_keyword(op) && w[1].is_keyword(op));
    if dangling {
        return Err(malformed(&segment));
    }

    let mut parts: Vec<Vec<Pending>> = vec![Vec::new()];
    for pending in segment {
        if pending.is_keyword(op) {
            parts.push(Vec::new());
        } else if let Some(last) = parts.last_mut() {
            last.push(pending);
        }
    }

    // n parts nest at least n levels deep
    check_depth(parts.len(), max_depth)?;

    let mut built = parts
        .into_iter()
        .map(|part| build_segment(part, max_depth))
        .collect::<Result<Vec<_>, _>>()?;

    let mut acc = match built.pop() {
        Some(last) => last,
        None => return Err(malformed(&[])),
    };
    while let Some(left) = built.pop() {
        let depth = 1 + left.depth.max(acc.depth);
        check_depth(depth, max_depth)?;
        acc = Subtree {
            node: Node::operator(op, left.node, acc.node),
            depth,
        };
    }
    Ok(acc)
}

fn malformed(segment: &[Pending]) -> ParseError {
    let text: Vec<String> = segment.iter().map(|p| p.to_string()).collect();
    ParseError::MalformedSegment {
        segment: text.join(" "),
    }
}
