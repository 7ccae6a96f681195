// SPDX-License-Identifier: MIT

//! Configured entry point for the rule pipeline

use crate::config::EngineConfig;
use crate::error::{EvaluationError, Result};
use crate::rules::{
    combine, evaluate, parse_tokens_with_limit, tokenize, tokenize_strict, AttributeRecord, Node, Rule,
    Token,
};

/// Runs tokenize, parse, combine, and evaluate under one configuration.
///
/// Holds no state besides its configuration, so one engine can be shared
/// across threads.
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    config: EngineConfig,
}

impl RuleEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn tokenize(&self, input: &str) -> Result<Vec<Token>> {
        if self.config.strict_tokens {
            Ok(tokenize_strict(input)?)
        } else {
            Ok(tokenize(input))
        }
    }

    /// Parse under the configured depth limit. Over-deep input is rejected
    /// while it is being built, never after.
    pub fn parse(&self, input: &str) -> Result<Node> {
        let tokens = self.tokenize(input)?;
        Ok(parse_tokens_with_limit(tokens, self.config.max_depth)?)
    }

    /// Parse a rule string into a new rule record
    pub fn create_rule(&self, rule_string: &str) -> Result<Rule> {
        let tree = self.parse(rule_string)?;
        Ok(Rule::from_parts(rule_string, tree))
    }

    pub fn combine_rules(&self, trees: Vec<Node>) -> Result<Node> {
        combine(trees)
    }

    pub fn evaluate_rule(
        &self,
        tree: &Node,
        record: &AttributeRecord,
    ) -> Result<bool, EvaluationError> {
        self.check_depth(tree)?;
        let result = evaluate(tree, record);
        log::debug!("evaluated {} -> {:?}", tree, result);
        result
    }

    /// Evaluate one tree against many records. A failing record only affects
    /// its own entry.
    pub fn evaluate_batch(
        &self,
        tree: &Node,
        records: &[AttributeRecord],
    ) -> Vec<Result<bool, EvaluationError>> {
        if let Err(e) = self.check_depth(tree) {
            return records.iter().map(|_| Err(e.clone())).collect();
        }

        records
            .iter()
            .enumerate()
            .map(|(idx, record)| {
                let result = evaluate(tree, record);
                if let Err(e) = &result {
                    log::warn!("record {} failed evaluation: {}", idx, e);
                }
                result
            })
            .collect()
    }

    fn check_depth(&self, tree: &Node) -> Result<(), EvaluationError> {
        match self.config.max_depth {
            Some(limit) if tree.depth() > limit => Err(EvaluationError::DepthExceeded {
                depth: tree.depth(),
                limit,
            }),
            _ => Ok(()),
        }
    }
}
