// SPDX-License-Identifier: MIT

//! Engine configuration and YAML loading

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Result, RuleError};

/// Options for [`RuleEngine`](crate::RuleEngine)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Reject unrecognized input instead of dropping it
    pub strict_tokens: bool,
    /// Reject trees nesting deeper than this, at parse and at evaluation
    pub max_depth: Option<usize>,
}

impl EngineConfig {
    pub fn strict() -> Self {
        Self {
            strict_tokens: true,
            ..Self::default()
        }
    }

    pub fn with_max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_depth == Some(0) {
            return Err(RuleError::config("max_depth must be at least 1"));
        }
        Ok(())
    }
}

/// Loads engine configuration from YAML files
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<EngineConfig> {
        let content = fs::read_to_string(path)?;
        Self::parse_yaml(&content)
    }

    /// Parse configuration from a YAML string
    pub fn parse_yaml(content: &str) -> Result<EngineConfig> {
        let config: EngineConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
