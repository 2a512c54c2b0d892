//! Parser configuration
//!
//! The defaults reproduce the plain stack-reduction grammar: single-token
//! operands, infix `a AND b` reduction and lenient parenthesis handling.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Default limit on parenthesis nesting
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Default limit on the depth of the produced tree
pub const DEFAULT_MAX_TREE_DEPTH: usize = 1024;

/// How operators are reduced against the operand stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notation {
    /// `a AND b`: the operator waits for its right operand, then reduces
    #[default]
    Infix,
    /// `a b AND`: the operator reduces the two topmost nodes immediately
    Postfix,
}

/// How operand text is recognized by the tokenizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperandMode {
    /// Every whitespace-delimited fragment is its own operand token
    #[default]
    Fragment,
    /// `identifier comparator literal` triples and quoted literals are atomic
    Compound,
}

/// What happens with parentheses that do not pair up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParenPolicy {
    /// A stray `)` ends the current level; an unclosed `(` closes at end of input
    #[default]
    Lenient,
    /// Both cases are rejected
    Strict,
}

/// Parser settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub notation: Notation,
    pub operand_mode: OperandMode,
    pub paren_policy: ParenPolicy,
    /// Maximum number of nested `(` levels
    pub max_depth: usize,
    /// Maximum depth of the built tree; long unparenthesized chains hit this
    pub max_tree_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            notation: Notation::default(),
            operand_mode: OperandMode::default(),
            paren_policy: ParenPolicy::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            max_tree_depth: DEFAULT_MAX_TREE_DEPTH,
        }
    }
}

impl ParserConfig {
    /// Load a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ParserConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::InvalidValue(
                "max_depth must be at least 1".to_string(),
            ));
        }
        if self.max_tree_depth == 0 {
            return Err(ConfigError::InvalidValue(
                "max_tree_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Raise zero limits to 1 so every setting is usable
    pub(crate) fn sanitized(mut self) -> Self {
        if let Err(err) = self.validate() {
            log::warn!("{}; clamping limits to 1", err);
            self.max_depth = self.max_depth.max(1);
            self.max_tree_depth = self.max_tree_depth.max(1);
        }
        self
    }

    pub fn with_notation(mut self, notation: Notation) -> Self {
        self.notation = notation;
        self
    }

    pub fn with_operand_mode(mut self, operand_mode: OperandMode) -> Self {
        self.operand_mode = operand_mode;
        self
    }

    pub fn with_paren_policy(mut self, paren_policy: ParenPolicy) -> Self {
        self.paren_policy = paren_policy;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_tree_depth(mut self, max_tree_depth: usize) -> Self {
        self.max_tree_depth = max_tree_depth;
        self
    }
}
