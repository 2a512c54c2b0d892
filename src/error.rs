//! Error types for rule parsing

use crate::rule::Symbol;
use thiserror::Error;

/// Failure detected inside the tokenizer or parser
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("not enough operands for operator {symbol} at token {position} (stack length: {stack_len})")]
    InsufficientOperands {
        symbol: Symbol,
        position: usize,
        stack_len: usize,
    },

    #[error("could not build AST (stack length: {stack_len})")]
    MalformedExpression { stack_len: usize },

    #[error("unmatched ')' at token {position}")]
    UnbalancedParentheses { position: usize },

    #[error("unclosed '(' at end of input")]
    UnclosedParenthesis,

    #[error("nesting deeper than {limit} levels")]
    NestingTooDeep { limit: usize },

    #[error("tree deeper than {limit} levels at token {position}")]
    TreeTooDeep { limit: usize, position: usize },

    #[error("unterminated quoted literal starting at byte {offset}")]
    UnterminatedLiteral { offset: usize },
}

impl ParseError {
    /// Stack length observed when the failure was raised, if the check involved one
    pub fn stack_len(&self) -> Option<usize> {
        match self {
            ParseError::InsufficientOperands { stack_len, .. }
            | ParseError::MalformedExpression { stack_len } => Some(*stack_len),
            _ => None,
        }
    }
}

/// The single error shape returned by the public parse entry points
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid rule string: {source}")]
pub struct RuleParseError {
    #[source]
    source: ParseError,
}

impl RuleParseError {
    /// The internal failure this error wraps
    pub fn kind(&self) -> &ParseError {
        &self.source
    }

    /// Consume the error, returning the internal failure
    pub fn into_kind(self) -> ParseError {
        self.source
    }
}

impl From<ParseError> for RuleParseError {
    fn from(source: ParseError) -> Self {
        RuleParseError { source }
    }
}

/// Errors raised while loading a parser configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

/// Result type alias for rule parsing
pub type Result<T> = std::result::Result<T, RuleParseError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_wrapper_message_carries_inner_message() {
        let err = RuleParseError::from(ParseError::MalformedExpression { stack_len: 4 });
        assert_eq!(
            err.to_string(),
            "Invalid rule string: could not build AST (stack length: 4)"
        );
    }

    #[test]
    fn test_wrapper_exposes_source() {
        let err = RuleParseError::from(ParseError::InsufficientOperands {
            symbol: Symbol::And,
            position: 0,
            stack_len: 0,
        });
        assert!(err.source().is_some());
        assert_eq!(err.kind().stack_len(), Some(0));
    }

    #[test]
    fn test_stack_len_absent_for_paren_errors() {
        assert_eq!(ParseError::UnclosedParenthesis.stack_len(), None);
    }
}
