//! Rule AST - tokenizer and stack-based parser for boolean rule strings
//!
//! A rule is a sequence of conditions joined by `AND` / `OR`, optionally
//! grouped with parentheses:
//!
//! ```
//! use rule_ast::{parse, Symbol};
//!
//! let ast = parse("(x AND y) OR z").unwrap();
//! assert_eq!(ast.symbol(), Some(Symbol::Or));
//! assert_eq!(ast.operands(), vec!["x", "y", "z"]);
//! assert_eq!(ast.to_string(), "(x AND y) OR z");
//! ```
//!
//! Operators have no relative precedence; an unparenthesized chain is
//! reduced left to right. With the default configuration operands are single
//! whitespace-delimited tokens, so `age > 30` is rejected. Enable
//! [`OperandMode::Compound`] to treat `identifier comparator literal` as one
//! operand:
//!
//! ```
//! use rule_ast::{OperandMode, ParserConfig, RuleParser};
//!
//! let parser = RuleParser::new(ParserConfig::default().with_operand_mode(OperandMode::Compound));
//! let ast = parser.parse("age > 30 AND department = 'Sales'").unwrap();
//! assert_eq!(ast.operands(), vec!["age > 30", "department = 'Sales'"]);
//! ```

pub mod config;
pub mod error;
pub mod rule;

pub use config::{Notation, OperandMode, ParenPolicy, ParserConfig};
pub use error::{ConfigError, ParseError, Result, RuleParseError};
pub use rule::{get_or_parse, parse, Node, ParseObserver, RuleParser, Symbol};

/// Create a rule AST from its string form
///
/// Alias of [`parse`] kept for callers that think in terms of rules rather
/// than parsing.
pub fn create_rule(rule: &str) -> Result<Node> {
    rule::parse(rule)
}
