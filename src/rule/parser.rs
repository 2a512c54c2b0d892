//! Rule string parser
//!
//! Parsing is a single left-to-right pass over the token sequence. Every
//! nesting level keeps its own stack of nodes, but all levels advance one
//! shared [`Cursor`]: when a `(` recurses, the callee consumes tokens up to
//! and including its `)` and the caller resumes right after it.

use crate::config::{Notation, OperandMode, ParenPolicy, ParserConfig};
use crate::error::{ParseError, Result, RuleParseError};
use crate::rule::ast::{Node, Symbol};
use crate::rule::lexer::{tokenize, tokenize_compound};
use crate::rule::trace::{LogObserver, ParseObserver};

/// Parse a rule string into an AST with the default configuration
pub fn parse(rule: &str) -> Result<Node> {
    RuleParser::default().parse(rule)
}

/// Forward-only position over a token sequence, shared by all nesting levels
#[derive(Debug)]
pub struct Cursor<'t> {
    tokens: &'t [&'t str],
    pos: usize,
}

impl<'t> Cursor<'t> {
    pub fn new(tokens: &'t [&'t str]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Next token together with its index
    fn advance(&mut self) -> Option<(usize, &'t str)> {
        let token = *self.tokens.get(self.pos)?;
        let position = self.pos;
        self.pos += 1;
        Some((position, token))
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Tokens not consumed yet
    pub fn remaining(&self) -> usize {
        self.tokens.len() - self.pos
    }
}

/// Parser with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct RuleParser {
    config: ParserConfig,
}

impl RuleParser {
    /// Zero limits in `config` are raised to 1
    pub fn new(config: ParserConfig) -> Self {
        Self {
            config: config.sanitized(),
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a rule string, tracing through the `log` facade
    pub fn parse(&self, rule: &str) -> Result<Node> {
        self.parse_with_observer(rule, &mut LogObserver)
    }

    /// Parse a rule string, reporting progress to `observer`
    ///
    /// Every internal failure comes back as a [`RuleParseError`]; its
    /// [`kind`](RuleParseError::kind) tells which check failed.
    pub fn parse_with_observer(
        &self,
        rule: &str,
        observer: &mut dyn ParseObserver,
    ) -> Result<Node> {
        self.parse_inner(rule, observer).map_err(|err| {
            log::debug!("rejected rule {:?}: {}", rule, err);
            RuleParseError::from(err)
        })
    }

    fn parse_inner(
        &self,
        rule: &str,
        observer: &mut dyn ParseObserver,
    ) -> std::result::Result<Node, ParseError> {
        match self.config.operand_mode {
            OperandMode::Fragment => {
                let tokens = tokenize(rule);
                build_tree(&tokens, &self.config, observer)
            }
            OperandMode::Compound => {
                let owned = tokenize_compound(rule)?;
                let tokens: Vec<&str> = owned.iter().map(|t| &**t).collect();
                build_tree(&tokens, &self.config, observer)
            }
        }
    }
}

/// Build an AST from an already tokenized rule
pub fn build_ast(
    tokens: &[&str],
    config: &ParserConfig,
    observer: &mut dyn ParseObserver,
) -> Result<Node> {
    let config = config.clone().sanitized();
    build_tree(tokens, &config, observer).map_err(RuleParseError::from)
}

fn build_tree(
    tokens: &[&str],
    config: &ParserConfig,
    observer: &mut dyn ParseObserver,
) -> std::result::Result<Node, ParseError> {
    observer.on_tokens(tokens);

    let mut cursor = Cursor::new(tokens);
    let (root, _) = parse_expression(&mut cursor, 0, config, observer)?;

    if cursor.remaining() > 0 {
        log::debug!(
            "unmatched ')' at token {}: ignoring {} trailing tokens",
            cursor.position() - 1,
            cursor.remaining()
        );
    }

    Ok(root)
}

/// Operand stack of one nesting level
///
/// Each entry carries the depth of its subtree, so a reduction can refuse to
/// build a tree deeper than `max_tree_depth`. Dropping, comparing and
/// printing a `Node` all recurse, so the bound on depth is what keeps them
/// on the stack.
struct Level {
    depth: usize,
    notation: Notation,
    max_tree_depth: usize,
    stack: Vec<(Node, usize)>,
    /// Infix operator waiting for its right operand, with its token index
    pending: Option<(Symbol, usize)>,
}

impl Level {
    fn new(depth: usize, config: &ParserConfig) -> Self {
        Self {
            depth,
            notation: config.notation,
            max_tree_depth: config.max_tree_depth,
            stack: Vec::new(),
            pending: None,
        }
    }

    /// Push an operand or a finished sub-expression with its tree depth
    fn push_term(
        &mut self,
        node: Node,
        tree_depth: usize,
        observer: &mut dyn ParseObserver,
    ) -> std::result::Result<(), ParseError> {
        self.stack.push((node, tree_depth));
        if let Some((symbol, position)) = self.pending.take() {
            self.reduce(symbol, position, observer)?;
        }
        Ok(())
    }

    fn apply_operator(
        &mut self,
        symbol: Symbol,
        position: usize,
        observer: &mut dyn ParseObserver,
    ) -> std::result::Result<(), ParseError> {
        match self.notation {
            Notation::Postfix => self.reduce(symbol, position, observer),
            Notation::Infix => {
                if self.pending.is_some() || self.stack.is_empty() {
                    return Err(ParseError::InsufficientOperands {
                        symbol,
                        position,
                        stack_len: self.stack.len(),
                    });
                }
                self.pending = Some((symbol, position));
                Ok(())
            }
        }
    }

    /// Pop right then left and push the combined operator node
    fn reduce(
        &mut self,
        symbol: Symbol,
        position: usize,
        observer: &mut dyn ParseObserver,
    ) -> std::result::Result<(), ParseError> {
        let stack_len = self.stack.len();
        let (Some((right, right_depth)), Some((left, left_depth))) =
            (self.stack.pop(), self.stack.pop())
        else {
            return Err(ParseError::InsufficientOperands {
                symbol,
                position,
                stack_len,
            });
        };

        let tree_depth = 1 + left_depth.max(right_depth);
        if tree_depth > self.max_tree_depth {
            return Err(ParseError::TreeTooDeep {
                limit: self.max_tree_depth,
                position,
            });
        }

        let node = Node::operator(symbol, left, right);
        observer.on_operator(self.depth, &node);
        self.stack.push((node, tree_depth));
        Ok(())
    }

    /// Close the level; exactly one node must remain
    fn finish(mut self) -> std::result::Result<(Node, usize), ParseError> {
        if let Some((symbol, position)) = self.pending {
            return Err(ParseError::InsufficientOperands {
                symbol,
                position,
                stack_len: self.stack.len(),
            });
        }
        if self.stack.len() != 1 {
            return Err(ParseError::MalformedExpression {
                stack_len: self.stack.len(),
            });
        }
        self.stack.pop().ok_or(ParseError::MalformedExpression { stack_len: 0 })
    }
}

/// Parse one nesting level, returning its root and that root's tree depth
fn parse_expression(
    cursor: &mut Cursor<'_>,
    depth: usize,
    config: &ParserConfig,
    observer: &mut dyn ParseObserver,
) -> std::result::Result<(Node, usize), ParseError> {
    let mut level = Level::new(depth, config);

    loop {
        let Some((position, token)) = cursor.advance() else {
            if depth > 0 && config.paren_policy == ParenPolicy::Strict {
                return Err(ParseError::UnclosedParenthesis);
            }
            break;
        };

        observer.on_token(depth, token);

        match token {
            "(" => {
                if depth >= config.max_depth {
                    return Err(ParseError::NestingTooDeep {
                        limit: config.max_depth,
                    });
                }
                let (sub, sub_depth) = parse_expression(cursor, depth + 1, config, observer)?;
                level.push_term(sub, sub_depth, observer)?;
            }
            ")" => {
                if depth == 0 && config.paren_policy == ParenPolicy::Strict {
                    return Err(ParseError::UnbalancedParentheses { position });
                }
                break;
            }
            _ => match Symbol::from_token(token) {
                Some(symbol) => level.apply_operator(symbol, position, observer)?,
                None => level.push_term(Node::operand(token), 1, observer)?,
            },
        }
    }

    level.finish()
}
