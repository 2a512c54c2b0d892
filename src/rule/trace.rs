//! Diagnostic hooks for the parser
//!
//! Observers only ever see shared references, so they can report on a parse
//! but never steer it.

use crate::rule::ast::Node;

/// Receives events while a rule is being parsed
pub trait ParseObserver {
    /// Called once with the full token sequence before parsing starts
    fn on_tokens(&mut self, _tokens: &[&str]) {}

    /// Called for every token consumed, with the current nesting depth
    fn on_token(&mut self, _depth: usize, _token: &str) {}

    /// Called after an operator node has been built
    fn on_operator(&mut self, _depth: usize, _node: &Node) {}
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ParseObserver for NoopObserver {}

/// Forwards events to the `log` facade at trace level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

const TARGET: &str = "rule_ast::parser";

impl ParseObserver for LogObserver {
    fn on_tokens(&mut self, tokens: &[&str]) {
        log::trace!(target: TARGET, "tokens: {:?}", tokens);
    }

    fn on_token(&mut self, depth: usize, token: &str) {
        log::trace!(target: TARGET, "depth {} token: {}", depth, token);
    }

    fn on_operator(&mut self, depth: usize, node: &Node) {
        log::trace!(target: TARGET, "depth {} built operator: {}", depth, node);
    }
}

/// A single recorded parser event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    Tokens(Vec<String>),
    Token { depth: usize, token: String },
    Operator { depth: usize, rendered: String },
}

/// Collects events in order, mostly useful in tests and tooling
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    pub events: Vec<TraceEvent>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered operator nodes, in construction order
    pub fn operators(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                TraceEvent::Operator { rendered, .. } => Some(rendered.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl ParseObserver for RecordingObserver {
    fn on_tokens(&mut self, tokens: &[&str]) {
        self.events.push(TraceEvent::Tokens(
            tokens.iter().map(|t| t.to_string()).collect(),
        ));
    }

    fn on_token(&mut self, depth: usize, token: &str) {
        self.events.push(TraceEvent::Token {
            depth,
            token: token.to_string(),
        });
    }

    fn on_operator(&mut self, depth: usize, node: &Node) {
        self.events.push(TraceEvent::Operator {
            depth,
            rendered: node.to_string(),
        });
    }
}
