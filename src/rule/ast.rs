//! Abstract Syntax Tree for rule expressions

use serde::{Deserialize, Serialize};
use std::fmt;

/// AST node for rule expressions
///
/// Nodes are built once by the parser and never mutated. Each operator owns
/// its two children, so a tree has no sharing and no cycles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    /// Opaque condition text like "age>30"
    Operand { value: String },
    /// Binary AND / OR
    Operator {
        #[serde(rename = "value")]
        symbol: Symbol,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// Logical operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Symbol {
    And,
    Or,
}

impl Symbol {
    pub fn as_str(self) -> &'static str {
        match self {
            Symbol::And => "AND",
            Symbol::Or => "OR",
        }
    }

    /// Classify a token; keywords are matched case-sensitively
    pub fn from_token(token: &str) -> Option<Symbol> {
        match token {
            "AND" => Some(Symbol::And),
            "OR" => Some(Symbol::Or),
            _ => None,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Node {
    pub fn operand(value: impl Into<String>) -> Node {
        Node::Operand {
            value: value.into(),
        }
    }

    pub fn operator(symbol: Symbol, left: Node, right: Node) -> Node {
        Node::Operator {
            symbol,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn is_operand(&self) -> bool {
        matches!(self, Node::Operand { .. })
    }

    /// Operand text, or `None` for operator nodes
    pub fn value(&self) -> Option<&str> {
        match self {
            Node::Operand { value } => Some(value),
            Node::Operator { .. } => None,
        }
    }

    /// Operator symbol, or `None` for leaves
    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            Node::Operand { .. } => None,
            Node::Operator { symbol, .. } => Some(*symbol),
        }
    }

    /// Number of nodes on the longest root-to-leaf path (a leaf has depth 1)
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut pending = vec![(self, 1usize)];
        while let Some((node, level)) = pending.pop() {
            max = max.max(level);
            if let Node::Operator { left, right, .. } = node {
                pending.push((left, level + 1));
                pending.push((right, level + 1));
            }
        }
        max
    }

    /// Leaf texts in left-to-right order
    pub fn operands(&self) -> Vec<&str> {
        let mut out = Vec::new();
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            match node {
                Node::Operand { value } => out.push(value.as_str()),
                Node::Operator { left, right, .. } => {
                    pending.push(right);
                    pending.push(left);
                }
            }
        }
        out
    }

    pub fn operand_count(&self) -> usize {
        self.operands().len()
    }

    pub fn operator_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            if let Node::Operator { left, right, .. } = node {
                count += 1;
                pending.push(left);
                pending.push(right);
            }
        }
        count
    }

    /// Render as `left right SYM`, the form the postfix notation reads back
    pub fn to_postfix(&self) -> String {
        let mut parts = Vec::new();
        push_postfix(self, &mut parts);
        parts.join(" ")
    }
}

fn push_postfix<'a>(node: &'a Node, parts: &mut Vec<&'a str>) {
    match node {
        Node::Operand { value } => parts.push(value),
        Node::Operator {
            symbol,
            left,
            right,
        } => {
            push_postfix(left, parts);
            push_postfix(right, parts);
            parts.push(symbol.as_str());
        }
    }
}

fn fmt_infix(node: &Node, f: &mut fmt::Formatter<'_>, nested: bool) -> fmt::Result {
    match node {
        Node::Operand { value } => f.write_str(value),
        Node::Operator {
            symbol,
            left,
            right,
        } => {
            if nested {
                f.write_str("(")?;
            }
            fmt_infix(left, f, true)?;
            write!(f, " {} ", symbol)?;
            fmt_infix(right, f, true)?;
            if nested {
                f.write_str(")")?;
            }
            Ok(())
        }
    }
}

/// Canonical infix rendering: every nested operator is parenthesized
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_infix(self, f, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        // (x AND y) OR z
        Node::operator(
            Symbol::Or,
            Node::operator(Symbol::And, Node::operand("x"), Node::operand("y")),
            Node::operand("z"),
        )
    }

    #[test]
    fn test_symbol_from_token() {
        assert_eq!(Symbol::from_token("AND"), Some(Symbol::And));
        assert_eq!(Symbol::from_token("OR"), Some(Symbol::Or));
        assert_eq!(Symbol::from_token("and"), None);
        assert_eq!(Symbol::from_token("x"), None);
    }

    #[test]
    fn test_display_canonical_infix() {
        assert_eq!(sample().to_string(), "(x AND y) OR z");
        assert_eq!(Node::operand("x").to_string(), "x");
    }

    #[test]
    fn test_to_postfix() {
        assert_eq!(sample().to_postfix(), "x y AND z OR");
    }

    #[test]
    fn test_counts_and_depth() {
        let node = sample();
        assert_eq!(node.depth(), 3);
        assert_eq!(node.operand_count(), 3);
        assert_eq!(node.operator_count(), 2);
        assert_eq!(node.operands(), vec!["x", "y", "z"]);
        assert_eq!(Node::operand("x").depth(), 1);
    }

    #[test]
    fn test_accessors() {
        let node = sample();
        assert_eq!(node.symbol(), Some(Symbol::Or));
        assert_eq!(node.value(), None);
        assert!(!node.is_operand());
        assert_eq!(Node::operand("x").value(), Some("x"));
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["type"], "operator");
        assert_eq!(json["value"], "OR");
        assert_eq!(json["left"]["value"], "AND");
        assert_eq!(json["right"]["type"], "operand");
        assert_eq!(json["right"]["value"], "z");

        let back: Node = serde_json::from_value(json).unwrap();
        assert_eq!(back, sample());
    }
}
