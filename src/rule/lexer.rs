//! Rule tokenizer
//!
//! Two modes share this module. [`tokenize`] is the plain splitter: parens
//! are self-delimiting and everything else breaks on whitespace, so a
//! condition like `age > 30` comes out as three fragments.
//! `tokenize_compound` additionally keeps quoted literals whole and fuses
//! `left comparator right` triples into a single operand token.

use crate::error::ParseError;
use crate::rule::ast::Symbol;
use std::borrow::Cow;

/// Split a rule string into tokens, treating `(` and `)` as standalone tokens
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;

    for (i, c) in text.char_indices() {
        if c == '(' || c == ')' {
            if let Some(s) = start.take() {
                tokens.push(&text[s..i]);
            }
            tokens.push(&text[i..i + 1]);
        } else if c.is_whitespace() {
            if let Some(s) = start.take() {
                tokens.push(&text[s..i]);
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }

    if let Some(s) = start {
        tokens.push(&text[s..]);
    }

    tokens
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Lexeme<'a> {
    Paren(&'a str),
    Comparator(&'a str),
    Quoted(&'a str),
    Word(&'a str),
}

impl<'a> Lexeme<'a> {
    fn text(self) -> &'a str {
        match self {
            Lexeme::Paren(s) | Lexeme::Comparator(s) | Lexeme::Quoted(s) | Lexeme::Word(s) => s,
        }
    }

    /// Can this lexeme sit on either side of a comparator?
    fn is_term(self) -> bool {
        match self {
            Lexeme::Quoted(_) => true,
            Lexeme::Word(w) => Symbol::from_token(w).is_none(),
            Lexeme::Paren(_) | Lexeme::Comparator(_) => false,
        }
    }
}

fn is_comparator_char(c: char) -> bool {
    matches!(c, '<' | '>' | '=' | '!')
}

fn is_word_boundary(c: char) -> bool {
    c.is_whitespace() || c == '(' || c == ')' || is_comparator_char(c)
}

fn lex(text: &str) -> Result<Vec<Lexeme<'_>>, ParseError> {
    let mut lexemes = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c.is_whitespace() {
            continue;
        }

        if c == '(' || c == ')' {
            lexemes.push(Lexeme::Paren(&text[i..i + 1]));
        } else if c == '\'' || c == '"' {
            let close = text[i + 1..]
                .find(c)
                .ok_or(ParseError::UnterminatedLiteral { offset: i })?;
            let end = i + 1 + close + 1;
            lexemes.push(Lexeme::Quoted(&text[i..end]));
            while chars.next_if(|&(j, _)| j < end).is_some() {}
        } else if is_comparator_char(c) {
            let mut end = i + c.len_utf8();
            while let Some((j, next)) = chars.next_if(|&(_, n)| is_comparator_char(n)) {
                end = j + next.len_utf8();
            }
            lexemes.push(Lexeme::Comparator(&text[i..end]));
        } else {
            let mut end = i + c.len_utf8();
            while let Some((j, next)) = chars.next_if(|&(_, n)| !is_word_boundary(n)) {
                end = j + next.len_utf8();
            }
            lexemes.push(Lexeme::Word(&text[i..end]));
        }
    }

    Ok(lexemes)
}

/// Tokenize with the compound operand grammar
///
/// `age>30`, `age > 30` and `department = 'Sales'` each become one operand
/// token, rendered with single spaces around the comparator. Lexemes that do
/// not form a complete triple are passed through unchanged.
pub(crate) fn tokenize_compound(text: &str) -> Result<Vec<Cow<'_, str>>, ParseError> {
    let lexemes = lex(text)?;
    let mut tokens = Vec::with_capacity(lexemes.len());
    let mut i = 0;

    while i < lexemes.len() {
        if let &[left, Lexeme::Comparator(cmp), right, ..] = &lexemes[i..] {
            if left.is_term() && right.is_term() {
                tokens.push(Cow::Owned(format!("{} {} {}", left.text(), cmp, right.text())));
                i += 3;
                continue;
            }
        }
        tokens.push(Cow::Borrowed(lexemes[i].text()));
        i += 1;
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_splits_parens() {
        assert_eq!(
            tokenize("(x AND y)OR z"),
            vec!["(", "x", "AND", "y", ")", "OR", "z"]
        );
    }

    #[test]
    fn test_tokenize_empty_and_blank() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \t\n ").is_empty());
    }

    #[test]
    fn test_tokenize_fragments_multi_word_operands() {
        assert_eq!(
            tokenize("department = 'Sales'"),
            vec!["department", "=", "'Sales'"]
        );
    }

    #[test]
    fn test_tokenize_nested_parens_without_spaces() {
        assert_eq!(tokenize("((a))"), vec!["(", "(", "a", ")", ")"]);
    }

    #[test]
    fn test_compound_fuses_comparisons() {
        let tokens = tokenize_compound("(age > 30 AND department = 'Sales')").unwrap();
        assert_eq!(
            tokens,
            vec!["(", "age > 30", "AND", "department = 'Sales'", ")"]
        );
    }

    #[test]
    fn test_compound_normalizes_spacing() {
        assert_eq!(tokenize_compound("age>=30").unwrap(), vec!["age >= 30"]);
        assert_eq!(tokenize_compound("age   !=  30").unwrap(), vec!["age != 30"]);
    }

    #[test]
    fn test_compound_quoted_literal_is_atomic() {
        let tokens = tokenize_compound("city = \"New York (NY)\" OR x").unwrap();
        assert_eq!(tokens, vec!["city = \"New York (NY)\"", "OR", "x"]);
    }

    #[test]
    fn test_compound_unterminated_literal() {
        let err = tokenize_compound("name = 'Bob").unwrap_err();
        assert_eq!(err, ParseError::UnterminatedLiteral { offset: 7 });
    }

    #[test]
    fn test_compound_keywords_are_not_fused() {
        let tokens = tokenize_compound("AND = x").unwrap();
        assert_eq!(tokens, vec!["AND", "=", "x"]);
    }

    #[test]
    fn test_compound_passes_plain_words_through() {
        let tokens = tokenize_compound("x AND y").unwrap();
        assert_eq!(tokens, vec!["x", "AND", "y"]);
    }
}
