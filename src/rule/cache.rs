//! Rule parsing cache
//!
//! Rules tend to be parsed over and over with the same text, so successful
//! parses under the default configuration are memoized process-wide.
//! Failures are not cached.

use crate::error::Result;
use crate::rule::ast::Node;
use crate::rule::parser;
use ahash::AHashMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;

/// Global rule cache with fast hashing (ahash)
///
/// Entries are never evicted; feeding it unbounded distinct rule text grows it without limit.
static RULE_CACHE: Lazy<RwLock<AHashMap<String, Arc<Node>>>> =
    Lazy::new(|| RwLock::new(AHashMap::with_capacity(256)));

/// Get or parse a rule string, reusing the cached AST when present
#[inline]
pub fn get_or_parse(rule: &str) -> Result<Arc<Node>> {
    {
        let cache = RULE_CACHE.read();
        if let Some(ast) = cache.get(rule) {
            return Ok(Arc::clone(ast));
        }
    }

    let ast = Arc::new(parser::parse(rule)?);

    let mut cache = RULE_CACHE.write();
    // Another thread may have won the race; keep the first entry
    let entry = cache
        .entry(rule.to_string())
        .or_insert_with(|| Arc::clone(&ast));
    Ok(Arc::clone(entry))
}

/// Clear the rule cache
pub fn clear_cache() {
    RULE_CACHE.write().clear();
}

/// Number of cached rules
pub fn cache_size() -> usize {
    RULE_CACHE.read().len()
}

#[cfg(test)]
mod tests {
    use super::*;

    // The cache is global, so tests only assert on their own keys

    #[test]
    fn test_cache_hit_returns_same_tree() {
        let first = get_or_parse("(cache_a AND cache_b) OR cache_c").unwrap();
        let second = get_or_parse("(cache_a AND cache_b) OR cache_c").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(cache_size() >= 1);
    }

    #[test]
    fn test_failures_are_not_cached() {
        let rule = "cache_x AND";
        assert!(get_or_parse(rule).is_err());
        assert!(!RULE_CACHE.read().contains_key(rule));
    }

    #[test]
    fn test_cached_matches_direct_parse() {
        let rule = "cache_p OR (cache_q AND cache_r)";
        let cached = get_or_parse(rule).unwrap();
        assert_eq!(*cached, parser::parse(rule).unwrap());
    }
}
