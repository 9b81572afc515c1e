//! Text analysis for the full-text mapper.
//!
//! Analyzers turn a text value into the token stream that gets indexed and
//! that phrase/match conditions are analyzed with at query time. The
//! registry is built once at startup and looked up by identifier from the
//! schema configuration (`default_analyzer` or a text mapper's `analyzer`
//! option).

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::ops::Deref;
use std::sync::Arc;

use crate::errors::{ErrorKind, LexError, LexResult};

/// Identifier of the analyzer used when the schema names none.
pub const DEFAULT_ANALYZER: &str = "standard";

/// Provides tokenization for full-text indexing and querying.
///
/// Implementations must be stateless: one analyzer instance is shared by
/// every concurrent write and query thread.
pub trait AnalyzerProvider: Send + Sync {
    /// The registry identifier of this analyzer.
    fn name(&self) -> &'static str;

    /// Tokenizes text into index terms.
    fn analyze(&self, text: &str) -> Vec<String>;
}

/// Type-erased, cheaply cloneable wrapper for [AnalyzerProvider] implementations.
#[derive(Clone)]
pub struct Analyzer(Arc<dyn AnalyzerProvider>);

impl Analyzer {
    pub fn new<P: AnalyzerProvider + 'static>(provider: P) -> Self {
        Analyzer(Arc::new(provider))
    }
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Analyzer").field(&self.0.name()).finish()
    }
}

impl Deref for Analyzer {
    type Target = dyn AnalyzerProvider;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// Keeps the whole input as a single exact token.
struct KeywordAnalyzer;

impl AnalyzerProvider for KeywordAnalyzer {
    fn name(&self) -> &'static str {
        "keyword"
    }

    fn analyze(&self, text: &str) -> Vec<String> {
        vec![text.to_string()]
    }
}

/// Single token, lower-cased.
struct LowercaseAnalyzer;

impl AnalyzerProvider for LowercaseAnalyzer {
    fn name(&self) -> &'static str {
        "lowercase"
    }

    fn analyze(&self, text: &str) -> Vec<String> {
        vec![text.to_lowercase()]
    }
}

/// Splits on Unicode whitespace, preserving case.
struct WhitespaceAnalyzer;

impl AnalyzerProvider for WhitespaceAnalyzer {
    fn name(&self) -> &'static str {
        "whitespace"
    }

    fn analyze(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(|t| t.to_string()).collect()
    }
}

/// Lower-cases and splits on any non-alphanumeric character.
struct StandardAnalyzer;

impl AnalyzerProvider for StandardAnalyzer {
    fn name(&self) -> &'static str {
        "standard"
    }

    fn analyze(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(|t| t.to_string())
            .collect()
    }
}

static REGISTRY: Lazy<HashMap<&'static str, Analyzer>> = Lazy::new(|| {
    let mut registry: HashMap<&'static str, Analyzer> = HashMap::new();
    for analyzer in [
        Analyzer::new(KeywordAnalyzer),
        Analyzer::new(LowercaseAnalyzer),
        Analyzer::new(WhitespaceAnalyzer),
        Analyzer::new(StandardAnalyzer),
    ] {
        registry.insert(analyzer.name(), analyzer);
    }
    registry
});

/// Looks up an analyzer by its registry identifier.
///
/// Unknown identifiers are a [ErrorKind::ConfigError], surfaced at schema
/// build time before any data is touched.
pub fn analyzer(name: &str) -> LexResult<Analyzer> {
    REGISTRY.get(name).cloned().ok_or_else(|| {
        LexError::new(
            &format!("Unknown analyzer `{}`", name),
            ErrorKind::ConfigError,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_analyzer() {
        let a = analyzer("standard").unwrap();
        assert_eq!(
            a.analyze("Hello, World-42!"),
            vec!["hello", "world", "42"]
        );
    }

    #[test]
    fn test_keyword_analyzer_keeps_input() {
        let a = analyzer("keyword").unwrap();
        assert_eq!(a.analyze("One Two"), vec!["One Two"]);
    }

    #[test]
    fn test_lowercase_analyzer() {
        let a = analyzer("lowercase").unwrap();
        assert_eq!(a.analyze("MiXeD"), vec!["mixed"]);
    }

    #[test]
    fn test_whitespace_analyzer_preserves_case() {
        let a = analyzer("whitespace").unwrap();
        assert_eq!(a.analyze("Foo  Bar"), vec!["Foo", "Bar"]);
    }

    #[test]
    fn test_unknown_analyzer_is_config_error() {
        let err = analyzer("nope").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::ConfigError);
    }

    #[test]
    fn test_default_analyzer_exists() {
        assert!(analyzer(DEFAULT_ANALYZER).is_ok());
    }
}
