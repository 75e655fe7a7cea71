//! # Name Matcher
//!
//! Glob-style name matching for profile and entity selection.
//!
//! Patterns support `*` as "zero or more characters"; every other regex
//! metacharacter is escaped. Matches are anchored at both ends and
//! case-insensitive. A list of patterns matches a candidate when any
//! single pattern does.

use regex::{Regex, RegexBuilder};

use crate::error::Error;

/// A compiled list of glob patterns, matched with any-of semantics.
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<Regex>,
}

impl PatternSet {
    /// Compile a list of glob patterns.
    ///
    /// Each pattern is trimmed before translation. An empty pattern
    /// matches only the empty string.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, Error> {
        let patterns = patterns
            .iter()
            .map(|p| compile_glob(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// True when any pattern in the set matches `candidate` in full,
    /// case-insensitively.
    #[must_use]
    pub fn is_match(&self, candidate: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(candidate))
    }

    /// Number of patterns in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// True when the set contains no patterns (and so matches nothing).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Match a single glob pattern against a candidate.
pub fn matches(pattern: &str, candidate: &str) -> Result<bool, Error> {
    Ok(compile_glob(pattern)?.is_match(candidate))
}

/// Translate a glob pattern to an anchored, case-insensitive regex:
/// escape everything, then turn the escaped `*` back into `.*`.
fn compile_glob(pattern: &str) -> Result<Regex, Error> {
    let body = regex::escape(pattern.trim()).replace(r"\*", ".*");
    RegexBuilder::new(&format!("^{body}$"))
        .case_insensitive(true)
        .build()
        .map_err(|e| Error::validation(format!("invalid name pattern '{pattern}': {e}")))
}
