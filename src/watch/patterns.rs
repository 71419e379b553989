// src/watch/patterns.rs

use std::fmt;

use globset::{GlobBuilder, GlobMatcher};

use crate::errors::{Result, WatchdogError};

/// Glob that changed paths must match before they count.
///
/// `*` and `?` do not cross `/`, so `*.rs` matches `main.rs` but not
/// `src/main.rs`; use `**/*.rs` for the whole tree. Candidates are paths
/// relative to the watch root (see [`crate::watch::path_utils::match_target`]).
#[derive(Clone)]
pub struct MatchPattern {
    pattern: String,
    matcher: GlobMatcher,
}

impl fmt::Debug for MatchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MatchPattern").field(&self.pattern).finish()
    }
}

impl fmt::Display for MatchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

impl MatchPattern {
    pub const MATCH_ALL: &'static str = "*";

    pub fn new(pattern: &str) -> Result<Self> {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|source| WatchdogError::Pattern {
                pattern: pattern.to_string(),
                source,
            })?;

        Ok(Self {
            pattern: pattern.to_string(),
            matcher: glob.compile_matcher(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn matches(&self, candidate: &str) -> bool {
        self.matcher.is_match(candidate)
    }
}
