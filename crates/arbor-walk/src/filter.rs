//! Entry filtering for the construction pass.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use globset::{Glob, GlobMatcher};

use arbor_core::{NodeKind, WalkError};

/// Predicate form of a walk filter: receives the entry's base name, its
/// absolute path, and its kind.
pub type FilterPredicate = Arc<dyn Fn(&str, &Path, NodeKind) -> bool + Send + Sync>;

/// Decides whether a discovered entry is included in the tree at all.
///
/// An excluded entry is skipped entirely: no node, no recursion into it, no
/// loader invocation, and no trace in its parent's maps or counts. When no
/// filter is configured everything is included.
#[derive(Clone)]
pub enum Filter {
    /// Caller predicate over (name, absolute path, kind).
    Predicate(FilterPredicate),
    /// Glob pattern evaluated against the absolute path; a leading `!`
    /// negates the match.
    Glob(String),
}

impl Filter {
    /// Build a predicate filter.
    pub fn predicate(f: impl Fn(&str, &Path, NodeKind) -> bool + Send + Sync + 'static) -> Self {
        Filter::Predicate(Arc::new(f))
    }

    /// Build a glob filter.
    pub fn glob(pattern: impl Into<String>) -> Self {
        Filter::Glob(pattern.into())
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Predicate(_) => f.write_str("Filter::Predicate(..)"),
            Filter::Glob(pattern) => f.debug_tuple("Filter::Glob").field(pattern).finish(),
        }
    }
}

/// A filter with its glob pattern compiled, built once per walk.
pub(crate) enum CompiledFilter {
    Predicate(FilterPredicate),
    Glob { matcher: GlobMatcher, negated: bool },
}

impl fmt::Debug for CompiledFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompiledFilter::Predicate(_) => f.write_str("CompiledFilter::Predicate(..)"),
            CompiledFilter::Glob { matcher, negated } => f
                .debug_struct("CompiledFilter::Glob")
                .field("matcher", matcher)
                .field("negated", negated)
                .finish(),
        }
    }
}

impl CompiledFilter {
    /// Compile a filter; a malformed glob pattern is fatal.
    pub(crate) fn compile(filter: &Filter) -> Result<Self, WalkError> {
        match filter {
            Filter::Predicate(predicate) => Ok(CompiledFilter::Predicate(predicate.clone())),
            Filter::Glob(pattern) => {
                let (raw, negated) = match pattern.strip_prefix('!') {
                    Some(rest) => (rest, true),
                    None => (pattern.as_str(), false),
                };
                let matcher = Glob::new(raw)
                    .map_err(|err| WalkError::pattern(raw, err.to_string()))?
                    .compile_matcher();
                Ok(CompiledFilter::Glob { matcher, negated })
            }
        }
    }

    /// Whether the entry passes the filter.
    pub(crate) fn includes(&self, name: &str, absolute: &Path, kind: NodeKind) -> bool {
        match self {
            CompiledFilter::Predicate(predicate) => predicate(name, absolute, kind),
            CompiledFilter::Glob { matcher, negated } => {
                matcher.is_match(absolute) != *negated
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicate_filter() {
        let filter = Filter::predicate(|name, _path, kind| {
            kind.is_dir() || name.ends_with(".rs")
        });
        let compiled = CompiledFilter::compile(&filter).unwrap();

        assert!(compiled.includes("src", Path::new("/p/src"), NodeKind::Directory));
        assert!(compiled.includes("main.rs", Path::new("/p/src/main.rs"), NodeKind::File));
        assert!(!compiled.includes("notes.txt", Path::new("/p/notes.txt"), NodeKind::File));
    }

    #[test]
    fn test_glob_filter() {
        let compiled = CompiledFilter::compile(&Filter::glob("**/*.rs")).unwrap();
        assert!(compiled.includes("main.rs", Path::new("/p/src/main.rs"), NodeKind::File));
        assert!(!compiled.includes("notes.txt", Path::new("/p/notes.txt"), NodeKind::File));
    }

    #[test]
    fn test_negated_glob_filter() {
        let compiled = CompiledFilter::compile(&Filter::glob("!**/*.log")).unwrap();
        assert!(!compiled.includes("out.log", Path::new("/p/out.log"), NodeKind::File));
        assert!(compiled.includes("main.rs", Path::new("/p/main.rs"), NodeKind::File));
    }

    #[test]
    fn test_malformed_glob_is_fatal() {
        let err = CompiledFilter::compile(&Filter::glob("a{b")).unwrap_err();
        assert!(matches!(err, WalkError::Pattern { .. }));
    }

    #[test]
    fn test_debug_formats() {
        let glob = Filter::glob("**/*.rs");
        assert!(format!("{glob:?}").contains("**/*.rs"));
        let predicate = Filter::predicate(|_, _, _| true);
        assert!(format!("{predicate:?}").contains("Predicate"));
    }
}
