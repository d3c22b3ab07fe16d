//! Stateless predicate helpers over location strings.
//!
//! Used by walk filters and by loaders for ad-hoc classification. All
//! functions are pure; the only failure mode is a malformed glob or regex
//! pattern, surfaced as [`WalkError::Pattern`].

use std::path::Path;

use globset::Glob;
use regex::Regex;

use arbor_core::WalkError;

/// Match a location against a single glob pattern.
pub fn glob(location: &str, pattern: &str) -> Result<bool, WalkError> {
    let matcher = Glob::new(pattern)
        .map_err(|err| WalkError::pattern(pattern, err.to_string()))?
        .compile_matcher();
    Ok(matcher.is_match(location))
}

/// Match a location against a list of glob patterns, true if any matches.
pub fn globs<S: AsRef<str>>(location: &str, patterns: &[S]) -> Result<bool, WalkError> {
    for pattern in patterns {
        if glob(location, pattern.as_ref())? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Match a location against a regular expression.
pub fn regex(location: &str, pattern: &str) -> Result<bool, WalkError> {
    let regex = Regex::new(pattern)
        .map_err(|err| WalkError::pattern(pattern, err.to_string()))?;
    Ok(regex.is_match(location))
}

/// Compare a location's computed extension against `ext`, exactly.
///
/// Extensions carry their leading dot (`".js"`); a location without an
/// extension computes to the empty string.
pub fn extension(location: &str, ext: &str) -> bool {
    file_extension(location) == ext
}

/// Compare a location's computed extension against a list, true if any is an
/// exact match.
pub fn extensions<S: AsRef<str>>(location: &str, exts: &[S]) -> bool {
    let found = file_extension(location);
    exts.iter().any(|ext| found == ext.as_ref())
}

/// Apply a caller-supplied predicate to a location.
pub fn test<F: Fn(&str) -> bool>(location: &str, predicate: F) -> bool {
    predicate(location)
}

/// The computed extension of a location: `".rs"` for `main.rs`, `""` for
/// `Makefile` or `.gitignore`.
pub fn file_extension(location: &str) -> String {
    Path::new(location)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}
