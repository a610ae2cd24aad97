//! Full-match pattern validation for string parameters
//!
//! Patterns are anchored to the whole value regardless of explicit anchors,
//! so `keystone/` can never sneak past a `^/...` prefix rule on a substring
//! match.

use regex::Regex;

use crate::error::{ConfigError, Result, ValidationError};

/// Pattern for path-prefix parameters: starts with `/`, no trailing `/`,
/// no empty segments.
pub const PATH_PREFIX_PATTERN: &str = "^/[^/]+(/[^/]+)*$";

/// Validate `value` against `pattern` with full-string match semantics.
///
/// Returns [`ConfigError::InvalidPattern`] if the pattern itself does not
/// compile, and a structured [`ValidationError`] carrying the parameter
/// name, offending value, and pattern on mismatch.
pub fn validate(param: &str, value: &str, pattern: &str) -> Result<()> {
    let re = Regex::new(&anchor(pattern)).map_err(|e| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;

    if re.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new(param, value, pattern).into())
    }
}

/// Wrap a pattern so it matches the whole value. The non-capturing group
/// keeps alternations anchored as a unit.
fn anchor(pattern: &str) -> String {
    format!("^(?:{})$", pattern)
}
