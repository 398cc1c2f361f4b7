//! Environment variable lookup with warn-level logging for invalid values.

use std::str::FromStr;

/// Parse an environment variable, falling back to `default`.
///
/// An unset variable is the expected case and returns `default` quietly.
/// A set but unparsable value is logged at warn level before falling back.
pub fn env_parse_with_default<T: FromStr + std::fmt::Display>(var: &str, default: T) -> T {
    let Some(raw) = env_non_empty(var) else {
        return default;
    };
    raw.trim().parse().unwrap_or_else(|_| {
        tracing::warn!(var, value = %raw, default = %default, "invalid env var value, using default");
        default
    })
}

/// Value of `var` if it is set to something other than whitespace.
#[must_use]
pub fn env_non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}
