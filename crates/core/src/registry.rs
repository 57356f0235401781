//! Namespaced registry keys.
//!
//! Enchantments and other host identifiers are referred to by keys of the
//! form `namespace:path` (e.g., `minecraft:silk_touch`). Configuration files
//! may omit the namespace, in which case [`DEFAULT_NAMESPACE`] is assumed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default namespace used when a key omits an explicit namespace.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Error returned when parsing an invalid [`RegistryKey`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryKeyError {
    /// Input was blank.
    #[error("registry key cannot be empty")]
    Empty,
    /// Namespace or path segment was blank.
    #[error("registry key {0} cannot be empty")]
    EmptySegment(&'static str),
    /// Namespace or path exceeded its length limit.
    #[error("registry key {segment} too long (max {max})")]
    TooLong {
        /// Offending segment name.
        segment: &'static str,
        /// Maximum accepted length.
        max: usize,
    },
    /// Segment contained characters outside the allowed set.
    #[error("registry key {0} has invalid characters")]
    InvalidCharacters(&'static str),
}

/// A namespaced key of the form `namespace:path`.
///
/// Ordering is lexical by `(namespace, path)` and is stable across runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegistryKey {
    namespace: String,
    path: String,
}

impl RegistryKey {
    /// Parse a registry key.
    ///
    /// Accepts either:
    /// - `namespace:path`
    /// - `path` (uses [`DEFAULT_NAMESPACE`])
    pub fn parse(input: &str) -> Result<Self, RegistryKeyError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(RegistryKeyError::Empty);
        }

        let (namespace, path) = input
            .split_once(':')
            .unwrap_or((DEFAULT_NAMESPACE, input));
        let namespace = namespace.trim();
        let path = path.trim();

        validate_segment("namespace", namespace, 64, |c| {
            matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.')
        })?;
        validate_segment("path", path, 128, |c| {
            matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.' | '/')
        })?;

        Ok(Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
        })
    }

    /// Build a key in the default namespace from a trusted static path.
    pub fn vanilla(path: &str) -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            path: path.to_string(),
        }
    }

    /// Registry key namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Registry key path.
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for RegistryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for RegistryKey {
    type Err = RegistryKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn validate_segment(
    segment: &'static str,
    value: &str,
    max: usize,
    allowed: impl Fn(char) -> bool,
) -> Result<(), RegistryKeyError> {
    if value.is_empty() {
        return Err(RegistryKeyError::EmptySegment(segment));
    }
    if value.len() > max {
        return Err(RegistryKeyError::TooLong { segment, max });
    }
    if !value.chars().all(allowed) {
        return Err(RegistryKeyError::InvalidCharacters(segment));
    }
    Ok(())
}
