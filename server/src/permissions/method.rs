//! Safe (read-only) request methods.

use std::fmt;
use std::str::FromStr;

use axum::http::Method;

/// Methods that may never be configured as safe, since they mutate state.
const MUTATING_METHODS: [Method; 4] = [Method::POST, Method::PUT, Method::PATCH, Method::DELETE];

/// The fixed set of methods treated as read-only.
///
/// Requests using one of these methods are granted object access without
/// consulting authorship. Defaults to `GET`, `HEAD` and `OPTIONS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeMethods {
    methods: Vec<Method>,
}

impl SafeMethods {
    /// Build a safe-method set from the given methods.
    ///
    /// Duplicates are collapsed. Mutating verbs are rejected.
    pub fn new<I>(methods: I) -> Result<Self, SafeMethodsError>
    where
        I: IntoIterator<Item = Method>,
    {
        let mut set: Vec<Method> = Vec::new();
        for method in methods {
            if MUTATING_METHODS.contains(&method) {
                return Err(SafeMethodsError::Mutating(method));
            }
            if !set.contains(&method) {
                set.push(method);
            }
        }
        Ok(Self { methods: set })
    }

    /// Whether `method` is read-only under this set.
    #[must_use]
    pub fn contains(&self, method: &Method) -> bool {
        self.methods.contains(method)
    }

    /// Iterate over the configured methods.
    pub fn iter(&self) -> impl Iterator<Item = &Method> {
        self.methods.iter()
    }
}

impl Default for SafeMethods {
    fn default() -> Self {
        Self {
            methods: vec![Method::GET, Method::HEAD, Method::OPTIONS],
        }
    }
}

impl fmt::Display for SafeMethods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.methods.iter().map(Method::as_str).collect();
        f.write_str(&names.join(","))
    }
}

/// Parses a comma-separated list such as `GET, HEAD,OPTIONS`.
///
/// Tokens are trimmed and upper-cased; empty tokens are skipped.
impl FromStr for SafeMethods {
    type Err = SafeMethodsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let methods = s
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| {
                Method::from_bytes(t.to_ascii_uppercase().as_bytes())
                    .map_err(|_| SafeMethodsError::InvalidMethod(t.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(methods)
    }
}

/// Errors building a [`SafeMethods`] set.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SafeMethodsError {
    /// Token is not a valid HTTP method.
    #[error("Invalid HTTP method: {0:?}")]
    InvalidMethod(String),

    /// A state-changing method was listed as safe.
    #[error("{0} mutates state and cannot be a safe method")]
    Mutating(Method),
}
