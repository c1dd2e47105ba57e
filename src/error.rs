//! # Error Module
//!
//! Error types returned while building, composing and querying route contracts.
//!
//! Library entry points return [`ContractError`]. Header merging is delegated to a
//! caller-supplied [`SchemaMerger`](crate::schema::SchemaMerger), which reports
//! failures as [`MergeError`]; the composition engine wraps those in
//! [`ContractError::HeaderMerge`] together with the route that triggered them and
//! never recovers from them.

use std::fmt;

/// Failure raised by a [`SchemaMerger`](crate::schema::SchemaMerger)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// The two schemas are not of a family the merger understands
    ///
    /// The bundled [`ObjectSchemaMerger`](crate::schema::ObjectSchemaMerger) only
    /// merges JSON Schema objects (`"type": "object"`).
    UnsupportedSchemaFamily {
        /// Short description of the inherited schema's family
        base: String,
        /// Short description of the local schema's family
        override_: String,
    },
    /// Free-form failure from a custom merger
    Custom(String),
}

impl fmt::Display for MergeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeError::UnsupportedSchemaFamily { base, override_ } => write!(
                f,
                "cannot merge header schemas: unsupported schema family \
                 (inherited: {base}, local: {override_}); both must be object schemas"
            ),
            MergeError::Custom(message) => write!(f, "header schema merge failed: {message}"),
        }
    }
}

impl std::error::Error for MergeError {}

/// Errors produced by the contract composition and lookup layers
#[derive(Debug, Clone, PartialEq)]
pub enum ContractError {
    /// The route group passed to the engine was already composed
    ///
    /// Composition is a single pass. Mount a composed contract inside a fresh
    /// group instead of composing it a second time.
    AlreadyComposed,
    /// A route key cannot be used as a dot-path segment
    InvalidRouteKey {
        /// The offending key
        key: String,
        /// Why it was rejected
        reason: &'static str,
    },
    /// A dot path string could not be parsed
    InvalidDotPath {
        /// The offending input
        path: String,
    },
    /// Shared headers need merging with local headers but no merger was configured
    MissingSchemaMerger {
        /// First route that required a merge
        route: String,
    },
    /// The configured merger failed
    HeaderMerge {
        /// Route whose headers were being merged
        route: String,
        /// Error reported by the merger
        source: MergeError,
    },
    /// No endpoint exists at the requested dot path
    UnknownRoute {
        /// The requested dot path
        path: String,
    },
    /// A typed endpoint declaration disagrees with the composed runtime route
    TypeMismatch {
        /// Dot path of the route
        route: String,
        /// What disagreed
        reason: String,
    },
    /// A value failed validation against a route schema
    Validation {
        /// Dot path of the route
        route: String,
        /// Which schema was used (`headers`, `body`, `response 200`, ...)
        target: String,
        /// Every violation reported by the validator
        errors: Vec<String>,
    },
    /// A path placeholder had no value when rendering a concrete path
    MissingPathParam {
        /// Dot path of the route
        route: String,
        /// Name of the placeholder
        name: String,
    },
    /// A typed value could not be converted to or from JSON
    Serialization {
        /// Dot path of the route
        route: String,
        /// serde error message
        message: String,
    },
}

impl fmt::Display for ContractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractError::AlreadyComposed => write!(
                f,
                "route group was already composed; mount it inside a new group instead of composing it again"
            ),
            ContractError::InvalidRouteKey { key, reason } => {
                write!(f, "invalid route key '{key}': {reason}")
            }
            ContractError::InvalidDotPath { path } => write!(f, "invalid dot path '{path}'"),
            ContractError::MissingSchemaMerger { route } => write!(
                f,
                "route '{route}' declares headers that must be merged with shared headers, \
                 but no schema merger was configured"
            ),
            ContractError::HeaderMerge { route, source } => {
                write!(f, "route '{route}': {source}")
            }
            ContractError::UnknownRoute { path } => write!(f, "no route at dot path '{path}'"),
            ContractError::TypeMismatch { route, reason } => {
                write!(f, "typed endpoint '{route}' does not match contract: {reason}")
            }
            ContractError::Validation {
                route,
                target,
                errors,
            } => write!(
                f,
                "route '{route}': {target} failed validation: {}",
                errors.join("; ")
            ),
            ContractError::MissingPathParam { route, name } => {
                write!(f, "route '{route}': missing value for path parameter '{name}'")
            }
            ContractError::Serialization { route, message } => {
                write!(f, "route '{route}': {message}")
            }
        }
    }
}

impl std::error::Error for ContractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ContractError::HeaderMerge { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_merge_exposes_source() {
        let err = ContractError::HeaderMerge {
            route: "posts.createOne".to_string(),
            source: MergeError::Custom("boom".to_string()),
        };
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("header schema merge failed: boom"));
        assert!(err.to_string().starts_with("route 'posts.createOne'"));
    }

    #[test]
    fn test_validation_message_joins_errors() {
        let err = ContractError::Validation {
            route: "a.b".into(),
            target: "body".into(),
            errors: vec!["one".into(), "two".into()],
        };
        assert_eq!(err.to_string(), "route 'a.b': body failed validation: one; two");
    }
}
