//! Error definitions shared across subsystems.
//!
//! # Design Decisions
//! - Configuration and registration failures are fatal and surface at the
//!   call site that caused them
//! - A rejected HTTP method is not an error: it is a 405 response produced
//!   by the method guard at request time
//! - Manifest errors carry the index of the offending route

use thiserror::Error;

use crate::config::validation::ValidationError;

/// Errors raised while constructing a router or loading its configuration.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Prefix contains characters the dispatcher can never match.
    #[error("Invalid prefix {prefix:?}: {reason}")]
    InvalidPrefix { prefix: String, reason: String },

    /// Namespace cannot be used to qualify route names.
    #[error("Invalid namespace {namespace:?}: {reason}")]
    InvalidNamespace { namespace: String, reason: String },

    /// Manifest file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Manifest file is not valid TOML or does not fit the schema.
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Manifest parsed but failed semantic checks.
    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

/// Errors raised by a single `route(...)` registration.
///
/// A failed registration leaves the router's table and prefix untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// HTTP method outside the allowed set.
    #[error("Method {method:?} is not in allowed methods {allowed:?}")]
    InvalidMethod {
        method: String,
        allowed: Vec<&'static str>,
    },

    /// Path (or prefix) is not valid host-native syntax after normalization.
    #[error("Invalid pattern {path:?}: {reason}")]
    InvalidPattern { path: String, reason: String },

    /// Router prefix, once normalized for this handler, is not valid host syntax.
    #[error("Invalid prefix {prefix:?}: {reason}")]
    InvalidPrefix { prefix: String, reason: String },
}

/// Errors raised when building a URL from a route name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReverseError {
    /// No registered pattern fits the name and arguments.
    #[error("Reverse for {name:?} not found: {reason}")]
    NoReverseMatch { name: String, reason: String },
}

/// Errors raised while turning a manifest into a router.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// One of the declared routes failed to register.
    #[error("routes[{index}] ({handler}): {source}")]
    Registration {
        index: usize,
        handler: String,
        #[source]
        source: RegistrationError,
    },
}

/// Result type for registration calls.
pub type RegistrationResult<T> = Result<T, RegistrationError>;

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
