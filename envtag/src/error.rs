//! Error types for binding environment variables to record fields

use crate::duration::DurationError;

/// Errors that can occur while binding environment variables to a record.
///
/// Every conversion error carries the environment variable name and the literal
/// value that failed to parse, so operators can see which setting is wrong.
/// The first error aborts the bind; fields assigned before it keep their new values.
#[derive(Debug, thiserror::Error)]
pub enum BindError {
    /// The bind target is not a record.
    ///
    /// Occurs when `bind` is handed something other than an `EnvTag` struct,
    /// e.g. a `String` or an `Option<Config>`.
    #[error("Invalid bind target: expected a record, got {kind}")]
    InvalidTarget {
        /// Kind of the value that was passed in
        kind: &'static str,
    },

    /// An annotated field has a type the binder cannot convert into.
    #[error("Unsupported type '{kind}': {field}")]
    UnsupportedType {
        /// Dotted path of the field within the record (e.g. `database.hosts`)
        field: String,
        /// Kind of the field's type (e.g. `slice`, `map`)
        kind: &'static str,
    },

    #[error("Invalid boolean for env '{env}': {value}")]
    InvalidBoolean { env: String, value: String },

    #[error("Invalid integer for env '{env}': {value}")]
    InvalidInteger { env: String, value: String },

    #[error("Invalid unsigned integer for env '{env}': {value}")]
    InvalidUnsignedInteger { env: String, value: String },

    #[error("Invalid float for env '{env}': {value}")]
    InvalidFloat { env: String, value: String },

    /// The value does not follow the duration grammar (`1h30m`, `250ms`, ...).
    #[error("Invalid duration ({source}) for env '{env}': {value}")]
    InvalidDuration {
        env: String,
        value: String,
        source: DurationError,
    },

    /// The value does not match the binder's timestamp format.
    #[error("Invalid timestamp ({source}) for env '{env}': {value}")]
    InvalidTimestamp {
        env: String,
        value: String,
        source: chrono::ParseError,
    },

    /// A timestamp field was found but no format was configured on the `Binder`.
    ///
    /// Raised before any parsing is attempted.
    #[error("Time format not provided (Binder::with_time_format) for env '{env}': {value}")]
    MissingTimeFormat { env: String, value: String },
}

impl BindError {
    /// Environment variable the error refers to, if any.
    pub fn env(&self) -> Option<&str> {
        match self {
            Self::InvalidTarget { .. } | Self::UnsupportedType { .. } => None,
            Self::InvalidBoolean { env, .. }
            | Self::InvalidInteger { env, .. }
            | Self::InvalidUnsignedInteger { env, .. }
            | Self::InvalidFloat { env, .. }
            | Self::InvalidDuration { env, .. }
            | Self::InvalidTimestamp { env, .. }
            | Self::MissingTimeFormat { env, .. } => Some(env),
        }
    }

    /// Literal value that failed to convert, if any.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::InvalidTarget { .. } | Self::UnsupportedType { .. } => None,
            Self::InvalidBoolean { value, .. }
            | Self::InvalidInteger { value, .. }
            | Self::InvalidUnsignedInteger { value, .. }
            | Self::InvalidFloat { value, .. }
            | Self::InvalidDuration { value, .. }
            | Self::InvalidTimestamp { value, .. }
            | Self::MissingTimeFormat { value, .. } => Some(value),
        }
    }
}
