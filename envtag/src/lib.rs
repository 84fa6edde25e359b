//! Bind environment variables to annotated struct fields
//!
//! `envtag` fills an existing configuration struct from the process environment.
//! Each field may name an environment variable with `#[env(name = "VAR")]`. The
//! binder walks the struct, looks up each named variable and converts its text
//! into the field's type. Fields without an annotation, and fields whose variable
//! is unset or empty, keep whatever value they already had. This makes `envtag`
//! a natural last layer on top of defaults or a config file.
//!
//! # Features
//!
//! - **Declarative**: `#[derive(EnvTag)]` lists the struct's fields at compile time
//! - **Layering**: only variables that are set and non-empty overwrite a field
//! - **Nested records**: struct fields deriving `EnvTag` are walked recursively
//! - **Durations and timestamps**: `1h30m` style durations and timestamps in a
//!   format configured on the [`Binder`]
//!
//! # Value Parsing
//!
//! - Strings: assigned verbatim
//! - Booleans: `1`, `t`, `T`, `TRUE`, `true`, `True` and the `false` equivalents
//! - Integers: decimal, `0x` hex, `0o` or leading-`0` octal, `0b` binary, `_` separators,
//!   range-checked against the field's width
//! - Floats: decimal or exponent notation, `inf`, `nan`
//! - `chrono::TimeDelta` / `std::time::Duration`: `300ms`, `1h30m`, `-1.5s`
//! - `DateTime<Utc>`, `DateTime<FixedOffset>`, `NaiveDateTime`: chrono `strftime` format
//!   set with [`Binder::with_time_format`]
//!
//! Annotated fields of any other type (`Vec<T>`, `Option<T>`, maps, boxes) fail
//! with [`BindError::UnsupportedType`] once their variable is set.
//!
//! # Example
//!
//! ```rust
//! use envtag::EnvTag;
//!
//! #[derive(Debug, EnvTag)]
//! struct Config {
//!     #[env(name = "APP_HOST")]
//!     pub host: String,
//!
//!     #[env(name = "APP_PORT")]
//!     pub port: u16,
//!
//!     #[env(name = "APP_TIMEOUT")]
//!     pub timeout: std::time::Duration,
//!
//!     // No annotation: never touched by the binder
//!     pub workers: usize,
//! }
//!
//! # fn main() -> Result<(), envtag::BindError> {
//! std::env::set_var("APP_HOST", "0.0.0.0");
//! std::env::set_var("APP_TIMEOUT", "1m30s");
//!
//! let mut config = Config {
//!     host: "127.0.0.1".to_string(),
//!     port: 8080,
//!     timeout: std::time::Duration::from_secs(5),
//!     workers: 4,
//! };
//! envtag::bind(&mut config)?;
//!
//! assert_eq!(config.host, "0.0.0.0");
//! assert_eq!(config.port, 8080);
//! assert_eq!(config.timeout.as_secs(), 90);
//! # Ok(())
//! # }
//! ```
//!
//! Records are bound through a mutable reference; passing one by value does not
//! compile:
//!
//! ```compile_fail
//! # use envtag::EnvTag;
//! #[derive(Default, EnvTag)]
//! struct Config {
//!     #[env(name = "APP_HOST")]
//!     host: String,
//! }
//!
//! envtag::bind(Config::default()).unwrap();
//! ```
//!
//! # Attributes
//!
//! ## `#[env(name = "VAR")]`
//!
//! Bind the field to the `VAR` environment variable. `#[env("VAR")]` is shorthand.
//! An empty name is the same as no annotation.
//!
//! ## `#[env(skip)]`
//!
//! Leave the field out of the record entirely. Use it for fields whose type does not
//! implement [`EnvValue`], such as runtime handles kept next to the settings.
//!
//! ```rust
//! # use envtag::EnvTag;
//! struct Pool;
//!
//! #[derive(EnvTag)]
//! pub struct Config {
//!     #[env(name = "DATABASE_URL")]
//!     pub database_url: String,
//!
//!     #[env(skip)]
//!     pub pool: Pool,
//! }
//! ```
//!
//! ## `#[env(prefix = "PREFIX_")]`
//!
//! On the struct, prepend `PREFIX_` to every variable name declared on it. Nested
//! records keep their own names.
//!
//! ```rust
//! # use envtag::EnvTag;
//! #[derive(Default, EnvTag)]
//! #[env(prefix = "DB_")]
//! pub struct Database {
//!     // Load from DB_HOST
//!     #[env(name = "HOST")]
//!     pub host: String,
//! }
//!
//! #[derive(Default, EnvTag)]
//! pub struct Config {
//!     // Walked without any annotation
//!     pub database: Database,
//! }
//! ```
//!
//! # Nested records
//!
//! A field whose type derives `EnvTag` is always walked, whether or not it is
//! annotated. Record types must not contain themselves, directly or indirectly.

mod binder;
mod de;
pub mod duration;
mod error;
mod timestamp;
mod value;

pub use binder::{bind, Binder};
pub use duration::DurationError;
pub use envtag_derive::EnvTag;
pub use error::BindError;
pub use value::{EnvValue, Field, Record, Target, Timestamp};
