//! The recursive field walk and type-directed conversion

use crate::de;
use crate::duration::{self, DurationError};
use crate::error::BindError;
use crate::timestamp;
use crate::value::{EnvValue, Record, Target, Timestamp};
use chrono::{TimeDelta, Utc};
use tracing::{debug, trace};

/// Binds environment variables to the fields of a record.
///
/// A `Binder` carries the settings the special-type parsers read at conversion
/// time. Currently that is only the timestamp format. It holds no other state,
/// so one binder can serve any number of binds, including concurrent ones.
///
/// ```rust
/// use envtag::{Binder, EnvTag};
///
/// #[derive(Debug, Default, EnvTag)]
/// struct Config {
///     #[env(name = "SERVICE_HOST")]
///     host: String,
///
///     #[env(name = "SERVICE_STARTED_AT")]
///     started_at: chrono::DateTime<chrono::Utc>,
/// }
///
/// # fn main() -> Result<(), envtag::BindError> {
/// # std::env::set_var("SERVICE_HOST", "db.internal");
/// # std::env::set_var("SERVICE_STARTED_AT", "2024-03-01 12:30:00");
/// let binder = Binder::new().with_time_format("%Y-%m-%d %H:%M:%S");
/// let mut config = Config::default();
/// binder.bind(&mut config)?;
/// assert_eq!(config.host, "db.internal");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Binder {
    time_format: Option<String>,
}

impl Binder {
    /// A binder with no timestamp format.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the format used for timestamp fields (chrono `strftime` syntax).
    pub fn with_time_format(mut self, format: impl Into<String>) -> Self {
        self.set_time_format(format);
        self
    }

    /// Set the format used for timestamp fields by later binds.
    ///
    /// Setting an empty format leaves the binder without one.
    pub fn set_time_format(&mut self, format: impl Into<String>) {
        self.time_format = Some(format.into());
    }

    /// The configured timestamp format. An empty format counts as none.
    pub fn time_format(&self) -> Option<&str> {
        self.time_format.as_deref().filter(|format| !format.is_empty())
    }

    /// Bind environment variables to every annotated field of `target`.
    ///
    /// # Errors
    ///
    /// - `target` is not a record (`InvalidTarget`); nothing is modified
    /// - an annotated field has a type the binder cannot convert into
    /// - an environment variable's value cannot be converted into its field's type
    ///
    /// Fields assigned before the first error keep their new values.
    pub fn bind<T>(&self, target: &mut T) -> Result<(), BindError>
    where
        T: EnvValue + ?Sized,
    {
        let record = match target.target() {
            Target::Record(record) => record,
            other => {
                return Err(BindError::InvalidTarget { kind: other.kind() });
            }
        };

        debug!("binding record from environment");
        match self.bind_record(record, "") {
            Ok(()) => {
                debug!("bind finished");
                Ok(())
            }
            Err(err) => {
                debug!(error = %err, "bind aborted");
                Err(err)
            }
        }
    }

    fn bind_record(&self, record: &mut dyn Record, parent: &str) -> Result<(), BindError> {
        for field in record.fields() {
            let path = if parent.is_empty() {
                field.name().to_string()
            } else {
                format!("{}.{}", parent, field.name())
            };
            let env_name = field.env();

            let target = match field.into_target() {
                Target::Record(nested) => {
                    self.bind_record(nested, &path)?;
                    continue;
                }
                target => target,
            };

            let Some(env_name) = env_name else {
                trace!(field = %path, "no binding directive, skipping");
                continue;
            };
            let Some(value) = de::get_env_value(env_name) else {
                trace!(field = %path, env = env_name, "environment variable unset or empty, skipping");
                continue;
            };

            self.assign(target, &path, env_name, value)?;
            trace!(field = %path, env = env_name, "field bound");
        }
        Ok(())
    }

    fn assign(&self, target: Target<'_>, path: &str, env: &str, value: String) -> Result<(), BindError> {
        match target {
            Target::Duration(slot) => {
                let nanos = parse_duration(env, &value)?;
                *slot = TimeDelta::nanoseconds(nanos);
            }
            Target::StdDuration(slot) => {
                let nanos = parse_duration(env, &value)?;
                let Ok(nanos) = u64::try_from(nanos) else {
                    return Err(BindError::InvalidDuration {
                        env: env.to_string(),
                        source: DurationError::Negative(value.clone()),
                        value,
                    });
                };
                *slot = std::time::Duration::from_nanos(nanos);
            }
            Target::Timestamp(slot) => {
                let Some(format) = self.time_format() else {
                    return Err(BindError::MissingTimeFormat {
                        env: env.to_string(),
                        value,
                    });
                };
                let parsed = match timestamp::parse(&value, format) {
                    Ok(parsed) => parsed,
                    Err(source) => {
                        return Err(BindError::InvalidTimestamp {
                            env: env.to_string(),
                            value,
                            source,
                        });
                    }
                };
                match slot {
                    Timestamp::Utc(slot) => *slot = parsed.with_timezone(&Utc),
                    Timestamp::Fixed(slot) => *slot = parsed,
                    Timestamp::Naive(slot) => *slot = parsed.naive_local(),
                }
            }
            Target::Text(slot) => *slot = value,
            Target::Bool(slot) => *slot = convert(de::parse_bool(&value), env, value, Kind::Boolean)?,
            Target::I8(slot) => *slot = convert(de::parse_signed(&value), env, value, Kind::Integer)?,
            Target::I16(slot) => *slot = convert(de::parse_signed(&value), env, value, Kind::Integer)?,
            Target::I32(slot) => *slot = convert(de::parse_signed(&value), env, value, Kind::Integer)?,
            Target::I64(slot) => *slot = convert(de::parse_signed(&value), env, value, Kind::Integer)?,
            Target::Isize(slot) => *slot = convert(de::parse_signed(&value), env, value, Kind::Integer)?,
            Target::U8(slot) => *slot = convert(de::parse_unsigned(&value), env, value, Kind::Unsigned)?,
            Target::U16(slot) => *slot = convert(de::parse_unsigned(&value), env, value, Kind::Unsigned)?,
            Target::U32(slot) => *slot = convert(de::parse_unsigned(&value), env, value, Kind::Unsigned)?,
            Target::U64(slot) => *slot = convert(de::parse_unsigned(&value), env, value, Kind::Unsigned)?,
            Target::Usize(slot) => *slot = convert(de::parse_unsigned(&value), env, value, Kind::Unsigned)?,
            Target::F32(slot) => *slot = convert(de::parse_float(&value), env, value, Kind::Float)?,
            Target::F64(slot) => *slot = convert(de::parse_float(&value), env, value, Kind::Float)?,
            other @ (Target::Record(_) | Target::Unsupported(_)) => {
                return Err(BindError::UnsupportedType {
                    field: path.to_string(),
                    kind: other.kind(),
                });
            }
        }
        Ok(())
    }
}

/// Bind environment variables to `target` using a default [`Binder`].
///
/// Timestamp fields fail with `MissingTimeFormat` since no format is set;
/// use [`Binder::with_time_format`] for records that have them.
pub fn bind<T>(target: &mut T) -> Result<(), BindError>
where
    T: EnvValue + ?Sized,
{
    Binder::new().bind(target)
}

fn parse_duration(env: &str, value: &str) -> Result<i64, BindError> {
    duration::parse(value).map_err(|source| BindError::InvalidDuration {
        env: env.to_string(),
        value: value.to_string(),
        source,
    })
}

/// Primitive conversion failures, mapped onto their error variants.
enum Kind {
    Boolean,
    Integer,
    Unsigned,
    Float,
}

fn convert<T>(parsed: Option<T>, env: &str, value: String, kind: Kind) -> Result<T, BindError> {
    parsed.ok_or_else(|| {
        let env = env.to_string();
        match kind {
            Kind::Boolean => BindError::InvalidBoolean { env, value },
            Kind::Integer => BindError::InvalidInteger { env, value },
            Kind::Unsigned => BindError::InvalidUnsignedInteger { env, value },
            Kind::Float => BindError::InvalidFloat { env, value },
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Field;
    use serial_test::serial;
    use std::env;

    // Hand-written equivalent of what `#[derive(EnvTag)]` generates.
    #[derive(Debug, Default)]
    struct Inner {
        level: u8,
    }

    impl Record for Inner {
        fn fields(&mut self) -> Vec<Field<'_>> {
            vec![Field::new("level", Some("ENVTAG_BINDER_LEVEL"), &mut self.level)]
        }
    }

    impl EnvValue for Inner {
        fn target(&mut self) -> Target<'_> {
            Target::Record(self)
        }
    }

    #[derive(Debug, Default)]
    struct Outer {
        name: String,
        untagged: String,
        inner: Inner,
        tags: Vec<String>,
    }

    impl Record for Outer {
        fn fields(&mut self) -> Vec<Field<'_>> {
            vec![
                Field::new("name", Some("ENVTAG_BINDER_NAME"), &mut self.name),
                Field::new("untagged", None, &mut self.untagged),
                Field::new("inner", None, &mut self.inner),
                Field::new("tags", Some("ENVTAG_BINDER_TAGS"), &mut self.tags),
            ]
        }
    }

    impl EnvValue for Outer {
        fn target(&mut self) -> Target<'_> {
            Target::Record(self)
        }
    }

    fn clear() {
        for name in ["ENVTAG_BINDER_NAME", "ENVTAG_BINDER_LEVEL", "ENVTAG_BINDER_TAGS"] {
            env::remove_var(name);
        }
    }

    #[test]
    #[serial]
    fn test_bind_walks_nested_records() {
        clear();
        env::set_var("ENVTAG_BINDER_NAME", "svc");
        env::set_var("ENVTAG_BINDER_LEVEL", "3");

        let mut outer = Outer {
            untagged: "kept".to_string(),
            ..Outer::default()
        };
        Binder::new().bind(&mut outer).unwrap();
        assert_eq!(outer.name, "svc");
        assert_eq!(outer.untagged, "kept");
        assert_eq!(outer.inner.level, 3);
        clear();
    }

    #[test]
    #[serial]
    fn test_unsupported_type_names_field_path() {
        clear();
        env::set_var("ENVTAG_BINDER_TAGS", "a,b");

        let err = bind(&mut Outer::default()).unwrap_err();
        assert!(matches!(
            err,
            BindError::UnsupportedType { ref field, kind: "slice" } if field == "tags"
        ));
        clear();
    }

    #[test]
    #[serial]
    fn test_nested_error_path_aborts() {
        clear();
        env::set_var("ENVTAG_BINDER_NAME", "set-before-error");
        env::set_var("ENVTAG_BINDER_LEVEL", "300");

        let mut outer = Outer::default();
        let err = bind(&mut outer).unwrap_err();
        assert!(matches!(err, BindError::InvalidUnsignedInteger { .. }));
        assert_eq!(err.env(), Some("ENVTAG_BINDER_LEVEL"));
        assert_eq!(err.value(), Some("300"));
        assert_eq!(outer.name, "set-before-error");
        clear();
    }

    #[test]
    fn test_non_record_target_is_rejected() {
        let mut text = String::from("untouched");
        let err = bind(&mut text).unwrap_err();
        assert!(matches!(err, BindError::InvalidTarget { kind: "string" }));
        assert_eq!(text, "untouched");
    }

    #[test]
    fn test_time_format_setters() {
        let mut binder = Binder::new();
        assert_eq!(binder.time_format(), None);
        binder.set_time_format("%Y");
        assert_eq!(binder.time_format(), Some("%Y"));
        assert_eq!(Binder::new().with_time_format("%Y"), binder);
        binder.set_time_format("");
        assert_eq!(binder.time_format(), None);
    }
}
