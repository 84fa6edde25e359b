//! Field model shared by the binder and the derive macro
//!
//! `#[derive(EnvTag)]` implements [`Record`] for a struct, listing each field with
//! its optional environment variable name. Every field type implements
//! [`EnvValue`], which exposes the field as a typed [`Target`] the binder can
//! assign into.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta, Utc};
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

/// A struct whose fields can be bound from environment variables.
///
/// Record types must not contain themselves, directly or through other records.
pub trait Record {
    /// Fields in declaration order. Fields marked `#[env(skip)]` are omitted.
    fn fields(&mut self) -> Vec<Field<'_>>;
}

/// One field of a [`Record`].
pub struct Field<'a> {
    name: &'static str,
    env: Option<&'static str>,
    value: &'a mut dyn EnvValue,
}

impl<'a> Field<'a> {
    #[doc(hidden)]
    pub fn new(name: &'static str, env: Option<&'static str>, value: &'a mut dyn EnvValue) -> Self {
        Self { name, env, value }
    }

    /// Field name as declared in the struct.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Environment variable bound to this field. An empty name counts as none.
    pub fn env(&self) -> Option<&'static str> {
        self.env.filter(|name| !name.is_empty())
    }

    #[doc(hidden)]
    pub fn into_target(self) -> Target<'a> {
        let Self { value, .. } = self;
        value.target()
    }
}

/// Mutable, typed view of a field.
pub enum Target<'a> {
    Text(&'a mut String),
    Bool(&'a mut bool),
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    Isize(&'a mut isize),
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    Usize(&'a mut usize),
    F32(&'a mut f32),
    F64(&'a mut f64),
    /// Signed span of nanoseconds.
    Duration(&'a mut TimeDelta),
    /// Unsigned span; negative durations are rejected.
    StdDuration(&'a mut std::time::Duration),
    Timestamp(Timestamp<'a>),
    /// Nested record, walked recursively.
    Record(&'a mut dyn Record),
    /// A type the binder cannot convert into, named by its kind.
    Unsupported(&'static str),
}

/// Timestamp types accepted by the binder.
pub enum Timestamp<'a> {
    Utc(&'a mut DateTime<Utc>),
    Fixed(&'a mut DateTime<FixedOffset>),
    /// Receives the wall-clock time as written.
    Naive(&'a mut NaiveDateTime),
}

impl Target<'_> {
    /// Short name of the target's kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "string",
            Self::Bool(_) => "bool",
            Self::I8(_) => "i8",
            Self::I16(_) => "i16",
            Self::I32(_) => "i32",
            Self::I64(_) => "i64",
            Self::Isize(_) => "isize",
            Self::U8(_) => "u8",
            Self::U16(_) => "u16",
            Self::U32(_) => "u32",
            Self::U64(_) => "u64",
            Self::Usize(_) => "usize",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
            Self::Duration(_) | Self::StdDuration(_) => "duration",
            Self::Timestamp(_) => "timestamp",
            Self::Record(_) => "struct",
            Self::Unsupported(kind) => *kind,
        }
    }
}

/// A type that can appear as a field of a [`Record`].
///
/// Implemented for strings, booleans, integers, floats, durations and
/// timestamps, and by `#[derive(EnvTag)]` for records. Containers and pointers
/// implement it as [`Target::Unsupported`] so that unannotated fields of those
/// types are allowed, while binding one from the environment fails at run time.
pub trait EnvValue {
    fn target(&mut self) -> Target<'_>;
}

macro_rules! impl_env_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl EnvValue for $ty {
                fn target(&mut self) -> Target<'_> {
                    Target::$variant(self)
                }
            }
        )*
    };
}

impl_env_value! {
    String => Text,
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    TimeDelta => Duration,
    std::time::Duration => StdDuration,
}

impl EnvValue for DateTime<Utc> {
    fn target(&mut self) -> Target<'_> {
        Target::Timestamp(Timestamp::Utc(self))
    }
}

impl EnvValue for DateTime<FixedOffset> {
    fn target(&mut self) -> Target<'_> {
        Target::Timestamp(Timestamp::Fixed(self))
    }
}

impl EnvValue for NaiveDateTime {
    fn target(&mut self) -> Target<'_> {
        Target::Timestamp(Timestamp::Naive(self))
    }
}

macro_rules! impl_unsupported {
    ($($kind:literal => [$($ty:ty),*]),* $(,)?) => {
        $($(
            impl<T> EnvValue for $ty {
                fn target(&mut self) -> Target<'_> {
                    Target::Unsupported($kind)
                }
            }
        )*)*
    };
}

impl_unsupported! {
    "slice" => [Vec<T>, VecDeque<T>],
    "set" => [HashSet<T>],
    "option" => [Option<T>],
    "pointer" => [Box<T>, Rc<T>, Arc<T>],
}

impl<K, V, S> EnvValue for HashMap<K, V, S> {
    fn target(&mut self) -> Target<'_> {
        Target::Unsupported("map")
    }
}

impl<K, V> EnvValue for BTreeMap<K, V> {
    fn target(&mut self) -> Target<'_> {
        Target::Unsupported("map")
    }
}

impl<T, const N: usize> EnvValue for [T; N] {
    fn target(&mut self) -> Target<'_> {
        Target::Unsupported("array")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_targets() {
        assert_eq!(String::new().target().kind(), "string");
        assert_eq!(0u16.target().kind(), "u16");
        assert_eq!(0isize.target().kind(), "isize");
        assert_eq!(TimeDelta::zero().target().kind(), "duration");
        assert_eq!(Utc::now().target().kind(), "timestamp");
    }

    #[test]
    fn test_unsupported_targets() {
        assert_eq!(Vec::<u8>::new().target().kind(), "slice");
        assert_eq!(None::<String>.target().kind(), "option");
        assert_eq!(HashMap::<String, String>::new().target().kind(), "map");
        assert_eq!(Box::new(1u8).target().kind(), "pointer");
        assert_eq!([0u8; 4].target().kind(), "array");
    }

    #[test]
    fn test_field_empty_env_is_none() {
        let mut value = String::new();
        let field = Field::new("value", Some(""), &mut value);
        assert_eq!(field.env(), None);
        let field = Field::new("value", Some("VALUE"), &mut value);
        assert_eq!(field.env(), Some("VALUE"));
        assert_eq!(field.name(), "value");
    }

    #[test]
    fn test_field_into_target_writes_through() {
        let mut value = 0i32;
        if let Target::I32(slot) = Field::new("value", None, &mut value).into_target() {
            *slot = 7;
        }
        assert_eq!(value, 7);
    }
}
