//! Typed cell values and the scalar field types they coerce into.
//!
//! Decoding runs in two steps: [`parse_typed_value()`] turns a raw cell into a
//! 64-bit wide [`Value`] according to the destination's [`Kind`], then
//! [`Scalar::assign()`] narrows it into the concrete field (`u8`, `i32`, `f32`,
//! ...). Encoding goes through [`Scalar::render()`].

use std::fmt;

use thiserror::Error;

use crate::record::{FieldMut, FieldRef, FieldType};

/// Kind of a declared record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Signed,
    Unsigned,
    Float,
    Boolean,
    /// A nested record; never holds a cell value itself.
    Record,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Signed => "signed integer",
            Kind::Unsigned => "unsigned integer",
            Kind::Float => "float",
            Kind::Boolean => "boolean",
            Kind::Record => "record",
        }
    }

    pub fn is_leaf(&self) -> bool {
        !matches!(self, Kind::Record)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    Boolean(bool),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::String(_) => Kind::String,
            Value::Signed(_) => Kind::Signed,
            Value::Unsigned(_) => Kind::Unsigned,
            Value::Float(_) => Kind::Float,
            Value::Boolean(_) => Kind::Boolean,
        }
    }

    pub fn as_display(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Signed(i) => i.to_string(),
            Value::Unsigned(u) => u.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Boolean(b) => b.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    #[error("failed to parse '{raw}' as {expected}")]
    Invalid { raw: String, expected: Kind },

    #[error("value {value} does not fit in {target}")]
    OutOfRange { value: String, target: &'static str },

    #[error("cannot store a {found} value in a {expected} field")]
    Mismatch { expected: Kind, found: Kind },

    #[error("record fields do not hold cell values")]
    NotScalar,
}

/// Parses a raw cell according to `kind`.
///
/// Empty cells yield `Ok(None)`: the destination field is left untouched.
pub fn parse_typed_value(raw: &str, kind: Kind) -> Result<Option<Value>, ValueError> {
    if raw.is_empty() {
        return Ok(None);
    }
    let invalid = || ValueError::Invalid {
        raw: raw.to_string(),
        expected: kind,
    };
    let parsed = match kind {
        Kind::String => Value::String(raw.to_string()),
        Kind::Signed => Value::Signed(raw.parse().map_err(|_| invalid())?),
        Kind::Unsigned => Value::Unsigned(raw.parse().map_err(|_| invalid())?),
        Kind::Float => Value::Float(raw.parse().map_err(|_| invalid())?),
        Kind::Boolean => Value::Boolean(parse_bool(raw).ok_or_else(invalid)?),
        Kind::Record => return Err(ValueError::NotScalar),
    };
    Ok(Some(parsed))
}

/// Accepts `1`, `t`, `T`, `true`, `TRUE`, `True` and their false
/// counterparts. Anything else, mixed case included, is rejected.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

/// A leaf field the mapper can read from and write into.
pub trait Scalar {
    fn kind(&self) -> Kind;

    fn to_value(&self) -> Value;

    /// Canonical cell text for this field.
    fn render(&self) -> String {
        self.to_value().as_display()
    }

    /// Whether [`assign()`](Scalar::assign) would accept `value`, without
    /// storing it.
    fn check(&self, value: &Value) -> Result<(), ValueError> {
        if value.kind() == self.kind() {
            Ok(())
        } else {
            Err(mismatch(self.kind(), value))
        }
    }

    /// Stores `value`, narrowing it to the field's width.
    fn assign(&mut self, value: Value) -> Result<(), ValueError>;
}

fn mismatch(expected: Kind, found: &Value) -> ValueError {
    ValueError::Mismatch {
        expected,
        found: found.kind(),
    }
}

fn out_of_range(value: impl ToString, target: &'static str) -> ValueError {
    ValueError::OutOfRange {
        value: value.to_string(),
        target,
    }
}

macro_rules! scalar_field_type {
    ($t:ty, $kind:ident) => {
        impl FieldType for $t {
            const KIND: Kind = Kind::$kind;

            fn as_field(&self) -> FieldRef<'_> {
                FieldRef::Scalar(self)
            }

            fn as_field_mut(&mut self) -> FieldMut<'_> {
                FieldMut::Scalar(self)
            }
        }
    };
}

macro_rules! integer_scalar {
    ($kind:ident, $variant:ident, $wide:ty; $($t:ty),+ $(,)?) => {
        $(
            impl Scalar for $t {
                fn kind(&self) -> Kind {
                    Kind::$kind
                }

                fn to_value(&self) -> Value {
                    Value::$variant(*self as $wide)
                }

                fn render(&self) -> String {
                    self.to_string()
                }

                fn check(&self, value: &Value) -> Result<(), ValueError> {
                    match value {
                        Value::$variant(wide) => <$t>::try_from(*wide)
                            .map(|_| ())
                            .map_err(|_| out_of_range(wide, stringify!($t))),
                        other => Err(mismatch(Kind::$kind, other)),
                    }
                }

                fn assign(&mut self, value: Value) -> Result<(), ValueError> {
                    match value {
                        Value::$variant(wide) => {
                            *self = <$t>::try_from(wide)
                                .map_err(|_| out_of_range(wide, stringify!($t)))?;
                            Ok(())
                        }
                        other => Err(mismatch(Kind::$kind, &other)),
                    }
                }
            }

            scalar_field_type!($t, $kind);
        )+
    };
}

integer_scalar!(Signed, Signed, i64; i8, i16, i32, i64, isize);
integer_scalar!(Unsigned, Unsigned, u64; u8, u16, u32, u64, usize);

impl Scalar for f64 {
    fn kind(&self) -> Kind {
        Kind::Float
    }

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }

    fn assign(&mut self, value: Value) -> Result<(), ValueError> {
        match value {
            Value::Float(f) => {
                *self = f;
                Ok(())
            }
            other => Err(mismatch(Kind::Float, &other)),
        }
    }
}

impl Scalar for f32 {
    fn kind(&self) -> Kind {
        Kind::Float
    }

    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }

    // f32 has its own shortest form; widening first would print the f64 expansion.
    fn render(&self) -> String {
        self.to_string()
    }

    fn check(&self, value: &Value) -> Result<(), ValueError> {
        match value {
            Value::Float(f) if f.is_finite() && f.abs() > f64::from(f32::MAX) => {
                Err(out_of_range(f, "f32"))
            }
            Value::Float(_) => Ok(()),
            other => Err(mismatch(Kind::Float, other)),
        }
    }

    fn assign(&mut self, value: Value) -> Result<(), ValueError> {
        self.check(&value)?;
        if let Value::Float(f) = value {
            *self = f as f32;
        }
        Ok(())
    }
}

impl Scalar for bool {
    fn kind(&self) -> Kind {
        Kind::Boolean
    }

    fn to_value(&self) -> Value {
        Value::Boolean(*self)
    }

    fn assign(&mut self, value: Value) -> Result<(), ValueError> {
        match value {
            Value::Boolean(b) => {
                *self = b;
                Ok(())
            }
            other => Err(mismatch(Kind::Boolean, &other)),
        }
    }
}

impl Scalar for String {
    fn kind(&self) -> Kind {
        Kind::String
    }

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }

    fn render(&self) -> String {
        self.clone()
    }

    fn assign(&mut self, value: Value) -> Result<(), ValueError> {
        match value {
            Value::String(s) => {
                *self = s;
                Ok(())
            }
            other => Err(mismatch(Kind::String, &other)),
        }
    }
}

scalar_field_type!(f64, Float);
scalar_field_type!(f32, Float);
scalar_field_type!(bool, Boolean);
scalar_field_type!(String, String);
