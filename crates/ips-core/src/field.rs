//! Tabular cell model shared by records, output backends, and run summaries.
//!
//! Every simulation variant has a fixed column set known at compile time.
//! A record flattens into one `Field` per `Column`, in column order.

use std::fmt;

/// Storage class of a column.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Float,
    Integer,
    Boolean,
}

/// A named, typed column of a record schema.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Column {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl Column {
    pub const fn float(name: &'static str) -> Self {
        Self { name, kind: FieldKind::Float }
    }

    pub const fn integer(name: &'static str) -> Self {
        Self { name, kind: FieldKind::Integer }
    }

    pub const fn boolean(name: &'static str) -> Self {
        Self { name, kind: FieldKind::Boolean }
    }
}

/// One cell value.  `Empty` marks a reading that was not taken this step
/// (e.g. position columns when tracking is off).
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Field {
    Float(f64),
    Integer(i64),
    Boolean(bool),
    Empty,
}

impl Field {
    /// Numeric view used by summaries: booleans count as 0/1.
    pub fn as_f64(self) -> Option<f64> {
        match self {
            Field::Float(v)   => Some(v),
            Field::Integer(v) => Some(v as f64),
            Field::Boolean(b) => Some(if b { 1.0 } else { 0.0 }),
            Field::Empty      => None,
        }
    }

    pub fn as_bool(self) -> Option<bool> {
        match self {
            Field::Boolean(b) => Some(b),
            _ => None,
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        matches!(self, Field::Empty)
    }

    /// The kind this value belongs to, `None` for `Empty`.
    pub fn kind(self) -> Option<FieldKind> {
        match self {
            Field::Float(_)   => Some(FieldKind::Float),
            Field::Integer(_) => Some(FieldKind::Integer),
            Field::Boolean(_) => Some(FieldKind::Boolean),
            Field::Empty      => None,
        }
    }
}

impl<T: Into<Field>> From<Option<T>> for Field {
    fn from(v: Option<T>) -> Self {
        v.map_or(Field::Empty, Into::into)
    }
}

impl From<f64> for Field {
    fn from(v: f64) -> Self {
        Field::Float(v)
    }
}

impl From<i64> for Field {
    fn from(v: i64) -> Self {
        Field::Integer(v)
    }
}

impl From<i32> for Field {
    fn from(v: i32) -> Self {
        Field::Integer(v as i64)
    }
}

impl From<u8> for Field {
    fn from(v: u8) -> Self {
        Field::Integer(v as i64)
    }
}

impl From<bool> for Field {
    fn from(v: bool) -> Self {
        Field::Boolean(v)
    }
}

/// Booleans print as `0`/`1`, empties as an empty string.
impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Float(v)   => write!(f, "{v}"),
            Field::Integer(v) => write!(f, "{v}"),
            Field::Boolean(b) => write!(f, "{}", *b as u8),
            Field::Empty      => Ok(()),
        }
    }
}
