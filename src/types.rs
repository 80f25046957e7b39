use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde_json::Value as JsonValue;

use crate::error::DbError;

/// Scalar values stored in a row or bound as statement parameters.
///
/// ```rust
/// use storefront_db::prelude::*;
///
/// let params: Vec<RowValues> = vec![1_i64.into(), "alice".into(), true.into()];
/// assert_eq!(params[1].as_text(), Some("alice"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RowValues {
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    Timestamp(NaiveDateTime),
    Null,
    JSON(JsonValue),
    Blob(Vec<u8>),
}

const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"];

impl RowValues {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<&i64> {
        if let RowValues::Int(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let RowValues::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    /// SQLite has no boolean storage class, so `0`/`1` integers read back as booleans too.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            RowValues::Bool(b) => Some(*b),
            RowValues::Int(1) => Some(true),
            RowValues::Int(0) => Some(false),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            RowValues::Timestamp(value) => Some(*value),
            RowValues::Text(s) => TIMESTAMP_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        if let RowValues::Float(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        if let RowValues::Blob(bytes) = self {
            Some(bytes)
        } else {
            None
        }
    }

    /// Lenient integer view used by `count`: `Null` is zero, numeric text is parsed,
    /// floats are truncated.
    #[must_use]
    pub fn to_count(&self) -> Option<i64> {
        match self {
            RowValues::Int(i) => Some(*i),
            RowValues::Null => Some(0),
            #[allow(clippy::cast_possible_truncation)]
            RowValues::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            RowValues::Bool(b) => Some(i64::from(*b)),
            RowValues::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for RowValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowValues::Int(i) => write!(f, "{i}"),
            RowValues::Float(v) => write!(f, "{v}"),
            RowValues::Text(s) => f.write_str(s),
            RowValues::Bool(b) => f.write_str(if *b { "1" } else { "0" }),
            RowValues::Timestamp(dt) => write!(f, "{}", dt.format("%F %T%.f")),
            RowValues::Null => f.write_str("NULL"),
            RowValues::JSON(v) => write!(f, "{v}"),
            RowValues::Blob(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

impl From<i64> for RowValues {
    fn from(v: i64) -> Self {
        RowValues::Int(v)
    }
}

impl From<i32> for RowValues {
    fn from(v: i32) -> Self {
        RowValues::Int(i64::from(v))
    }
}

impl From<f64> for RowValues {
    fn from(v: f64) -> Self {
        RowValues::Float(v)
    }
}

impl From<bool> for RowValues {
    fn from(v: bool) -> Self {
        RowValues::Bool(v)
    }
}

impl From<&str> for RowValues {
    fn from(v: &str) -> Self {
        RowValues::Text(v.to_owned())
    }
}

impl From<String> for RowValues {
    fn from(v: String) -> Self {
        RowValues::Text(v)
    }
}

impl From<NaiveDateTime> for RowValues {
    fn from(v: NaiveDateTime) -> Self {
        RowValues::Timestamp(v)
    }
}

impl From<Vec<u8>> for RowValues {
    fn from(v: Vec<u8>) -> Self {
        RowValues::Blob(v)
    }
}

impl From<JsonValue> for RowValues {
    fn from(v: JsonValue) -> Self {
        RowValues::JSON(v)
    }
}

impl<T: Into<RowValues>> From<Option<T>> for RowValues {
    fn from(v: Option<T>) -> Self {
        v.map_or(RowValues::Null, Into::into)
    }
}

/// One character of a binding type string: `s`, `i`, `d` or `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    Text,
    Integer,
    Double,
    Blob,
}

impl TypeTag {
    /// Parse a single tag character.
    ///
    /// # Errors
    /// Returns `DbError::ParameterError` for any character other than `s`, `i`, `d`, `b`.
    pub fn from_char(c: char) -> Result<Self, DbError> {
        match c {
            's' => Ok(TypeTag::Text),
            'i' => Ok(TypeTag::Integer),
            'd' => Ok(TypeTag::Double),
            'b' => Ok(TypeTag::Blob),
            other => Err(DbError::ParameterError(format!(
                "unknown parameter type tag '{other}'"
            ))),
        }
    }

    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            TypeTag::Text => 's',
            TypeTag::Integer => 'i',
            TypeTag::Double => 'd',
            TypeTag::Blob => 'b',
        }
    }

    /// Coerce a value to this tag's type. `Null` always stays `Null`.
    ///
    /// # Errors
    /// Returns `DbError::ParameterError` when the value has no sensible representation
    /// in the tagged type (e.g. non-numeric text under `i`).
    pub fn coerce(self, value: &RowValues) -> Result<RowValues, DbError> {
        if value.is_null() {
            return Ok(RowValues::Null);
        }
        let coerced = match (self, value) {
            (TypeTag::Text, RowValues::Text(_)) => Some(value.clone()),
            (TypeTag::Text, RowValues::Blob(bytes)) => {
                String::from_utf8(bytes.clone()).ok().map(RowValues::Text)
            }
            (TypeTag::Text, other) => Some(RowValues::Text(other.to_string())),

            (TypeTag::Integer, RowValues::Int(_)) => Some(value.clone()),
            (TypeTag::Integer, RowValues::Bool(b)) => Some(RowValues::Int(i64::from(*b))),
            #[allow(clippy::cast_possible_truncation)]
            (TypeTag::Integer, RowValues::Float(f)) if f.is_finite() => {
                Some(RowValues::Int(f.trunc() as i64))
            }
            (TypeTag::Integer, RowValues::Text(s)) => s.trim().parse().ok().map(RowValues::Int),
            (TypeTag::Integer, RowValues::JSON(v)) => v.as_i64().map(RowValues::Int),

            (TypeTag::Double, RowValues::Float(_)) => Some(value.clone()),
            #[allow(clippy::cast_precision_loss)]
            (TypeTag::Double, RowValues::Int(i)) => Some(RowValues::Float(*i as f64)),
            (TypeTag::Double, RowValues::Bool(b)) => {
                Some(RowValues::Float(if *b { 1.0 } else { 0.0 }))
            }
            (TypeTag::Double, RowValues::Text(s)) => s.trim().parse().ok().map(RowValues::Float),
            (TypeTag::Double, RowValues::JSON(v)) => v.as_f64().map(RowValues::Float),

            (TypeTag::Blob, RowValues::Blob(_)) => Some(value.clone()),
            (TypeTag::Blob, RowValues::Text(s)) => Some(RowValues::Blob(s.as_bytes().to_vec())),

            _ => None,
        };
        coerced.ok_or_else(|| {
            DbError::ParameterError(format!(
                "cannot bind {value:?} as type '{}'",
                self.as_char()
            ))
        })
    }
}

/// How statement parameters are typed at bind time.
///
/// `Native` binds each value with its own type. `Tags` follows a type string such as
/// `"ss"` or `"isd"`, one tag per parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ParamTypes {
    #[default]
    Native,
    Tags(Vec<TypeTag>),
}

impl ParamTypes {
    #[must_use]
    pub fn native() -> Self {
        ParamTypes::Native
    }

    /// The same tag repeated `count` times, e.g. `uniform(TypeTag::Text, 3)` for `"sss"`.
    #[must_use]
    pub fn uniform(tag: TypeTag, count: usize) -> Self {
        ParamTypes::Tags(vec![tag; count])
    }

    /// Apply the tags to `params`, producing the values that will be bound.
    ///
    /// # Errors
    /// Returns `DbError::ParameterError` if the tag count differs from the parameter
    /// count or a value cannot be coerced.
    pub fn apply(&self, params: &[RowValues]) -> Result<Vec<RowValues>, DbError> {
        match self {
            ParamTypes::Native => Ok(params.to_vec()),
            ParamTypes::Tags(tags) => {
                if tags.len() != params.len() {
                    return Err(DbError::ParameterError(format!(
                        "{} type tags supplied for {} parameters",
                        tags.len(),
                        params.len()
                    )));
                }
                tags.iter()
                    .zip(params)
                    .map(|(tag, value)| tag.coerce(value))
                    .collect()
            }
        }
    }
}

impl FromStr for ParamTypes {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(TypeTag::from_char)
            .collect::<Result<Vec<_>, _>>()
            .map(ParamTypes::Tags)
    }
}

impl fmt::Display for ParamTypes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamTypes::Native => f.write_str("native"),
            ParamTypes::Tags(tags) => tags.iter().try_for_each(|t| write!(f, "{}", t.as_char())),
        }
    }
}
