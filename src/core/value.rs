use std::borrow::Cow;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;

use crate::core::js_expr::JsExpr;
use crate::core::primitives::{datetime_to_unix_millis, decimal_to_number};
use crate::core::text::normalize_utf8;

/// Terminal option value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Scalar {
    /// Builds a string scalar from bytes of unknown encoding.
    #[must_use]
    pub fn text_from_bytes(bytes: &[u8]) -> Self {
        Self::Str(normalize_utf8(bytes).into_owned())
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// Plain nested option structure.
///
/// This is both the input accepted by tree builders and the shape returned by
/// [`OptionNode::value`](crate::core::OptionNode::value). Raw expressions stay
/// as [`OptionValue::Expr`] until the renderer substitutes them.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Scalar(Scalar),
    Expr(JsExpr),
    Array(Vec<OptionValue>),
    Object(IndexMap<String, OptionValue>),
}

impl OptionValue {
    pub const NULL: Self = Self::Scalar(Scalar::Null);

    #[must_use]
    pub fn text_from_bytes(bytes: &[u8]) -> Self {
        Self::Scalar(Scalar::text_from_bytes(bytes))
    }

    #[must_use]
    pub fn object() -> Self {
        Self::Object(IndexMap::new())
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Scalar(Scalar::Null))
    }

    #[must_use]
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Array(_) | Self::Object(_))
    }

    /// Adds `key: value` to an object value, turning any other value into an object first.
    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        if !matches!(self, Self::Object(_)) {
            self = Self::object();
        }
        if let Self::Object(entries) = &mut self {
            entries.insert(key.into(), value.into());
        }
        self
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(Scalar::Str(text)) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[OptionValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&IndexMap<String, OptionValue>> {
        match self {
            Self::Object(entries) => Some(entries),
            _ => None,
        }
    }
}

impl Default for OptionValue {
    fn default() -> Self {
        Self::NULL
    }
}

impl From<Scalar> for OptionValue {
    fn from(value: Scalar) -> Self {
        Self::Scalar(value)
    }
}

impl From<JsExpr> for OptionValue {
    fn from(value: JsExpr) -> Self {
        Self::Expr(value)
    }
}

impl From<()> for OptionValue {
    fn from((): ()) -> Self {
        Self::NULL
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Scalar(Scalar::Bool(value))
    }
}

macro_rules! impl_from_lossless_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for OptionValue {
                fn from(value: $ty) -> Self {
                    Self::Scalar(Scalar::Int(i64::from(value)))
                }
            }
        )*
    };
}

impl_from_lossless_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_from_wide_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for OptionValue {
                fn from(value: $ty) -> Self {
                    match i64::try_from(value) {
                        Ok(int) => Self::Scalar(Scalar::Int(int)),
                        Err(_) => Self::Scalar(Scalar::Float(value as f64)),
                    }
                }
            }
        )*
    };
}

impl_from_wide_int!(u64, usize, isize);

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        Self::Scalar(Scalar::Float(value))
    }
}

impl From<f32> for OptionValue {
    fn from(value: f32) -> Self {
        Self::Scalar(Scalar::Float(f64::from(value)))
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Scalar(Scalar::Str(value.to_owned()))
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Scalar(Scalar::Str(value))
    }
}

impl From<&String> for OptionValue {
    fn from(value: &String) -> Self {
        Self::Scalar(Scalar::Str(value.clone()))
    }
}

impl From<Cow<'_, str>> for OptionValue {
    fn from(value: Cow<'_, str>) -> Self {
        Self::Scalar(Scalar::Str(value.into_owned()))
    }
}

/// Timestamps become epoch milliseconds, the unit used for datetime axes.
impl From<DateTime<Utc>> for OptionValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Scalar(Scalar::Int(datetime_to_unix_millis(value)))
    }
}

impl From<Decimal> for OptionValue {
    fn from(value: Decimal) -> Self {
        Self::Scalar(decimal_to_number(value))
    }
}

impl<T: Into<OptionValue>> From<Option<T>> for OptionValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::NULL, Into::into)
    }
}

impl<T: Into<OptionValue>> From<Vec<T>> for OptionValue {
    fn from(values: Vec<T>) -> Self {
        Self::Array(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<OptionValue>, const N: usize> From<[T; N]> for OptionValue {
    fn from(values: [T; N]) -> Self {
        Self::Array(values.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<OptionValue>> From<IndexMap<K, V>> for OptionValue {
    fn from(entries: IndexMap<K, V>) -> Self {
        Self::Object(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<OptionValue>> FromIterator<(K, V)> for OptionValue {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Object(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl From<serde_json::Value> for OptionValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::NULL,
            serde_json::Value::Bool(flag) => Self::Scalar(Scalar::Bool(flag)),
            serde_json::Value::Number(number) => match number.as_i64() {
                Some(int) => Self::Scalar(Scalar::Int(int)),
                None => Self::Scalar(Scalar::Float(number.as_f64().unwrap_or(f64::NAN))),
            },
            serde_json::Value::String(text) => Self::Scalar(Scalar::Str(text)),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(entries) => Self::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}
