use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A primitive value after numeric-width normalization.
///
/// Native integer widths collapse into the widest representation of their
/// signedness class. The two integer classes are kept apart so that a
/// negative signed number can never alias a large unsigned bit pattern.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    /// Any signed integer, widened to 64 bits.
    Signed(i64),
    /// Any unsigned integer, widened to 64 bits.
    Unsigned(u64),
    /// Any floating point number, widened to 64 bits.
    Float(f64),
    /// A UTF-8 string.
    String(String),
    /// A boolean.
    Bool(bool),
}

impl ScalarValue {
    /// Short name of the scalar class, used in logs and error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Signed(_) => "signed",
            Self::Unsigned(_) => "unsigned",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Bool(_) => "bool",
        }
    }
}

/// The normalized, language-neutral representation of any diffable input.
///
/// Maps are keyed by string and stored in a [`BTreeMap`], so key order
/// never affects equality. Lists are order-sensitive.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Absent value (nil pointer, `None`, JSON `null`).
    #[default]
    Null,
    /// A primitive.
    Scalar(ScalarValue),
    /// An ordered sequence.
    List(Vec<Value>),
    /// A keyed record.
    Map(BTreeMap<String, Value>),
}

/// The top-level shape of a [`Value`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Scalar,
    List,
    Map,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "null",
            Self::Scalar => "scalar",
            Self::List => "list",
            Self::Map => "map",
        };
        f.write_str(name)
    }
}

impl Value {
    /// The kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Scalar(_) => ValueKind::Scalar,
            Self::List(_) => ValueKind::List,
            Self::Map(_) => ValueKind::Map,
        }
    }

    /// Returns `true` if this is [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for lists and maps.
    pub fn is_container(&self) -> bool {
        matches!(self, Self::List(_) | Self::Map(_))
    }

    /// Borrow the scalar payload, if any.
    pub fn as_scalar(&self) -> Option<&ScalarValue> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the list payload, if any.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the map payload, if any.
    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Look up a field of a map value. Returns `None` for non-maps.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|m| m.get(key))
    }

    /// Number of direct children (list items or map entries); zero for leaves.
    pub fn len(&self) -> usize {
        match self {
            Self::List(items) => items.len(),
            Self::Map(entries) => entries.len(),
            Self::Null | Self::Scalar(_) => 0,
        }
    }

    /// Returns `true` if this value has no direct children.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<ScalarValue> for Value {
    fn from(s: ScalarValue) -> Self {
        Self::Scalar(s)
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for Value {
            fn from(n: $t) -> Self {
                Self::Scalar(ScalarValue::Signed(i64::from(n)))
            }
        }
    )*};
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for Value {
            fn from(n: $t) -> Self {
                Self::Scalar(ScalarValue::Unsigned(u64::from(n)))
            }
        }
    )*};
}

impl_from_signed!(i8, i16, i32, i64);
impl_from_unsigned!(u8, u16, u32, u64);

impl From<isize> for Value {
    fn from(n: isize) -> Self {
        // isize is at most 64 bits on every supported target.
        Self::Scalar(ScalarValue::Signed(n as i64))
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Self::Scalar(ScalarValue::Unsigned(n as u64))
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Self::Scalar(ScalarValue::Float(f64::from(n)))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Scalar(ScalarValue::Float(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Scalar(ScalarValue::Bool(b))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Scalar(ScalarValue::String(s.to_owned()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Scalar(ScalarValue::String(s))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<BTreeMap<String, T>> for Value {
    fn from(entries: BTreeMap<String, T>) -> Self {
        Self::Map(entries.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::List(iter.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match json {
            Json::Null => Self::Null,
            Json::Bool(b) => b.into(),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    ScalarValue::Signed(i).into()
                } else if let Some(u) = n.as_u64() {
                    ScalarValue::Unsigned(u).into()
                } else {
                    // Finite by construction: serde_json never holds NaN or infinities.
                    ScalarValue::Float(n.as_f64().unwrap_or_default()).into()
                }
            }
            Json::String(s) => s.into(),
            Json::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Json::Object(entries) => {
                Self::Map(entries.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}
