//! Input values for bulk updates and the rules for reading them as booleans.

use std::collections::{BTreeMap, HashMap};

/// String tokens read as `true`. Everything else is `false`.
pub const TRUE_STRINGS: &[&str] = &["1", "t", "T", "true", "TRUE", "on", "ON"];

/// A loosely typed flag value, as it arrives from a form, a JSON document or a database driver.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum FlagValue {
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
}

impl FlagValue {
    /// Only `true`, `1` and the strings in [TRUE_STRINGS] are true.
    pub fn is_true(&self) -> bool {
        match self {
            FlagValue::Bool(b) => *b,
            FlagValue::Int(i) => *i == 1,
            FlagValue::Str(s) => TRUE_STRINGS.contains(&s.as_str()),
            FlagValue::Null => false,
        }
    }
}

impl From<bool> for FlagValue {
    fn from(value: bool) -> Self {
        FlagValue::Bool(value)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FlagValue {
                fn from(value: $ty) -> Self {
                    FlagValue::Int(value as i64)
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<&str> for FlagValue {
    fn from(value: &str) -> Self {
        FlagValue::Str(value.to_string())
    }
}

impl From<String> for FlagValue {
    fn from(value: String) -> Self {
        FlagValue::Str(value)
    }
}

impl<T: Into<FlagValue>> From<Option<T>> for FlagValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FlagValue::Null, Into::into)
    }
}

/// Input to [crate::bit_field::BitField::update] and [crate::bit_field::BitField::replace].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "crate::serde::UpdateDef"))]
pub enum Update {
    /// Written to the host field as is.
    Raw(i64),
    /// Flag name to value. Names outside the shape are ignored.
    Flags(Vec<(String, FlagValue)>),
}

impl Update {
    /// Builds a [Update::Flags] from name/value pairs.
    pub fn flags<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FlagValue>,
    {
        Update::Flags(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<i64> for Update {
    fn from(value: i64) -> Self {
        Update::Raw(value)
    }
}

impl From<i32> for Update {
    fn from(value: i32) -> Self {
        Update::Raw(value as i64)
    }
}

impl<K: Into<String>, V: Into<FlagValue>> From<BTreeMap<K, V>> for Update {
    fn from(value: BTreeMap<K, V>) -> Self {
        Update::flags(value)
    }
}

impl<K: Into<String>, V: Into<FlagValue>> From<HashMap<K, V>> for Update {
    fn from(value: HashMap<K, V>) -> Self {
        Update::flags(value)
    }
}

impl<K: Into<String>, V: Into<FlagValue>, const N: usize> From<[(K, V); N]> for Update {
    fn from(value: [(K, V); N]) -> Self {
        Update::flags(value)
    }
}

impl<K: Into<String>, V: Into<FlagValue>> From<Vec<(K, V)>> for Update {
    fn from(value: Vec<(K, V)>) -> Self {
        Update::flags(value)
    }
}
