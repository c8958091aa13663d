//! JSON-deserializable shape description and update payloads.
//!
//! A shape is usually written next to the record definition it belongs to, for example:
//!
//! ```json
//! { "bits": ["first", "second", "last"], "width": 32, "strict": false }
//! ```
//!
//! Updates are either a raw integer (`5`) or an object of flag values
//! (`{ "first": true, "second": "0", "last": 1 }`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, ser::SerializeMap};

use crate::{
    bit_field::Attributes,
    errors::DefineError,
    shape::{DEFAULT_WIDTH, RangePolicy, Shape},
    value::{FlagValue, Update},
};

/// Top-level shape definition.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ShapeDef {
    /// Bit names, least significant bit first.
    pub bits: Vec<String>,
    /// Integer width; defaults to 32.
    #[serde(default)]
    pub width: Option<u32>,
    /// Reject raw values with bits beyond the defined names instead of dropping them.
    #[serde(default)]
    pub strict: bool,
}

impl TryFrom<ShapeDef> for Shape {
    type Error = DefineError;

    fn try_from(value: ShapeDef) -> Result<Self, Self::Error> {
        let policy = if value.strict {
            RangePolicy::Reject
        } else {
            RangePolicy::Truncate
        };

        Ok(Shape::with_width(value.bits, value.width.unwrap_or(DEFAULT_WIDTH))?.with_policy(policy))
    }
}

impl From<&Shape> for ShapeDef {
    fn from(value: &Shape) -> Self {
        ShapeDef {
            bits: value.names().to_vec(),
            width: Some(value.width()),
            strict: value.policy() == RangePolicy::Reject,
        }
    }
}

/// Wire form of [Update].
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum UpdateDef {
    Raw(i64),
    Flags(BTreeMap<String, FlagValue>),
}

impl From<UpdateDef> for Update {
    fn from(value: UpdateDef) -> Self {
        match value {
            UpdateDef::Raw(raw) => Update::Raw(raw),
            UpdateDef::Flags(flags) => Update::flags(flags),
        }
    }
}

/// Serializes as an object of flag name to bool, in shape order.
impl Serialize for Attributes<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}
