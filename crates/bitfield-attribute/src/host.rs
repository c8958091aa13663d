//! The contract between a [crate::bit_field::BitField] and the record that owns its integer
//! field.

use std::collections::{BTreeMap, HashMap};

/// A record with named integer-valued fields.
///
/// A bit field reads the raw value once when it is constructed and on [value], and writes the
/// whole raw value back after every change. Durability of the write is the host's business.
///
/// [value]: crate::bit_field::BitField::value
pub trait Host {
    /// Current value of `field` coerced to an integer. Unset fields read as 0.
    fn read_field(&self, field: &str) -> i64;

    fn write_field(&mut self, field: &str, value: i64);
}

impl Host for HashMap<String, i64> {
    fn read_field(&self, field: &str) -> i64 {
        self.get(field).copied().unwrap_or(0)
    }

    fn write_field(&mut self, field: &str, value: i64) {
        self.insert(field.to_string(), value);
    }
}

impl Host for BTreeMap<String, i64> {
    fn read_field(&self, field: &str) -> i64 {
        self.get(field).copied().unwrap_or(0)
    }

    fn write_field(&mut self, field: &str, value: i64) {
        self.insert(field.to_string(), value);
    }
}

impl<H: Host + ?Sized> Host for &mut H {
    fn read_field(&self, field: &str) -> i64 {
        (**self).read_field(field)
    }

    fn write_field(&mut self, field: &str, value: i64) {
        (**self).write_field(field, value)
    }
}

/// JSON objects as records. Values are coerced the way a loosely typed record would:
/// integers as is, floats truncated, numeric strings parsed, `true` as 1, anything else 0.
#[cfg(feature = "serde")]
impl Host for serde_json::Map<String, serde_json::Value> {
    fn read_field(&self, field: &str) -> i64 {
        self.get(field).map_or(0, coerce_json)
    }

    fn write_field(&mut self, field: &str, value: i64) {
        self.insert(field.to_string(), serde_json::Value::from(value));
    }
}

#[cfg(feature = "serde")]
fn coerce_json(value: &serde_json::Value) -> i64 {
    use serde_json::Value;

    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|u| u as i64))
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => coerce_str(s),
        Value::Bool(true) => 1,
        _ => 0,
    }
}

/// Parses the leading integer of `s`, ignoring surrounding whitespace. Strings without one
/// read as 0.
#[cfg(feature = "serde")]
fn coerce_str(s: &str) -> i64 {
    let s = s.trim_start();
    let digits_end = s
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map_or(s.len(), |(i, _)| i);

    s[..digits_end].parse().unwrap_or(0)
}
