//! BitField: a named-flag view over one integer field of a host record.
//!
//! A view decodes the host field once, when it is constructed, and writes the whole raw value
//! back after every change. Build a new view for every access; a view never sees writes made
//! to the host by anyone else after it was built.

use std::fmt;

use log::{debug, trace};

use crate::{
    bits,
    errors::ViewError,
    host::Host,
    shape::{RangePolicy, Shape},
    value::Update,
};

/// Named boolean flags packed into `field` of `host`, laid out by `shape`.
pub struct BitField<'a, H: Host + ?Sized> {
    shape: &'a Shape,
    host: &'a mut H,
    field: &'a str,
    /// One entry per shape name, in shape order.
    values: Vec<bool>,
}

impl<'a, H: Host + ?Sized> BitField<'a, H> {
    /// Binds `shape` to `field` of `host` and decodes its current value.
    ///
    /// Only fails for strict shapes, when the raw value has bits set beyond the defined names.
    pub fn new(shape: &'a Shape, host: &'a mut H, field: &'a str) -> Result<Self, ViewError> {
        let raw = host.read_field(field);
        check_range(shape, raw)?;

        let values = bits::decode(raw, shape.len());
        trace!("decoded {} = {:#x} into {:?}", field, raw, values);

        Ok(Self {
            shape,
            host,
            field,
            values,
        })
    }

    pub fn shape(&self) -> &Shape {
        self.shape
    }

    /// Name of the host field this view is bound to.
    pub fn field(&self) -> &str {
        self.field
    }

    /// Cached flag for `name`, or `None` if `name` is not part of the shape.
    pub fn get(&self, name: &str) -> Option<bool> {
        self.shape.index_of(name).map(|index| self.values[index])
    }

    /// Cached flag at bit `index`. Indices beyond the shape read as false.
    pub fn is_set_at(&self, index: usize) -> bool {
        self.values.get(index).copied().unwrap_or(false)
    }

    /// Sets flag `name` and writes the encoded value to the host.
    pub fn set(&mut self, name: &str, value: bool) -> Result<(), ViewError> {
        let index = self
            .shape
            .index_of(name)
            .ok_or_else(|| ViewError::UnknownBit(name.to_string()))?;

        self.set_at(index, value);
        Ok(())
    }

    /// Sets the flag at bit `index` and writes the encoded value to the host. Indices beyond
    /// the shape are ignored and nothing is written.
    pub fn set_at(&mut self, index: usize, value: bool) {
        let Some(slot) = self.values.get_mut(index) else {
            return;
        };

        *slot = value;
        self.write_bits();
    }

    /// Partial update: flags named in `update` are set, every other flag keeps its value.
    /// Names outside the shape are ignored. A raw integer is written to the host as is and
    /// leaves the cached flags untouched until the next view is built.
    pub fn update(&mut self, update: impl Into<Update>) -> Result<(), ViewError> {
        match update.into() {
            Update::Raw(raw) => {
                check_range(self.shape, raw)?;
                self.write_raw(raw);
            }
            Update::Flags(flags) => {
                for (name, value) in &flags {
                    match self.shape.index_of(name) {
                        Some(index) => self.values[index] = value.is_true(),
                        None => trace!("ignoring unknown bit {:?} for {}", name, self.field),
                    }
                }

                self.write_bits();
            }
        }

        Ok(())
    }

    /// Full replace: every flag is cleared, then `update` is applied as in [BitField::update].
    pub fn replace(&mut self, update: impl Into<Update>) -> Result<(), ViewError> {
        let update = update.into();
        if let Update::Raw(raw) = update {
            check_range(self.shape, raw)?;
        }

        self.values.fill(false);
        self.update(update)
    }

    /// Read-only view of the cached flags.
    pub fn attributes(&self) -> Attributes<'_> {
        Attributes {
            names: self.shape.names(),
            values: &self.values,
        }
    }

    /// Names of the set flags, in shape order.
    pub fn active_names(&self) -> Vec<&str> {
        self.attributes()
            .iter()
            .filter_map(|(name, value)| value.then_some(name))
            .collect()
    }

    /// Current raw value of the host field. May differ from [BitField::encode] after a raw
    /// update, or when the host held bits beyond the shape.
    pub fn value(&self) -> i64 {
        self.host.read_field(self.field)
    }

    /// Raw value the cached flags encode to. Bits beyond the shape are always zero.
    pub fn encode(&self) -> i64 {
        bits::encode(&self.values)
    }

    fn write_bits(&mut self) {
        let raw = self.encode();
        self.write_raw(raw);
    }

    fn write_raw(&mut self, raw: i64) {
        trace!("writing {} = {:#x}", self.field, raw);
        self.host.write_field(self.field, raw);
    }
}

impl<H: Host + ?Sized> fmt::Debug for BitField<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitField")
            .field("field", &self.field)
            .field("attributes", &self.attributes())
            .finish()
    }
}

fn check_range(shape: &Shape, raw: i64) -> Result<(), ViewError> {
    if shape.policy() == RangePolicy::Reject && bits::has_bits_above(raw, shape.len()) {
        debug!(
            "rejecting {:#x}: bits beyond the {} defined names",
            raw,
            shape.len()
        );
        return Err(ViewError::OutOfRange(raw));
    }

    Ok(())
}

/// Borrowed, read-only snapshot of a view's cached flags, in shape order.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Attributes<'a> {
    names: &'a [String],
    values: &'a [bool],
}

impl<'a> Attributes<'a> {
    pub fn get(&self, name: &str) -> Option<bool> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|index| self.values[index])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, bool)> + use<'a> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl fmt::Debug for Attributes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
