//! Shape: the fixed, ordered set of bit names shared by every view of one kind of field.

use std::{collections::HashSet, sync::OnceLock};

use log::{debug, warn};

use crate::errors::DefineError;

/// Integer width used when a shape does not specify one.
pub const DEFAULT_WIDTH: u32 = 32;

/// Widest integer a shape can pack into.
pub const MAX_WIDTH: u32 = 64;

/// What a view does with raw values that have bits set beyond the defined names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangePolicy {
    /// Ignore them on decode; the next encode from the cached flags clears them.
    #[default]
    Truncate,
    /// Fail with [crate::errors::ViewError::OutOfRange].
    Reject,
}

/// An ordered list of distinct bit names. Bit position is the index of the name, LSB first.
///
/// Use [Shape::new] or [Shape::with_width] to build one, then bind it to a host field with
/// [crate::bit_field::BitField::new].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    names: Vec<String>,
    width: u32,
    policy: RangePolicy,
}

impl Shape {
    /// Defines a shape packed into a [DEFAULT_WIDTH]-bit integer.
    pub fn new<I, S>(names: I) -> Result<Self, DefineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_width(names, DEFAULT_WIDTH)
    }

    /// Defines a shape packed into a `width`-bit integer. Fails if `width` is not in
    /// `1..=MAX_WIDTH`, if any name is empty or repeated, or if there are more names than bits.
    pub fn with_width<I, S>(names: I, width: u32) -> Result<Self, DefineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if width == 0 || width > MAX_WIDTH {
            return Err(DefineError::InvalidWidth(width));
        }

        let names: Vec<String> = names.into_iter().map(Into::into).collect();

        let mut seen = HashSet::with_capacity(names.len());
        for name in &names {
            if name.trim().is_empty() {
                return Err(DefineError::EmptyName);
            }

            if !seen.insert(name.as_str()) {
                return Err(DefineError::DuplicateName(name.clone()));
            }
        }

        if names.len() > width as usize {
            return Err(DefineError::TooManyNames {
                count: names.len(),
                width,
            });
        }

        debug!("defined {}-bit shape with bits {:?}", width, names);

        Ok(Self {
            names,
            width,
            policy: RangePolicy::Truncate,
        })
    }

    /// Switches the shape to [RangePolicy::Reject].
    pub fn strict(self) -> Self {
        self.with_policy(RangePolicy::Reject)
    }

    pub fn with_policy(mut self, policy: RangePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Bit names in definition order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn policy(&self) -> RangePolicy {
        self.policy
    }

    /// Bit position of `name`, if it is part of the shape.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }
}

/// Holds a shape that may be defined exactly once, typically from a `static`.
///
/// ```
/// use bitfield_attribute::shape::ShapeSlot;
///
/// static PERMISSIONS: ShapeSlot = ShapeSlot::new();
///
/// let shape = PERMISSIONS.define(["read", "write"]).unwrap();
/// assert_eq!(shape.index_of("write"), Some(1));
/// assert!(PERMISSIONS.define(["admin"]).is_err());
/// ```
#[derive(Debug, Default)]
pub struct ShapeSlot {
    shape: OnceLock<Shape>,
}

impl ShapeSlot {
    pub const fn new() -> Self {
        Self {
            shape: OnceLock::new(),
        }
    }

    /// Defines the slot's shape with [DEFAULT_WIDTH]. See [ShapeSlot::define_shape].
    pub fn define<I, S>(&self, names: I) -> Result<&Shape, DefineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.define_with_width(names, DEFAULT_WIDTH)
    }

    pub fn define_with_width<I, S>(&self, names: I, width: u32) -> Result<&Shape, DefineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ensure_undefined()?;
        self.define_shape(Shape::with_width(names, width)?)
    }

    /// Stores `shape` in the slot. Fails with [DefineError::AlreadyDefined] if the slot was
    /// already defined, leaving the existing shape in place.
    pub fn define_shape(&self, shape: Shape) -> Result<&Shape, DefineError> {
        self.ensure_undefined()?;

        if self.shape.set(shape).is_err() {
            warn!("shape slot defined concurrently, keeping the first definition");
            return Err(DefineError::AlreadyDefined);
        }

        self.shape.get().ok_or(DefineError::AlreadyDefined)
    }

    /// The defined shape, if any.
    pub fn get(&self) -> Option<&Shape> {
        self.shape.get()
    }

    pub fn is_defined(&self) -> bool {
        self.shape.get().is_some()
    }

    fn ensure_undefined(&self) -> Result<(), DefineError> {
        if self.is_defined() {
            warn!("attempted to redefine an already defined shape");
            return Err(DefineError::AlreadyDefined);
        }

        Ok(())
    }
}
