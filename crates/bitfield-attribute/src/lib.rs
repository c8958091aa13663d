//! # bitfield-attribute
//!
//! Named boolean flags packed into a single integer field of a host record.
//!
//! Define a [shape::Shape] once: an ordered list of bit names, bit 0 first. Then, on every
//! access, bind it to the integer field of a record with [bit_field::BitField::new]. The view
//! decodes the field, and every change through it is encoded and written back to the record
//! straight away. The record only needs to implement [host::Host].
//!
//! ## Example
//!
//! ```
//! use std::collections::HashMap;
//!
//! use bitfield_attribute::bit_field::BitField;
//! use bitfield_attribute::shape::Shape;
//!
//! let shape = Shape::new(["first", "second", "last"]).unwrap();
//! let mut record = HashMap::from([("bitfield".to_string(), 5_i64)]);
//!
//! let mut view = BitField::new(&shape, &mut record, "bitfield").unwrap();
//! assert_eq!(view.active_names(), vec!["first", "last"]);
//!
//! view.set("second", true).unwrap();
//! assert_eq!(view.value(), 7);
//!
//! view.replace([("second", "1")]).unwrap();
//! assert_eq!(view.value(), 2);
//! ```
//!
//! Shapes known at compile time can be declared with [bit_field!], which generates a typed
//! getter and setter per bit.

pub mod bit_field;
pub mod bits;
pub mod errors;
pub mod host;
mod macros;
#[cfg(feature = "serde")]
pub mod serde;
pub mod shape;
pub mod value;

#[doc(hidden)]
pub mod __private {
    pub use paste::paste;
}
