//! Native side of the bindings: JSON records as bit field hosts.
//!
//! Everything here is plain Rust over `serde_json` types, so it runs (and is tested) without a
//! JavaScript engine. [crate::WasmShape] only converts values across the boundary.

use std::fmt;

use bitfield_attribute::{
    bit_field::BitField,
    errors::{DefineError, ViewError},
    serde::ShapeDef,
    shape::Shape,
};

/// A JavaScript record object, as JSON.
pub type Record = serde_json::Map<String, serde_json::Value>;

#[derive(Debug)]
pub enum Error {
    /// Shape JSON could not be parsed.
    Json(serde_json::Error),
    /// Shape JSON parsed but does not define a valid shape.
    Define(DefineError),
    View(ViewError),
    /// A value crossing the boundary had the wrong type.
    Convert(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Json(e) => write!(f, "invalid shape json: {}", e),
            Error::Define(e) => write!(f, "invalid shape: {}", e),
            Error::View(e) => write!(f, "{}", e),
            Error::Convert(msg) => write!(f, "conversion failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::Json(value)
    }
}

impl From<DefineError> for Error {
    fn from(value: DefineError) -> Self {
        Error::Define(value)
    }
}

impl From<ViewError> for Error {
    fn from(value: ViewError) -> Self {
        Error::View(value)
    }
}

/// Parses and validates a JSON shape definition.
pub fn shape_from_json(shape_json: &str) -> Result<Shape, Error> {
    let def: ShapeDef = serde_json::from_str(shape_json)?;
    Ok(Shape::try_from(def)?)
}

/// Builds a view of `field` in `record` and runs `f` on it. Changes made by `f` are written to
/// `record`.
pub fn with_view<T>(
    shape: &Shape,
    record: &mut Record,
    field: &str,
    f: impl FnOnce(&mut BitField<'_, Record>) -> Result<T, ViewError>,
) -> Result<T, Error> {
    let mut view = BitField::new(shape, record, field)?;
    Ok(f(&mut view)?)
}

#[cfg(test)]
mod tests {
    use bitfield_attribute::value::Update;
    use serde_json::json;

    use super::*;

    fn object(value: serde_json::Value) -> Record {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_shape_from_json() {
        let shape = shape_from_json(r#"{ "bits": ["first", "second", "last"] }"#).unwrap();
        assert_eq!(shape.len(), 3);
    }

    #[test]
    fn test_shape_from_invalid_json() {
        assert!(matches!(shape_from_json("{"), Err(Error::Json(_))));
        assert!(matches!(
            shape_from_json(r#"{ "bits": ["a", "a"] }"#),
            Err(Error::Define(DefineError::DuplicateName(_)))
        ));
    }

    #[test]
    fn test_with_view_reads_and_writes() {
        let shape = shape_from_json(r#"{ "bits": ["first", "second", "last"] }"#).unwrap();
        let mut record = object(json!({ "name": "Artem", "bitfield": 5 }));

        let active = with_view(&shape, &mut record, "bitfield", |view| {
            Ok(view
                .active_names()
                .into_iter()
                .map(str::to_string)
                .collect::<Vec<_>>())
        })
        .unwrap();
        assert_eq!(active, vec!["first", "last"]);

        let update: Update = serde_json::from_value(json!({ "second": "t", "first": 0 })).unwrap();
        with_view(&shape, &mut record, "bitfield", |view| view.update(update)).unwrap();

        assert_eq!(record, object(json!({ "name": "Artem", "bitfield": 6 })));
    }

    #[test]
    fn test_with_view_strict_error() {
        let shape = shape_from_json(r#"{ "bits": ["a"], "strict": true }"#).unwrap();
        let mut record = object(json!({ "bitfield": 2 }));

        let err = with_view(&shape, &mut record, "bitfield", |view| Ok(view.value())).unwrap_err();
        assert_eq!(err.to_string(), "raw value 0x2 has bits outside the defined names");
    }
}
