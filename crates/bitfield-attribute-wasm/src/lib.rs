//! WASM bindings for `bitfield-attribute`.
//!
//! JavaScript keeps its records as plain objects; a [`WasmShape`] reads the named flags out
//! of one integer property of such an object and returns an updated copy after every change.
//!
//! ```text
//! // const shape = new WasmShape(JSON.stringify({ bits: ["first", "second", "last"] }));
//! // let user = { name: "Artem", bitfield: 5 };
//! //
//! // shape.attributes(user, "bitfield");   // { first: true, second: false, last: true }
//! // shape.active(user, "bitfield");       // ["first", "last"]
//! //
//! // user = shape.set(user, "bitfield", "second", true);
//! // user.bitfield;                         // 7
//! //
//! // user = shape.replace(user, "bitfield", { second: "1" });
//! // user.bitfield;                         // 2
//! ```
//!
//! Errors are returned to JavaScript as strings.

mod convert;
pub mod record;

use bitfield_attribute::shape::Shape;
use wasm_bindgen::prelude::*;

use crate::record::Record;

/// A validated shape, usable against any number of records.
#[wasm_bindgen]
pub struct WasmShape {
    shape: Shape,
}

#[wasm_bindgen]
impl WasmShape {
    /// Creates a shape from a JSON definition:
    /// `{ "bits": [...], "width"?: number, "strict"?: boolean }`.
    #[wasm_bindgen(constructor)]
    pub fn new(shape_json: &str) -> Result<WasmShape, JsValue> {
        let shape = record::shape_from_json(shape_json).map_err(convert::error_to_js)?;
        Ok(WasmShape { shape })
    }

    /// Bit names, least significant bit first.
    pub fn names(&self) -> Result<JsValue, JsValue> {
        convert::to_js(self.shape.names())
    }

    /// Object of flag name to bool.
    pub fn attributes(&self, record: JsValue, field: &str) -> Result<JsValue, JsValue> {
        let mut record = convert::record_from_js(record)?;
        record::with_view(&self.shape, &mut record, field, |view| {
            Ok(convert::to_js(&view.attributes()))
        })
        .map_err(convert::error_to_js)?
    }

    /// Names of the set flags.
    pub fn active(&self, record: JsValue, field: &str) -> Result<JsValue, JsValue> {
        let mut record = convert::record_from_js(record)?;
        let names = record::with_view(&self.shape, &mut record, field, |view| {
            Ok(view
                .active_names()
                .into_iter()
                .map(str::to_string)
                .collect::<Vec<_>>())
        })
        .map_err(convert::error_to_js)?;

        convert::to_js(&names)
    }

    /// Raw value of the field, coerced to an integer.
    pub fn value(&self, record: JsValue, field: &str) -> Result<JsValue, JsValue> {
        let mut record = convert::record_from_js(record)?;
        let value = record::with_view(&self.shape, &mut record, field, |view| Ok(view.value()))
            .map_err(convert::error_to_js)?;

        convert::to_js(&value)
    }

    /// Sets one flag; returns the updated record.
    pub fn set(
        &self,
        record: JsValue,
        field: &str,
        name: &str,
        value: bool,
    ) -> Result<JsValue, JsValue> {
        self.modify(record, |shape, record| {
            record::with_view(shape, record, field, |view| view.set(name, value))
        })
    }

    /// Partial update from a number or an object of flag values; returns the updated record.
    pub fn update(&self, record: JsValue, field: &str, input: JsValue) -> Result<JsValue, JsValue> {
        let update = convert::update_from_js(input)?;
        self.modify(record, |shape, record| {
            record::with_view(shape, record, field, |view| view.update(update))
        })
    }

    /// Full replace: flags missing from `input` are cleared. Returns the updated record.
    pub fn replace(&self, record: JsValue, field: &str, input: JsValue) -> Result<JsValue, JsValue> {
        let update = convert::update_from_js(input)?;
        self.modify(record, |shape, record| {
            record::with_view(shape, record, field, |view| view.replace(update))
        })
    }
}

impl WasmShape {
    fn modify(
        &self,
        record: JsValue,
        f: impl FnOnce(&Shape, &mut Record) -> Result<(), record::Error>,
    ) -> Result<JsValue, JsValue> {
        let mut record = convert::record_from_js(record)?;
        f(&self.shape, &mut record).map_err(convert::error_to_js)?;
        convert::to_js(&record)
    }
}
