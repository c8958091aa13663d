use serde::Serialize;
use wasm_bindgen::JsValue;

use crate::record::{Error, Record};

pub fn error_to_js<E: std::fmt::Display>(e: E) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Reads a JavaScript object into a [Record].
pub fn record_from_js(record: JsValue) -> Result<Record, JsValue> {
    serde_wasm_bindgen::from_value(record)
        .map_err(|e| error_to_js(Error::Convert(e.to_string())))
}

/// Reads a bulk update: a number, or an object of flag values.
pub fn update_from_js(
    input: JsValue,
) -> Result<bitfield_attribute::value::Update, JsValue> {
    serde_wasm_bindgen::from_value(input)
        .map_err(|e| error_to_js(Error::Convert(e.to_string())))
}

/// Converts to a plain JavaScript value; maps become objects, not `Map`s.
pub fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| error_to_js(Error::Convert(e.to_string())))
}
