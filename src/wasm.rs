//! WASM bindings for the canvas.
//!
//! Exposes `layout`, `layoutWithDirection` and `layoutWithConfig` to
//! JavaScript via wasm-bindgen. Inputs and outputs are JSON strings.

use wasm_bindgen::prelude::*;

use crate::config::LayoutConfig;

/// Lay out a graph document using its own direction and the default config.
#[wasm_bindgen]
pub fn layout(src: &str) -> Result<String, JsError> {
    crate::layout_json(src, None).map_err(|e| JsError::new(&e.to_string()))
}

/// Lay out a graph document in `direction` ("TB", "BT", "LR", "RL", or
/// empty string for the document's own).
#[wasm_bindgen(js_name = "layoutWithDirection")]
pub fn layout_with_direction(src: &str, direction: &str) -> Result<String, JsError> {
    crate::layout_json(src, non_empty(direction)).map_err(|e| JsError::new(&e.to_string()))
}

/// Lay out a graph document with a JSON config (camelCase keys, every
/// field optional).
#[wasm_bindgen(js_name = "layoutWithConfig")]
pub fn layout_with_config(src: &str, direction: &str, config: &str) -> Result<String, JsError> {
    let config = LayoutConfig::from_json(config).map_err(|e| JsError::new(&e.to_string()))?;
    crate::layout_json_with_config(src, non_empty(direction), &config)
        .map_err(|e| JsError::new(&e.to_string()))
}

fn non_empty(direction: &str) -> Option<&str> {
    if direction.is_empty() {
        None
    } else {
        Some(direction)
    }
}
