//! JS-facing surface: the `wasm_bindgen` chart handle and mount helper.

pub mod wasm_api;

pub use wasm_api::{ChartApi, mount_chart};
