//! WebAssembly bindings for the Sharenote planner.
//!
//! This crate provides JavaScript-accessible APIs for:
//! - Parsing note labels and hashrate strings
//! - Estimating the hashrate bill for a note
//! - Planning the best note for a rig's measured hashrate

use wasm_bindgen::prelude::*;

pub mod planner;
pub mod view;

/// Initialize the WASM module with better panic messages.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
