//! Mail Triage Web App (Leptos + WASM)

mod app;
mod components;
mod api;
pub mod logging;
pub mod platform;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    logging::init(tracing::Level::INFO);
    leptos::mount::mount_to_body(app::App);
}
