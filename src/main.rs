//! Lomi Crowdfunding Landing Page
//!
//! Marketing page with an embedded wallet connection widget in the navbar.

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

mod app;
mod components;
mod pages;
mod services;
mod session;
mod state;
mod utils;

use app::App;

#[wasm_bindgen(start)]
pub fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Initialize logger
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("lomi landing page starting...");

    // Mount the Leptos app
    leptos::mount::mount_to_body(|| view! { <App/> });
}
