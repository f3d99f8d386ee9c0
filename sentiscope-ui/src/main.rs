//! Sentiscope Dashboard
//!
//! Interactive sentiment-analysis dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - Loads every configured analysis document concurrently at startup,
//!   with bounded per-source retries
//! - One active dataset synchronized across all chart widgets
//! - Destroy-before-create widget lifecycle on every dataset switch
//! - Client-side JSON export of the active dataset
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles
//! to WebAssembly. All data shaping lives in the `sentiscope` core crate;
//! this crate only fetches, reacts and draws.

use leptos::*;

mod app;
mod components;
mod net;
mod render;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
