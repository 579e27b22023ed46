//! SwipeFeed
//!
//! Infinite swipe feed of games built with Leptos (WASM).
//!
//! # Features
//!
//! - Full-screen game cards (iframe or cover image), appended in batches
//! - Intersection-driven pagination with FIFO pruning of old cards
//! - Up / super up / down votes and notes kept in localStorage
//! - Score relay for embedded games via `postMessage`
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. The pagination, store and relay logic live in the `swipefeed`
//! crate; this crate supplies the browser ports for them.

use leptos::*;
use wasm_bindgen::JsCast;

use swipefeed::FeedError;

mod api;
mod app;
mod components;
mod state;

/// Element the feed is mounted into
pub const FEED_CONTAINER_ID: &str = "feed-container";

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    let target = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(FEED_CONTAINER_ID))
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok());

    match target {
        Some(container) => mount_to(container, || view! { <app::App /> }),
        None => {
            let err = FeedError::MissingRenderTarget(FEED_CONTAINER_ID.to_string());
            web_sys::console::error_1(&err.to_string().into());
            mount_to_body(|| {
                view! {
                    <p class="text-red-500 text-center mt-10">"Error loading games."</p>
                }
            });
        }
    }
}
