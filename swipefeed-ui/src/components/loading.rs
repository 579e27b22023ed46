//! Loading Component
//!
//! Spinner and terminal messages shown in place of the feed.

use leptos::*;

/// Full-page loading spinner
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center h-screen">
            <div class="loading-spinner w-8 h-8" />
        </div>
    }
}

/// Static message replacing the feed ("No games available." and the like)
#[component]
pub fn FeedMessage(message: &'static str) -> impl IntoView {
    view! {
        <p class="text-red-500 text-center mt-10">{message}</p>
    }
}
