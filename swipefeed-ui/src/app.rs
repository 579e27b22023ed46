//! App Root Component
//!
//! Single-page shell: global providers, the feed and overlays. The feed
//! renders at whatever URL serves the page.

use leptos::*;

use crate::components::{Feed, Toast};
use crate::state::global::{provide_global_state, GlobalState};
use crate::state::relay::listen_for_scores;
use crate::state::stores::provide_stores;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide global state and local stores to all components
    provide_global_state();
    provide_stores();

    // Relay scores posted by embedded games
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    listen_for_scores(state.clone());

    view! {
        <div class="min-h-screen bg-black text-white">
            <Feed />

            // Running score from embedded games
            <ScoreBadge />

            // Toast notifications
            <Toast />
        </div>
    }
}

/// Running score total badge
#[component]
fn ScoreBadge() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        {move || {
            let total = state.score_total.get();
            if total != 0.0 {
                view! {
                    <div class="fixed top-4 right-4 z-40 bg-blue-600 text-white font-bold px-3 py-1 rounded-full shadow">
                        {format!("★ {}", total)}
                    </div>
                }.into_view()
            } else {
                view! {}.into_view()
            }
        }}
    }
}
