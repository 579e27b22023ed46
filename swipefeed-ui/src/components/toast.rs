//! Toasts
//!
//! Relayed scores show as a notice, failed vote or note writes as a warning.
//! Both clear themselves; see [`GlobalState::show_success`].

use leptos::*;

use crate::state::global::GlobalState;

/// Overlay holding the current score notice and store warning
#[component]
pub fn Toast() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let notice = state.success;
    let warning = state.error;

    view! {
        <div class="fixed bottom-24 inset-x-4 z-50 flex flex-col items-center gap-2 pointer-events-none">
            {move || notice.get().map(|text| toast_line("★", "bg-blue-600", text))}
            {move || warning.get().map(|text| toast_line("⚠", "bg-red-600", text))}
        </div>
    }
}

fn toast_line(icon: &'static str, color: &'static str, text: String) -> impl IntoView {
    view! {
        <p class=format!("{} text-white text-sm font-medium px-4 py-2 rounded-full shadow-lg animate-slide-in", color)>
            {icon}" "{text}
        </p>
    }
}
