//! Notes Panel
//!
//! Per-game note list with an append-only text box.

use leptos::*;

use swipefeed::store::{Note, StoreError};

use crate::state::global::GlobalState;
use crate::state::stores::FeedStores;

/// Notes for one game
#[component]
pub fn NotesPanel(game_id: String) -> impl IntoView {
    let stores = use_context::<FeedStores>().expect("FeedStores not found");
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    // A corrupt list stays read-only so it is never overwritten
    let (notes, set_notes) = create_signal(Vec::<Note>::new());
    let (corrupt, set_corrupt) = create_signal(false);
    match stores.notes.list(&game_id) {
        Ok(list) => set_notes.set(list),
        Err(e) => {
            set_corrupt.set(matches!(e, StoreError::Corrupt { .. }));
            state.show_error(&format!("Could not read notes: {}", e));
        }
    }

    let input = create_node_ref::<html::Textarea>();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(textarea) = input.get() else {
            return;
        };

        match stores.notes.append(&game_id, &textarea.value()) {
            Ok(note) => {
                set_notes.update(|list| list.push(note));
                textarea.set_value("");
            }
            Err(StoreError::EmptyNote) => {}
            Err(e) => state.show_error(&format!("Could not save note: {}", e)),
        }
    };

    view! {
        <div class="absolute bottom-24 left-4 right-4 bg-gray-900/90 rounded-lg p-4 space-y-3">
            <ul class="max-h-48 overflow-y-auto space-y-2 text-sm">
                {move || {
                    let list = notes.get();
                    if list.is_empty() {
                        view! { <li class="text-gray-400">"No notes yet."</li> }.into_view()
                    } else {
                        list.into_iter()
                            .map(|note| view! { <NoteRow note=note /> })
                            .collect_view()
                    }
                }}
            </ul>

            <form on:submit=on_submit class="flex space-x-2">
                <textarea
                    node_ref=input
                    rows="2"
                    placeholder="Write a note..."
                    disabled=move || corrupt.get()
                    class="flex-1 bg-gray-800 rounded px-2 py-1 text-white"
                />
                <button
                    type="submit"
                    disabled=move || corrupt.get()
                    class="bg-blue-600 hover:bg-blue-700 disabled:bg-gray-600 rounded px-3"
                >
                    "Save"
                </button>
            </form>
        </div>
    }
}

#[component]
fn NoteRow(note: Note) -> impl IntoView {
    let when = note
        .date
        .with_timezone(&chrono::Local)
        .format("%Y-%m-%d %H:%M")
        .to_string();

    view! {
        <li class="border-b border-gray-700 pb-1">
            <div class="text-gray-400 text-xs">{when}</div>
            <div class="whitespace-pre-wrap">{note.text}</div>
        </li>
    }
}
