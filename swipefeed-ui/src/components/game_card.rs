//! Game Card
//!
//! One full-screen card: the game itself, vote buttons and the notes toggle.

use leptos::*;

use swipefeed::feed::{ItemKey, RenderMode, RenderedItem};
use swipefeed::store::{VoteCategory, VoteCounts};

use super::notes_panel::NotesPanel;
use crate::state::global::GlobalState;
use crate::state::stores::FeedStores;

/// DOM attribute carrying the card's item key
pub const KEY_ATTR: &str = "data-key";

/// Selector for the card with the given key
pub fn card_selector(key: ItemKey) -> String {
    format!("[{}=\"{}\"]", KEY_ATTR, key)
}

/// A rendered feed card
#[component]
pub fn GameCard(item: RenderedItem, mode: RenderMode) -> impl IntoView {
    let stores = use_context::<FeedStores>().expect("FeedStores not found");
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let game = item.game;
    let initial = stores.counters.counts(&game.id).unwrap_or_else(|e| {
        state.show_error(&format!("Could not read votes: {}", e));
        VoteCounts::default()
    });
    let counts = create_rw_signal(initial);
    let (show_notes, set_show_notes) = create_signal(false);

    let body = match mode {
        RenderMode::Frame => view! {
            <iframe
                src=game.location.clone()
                title=game.title.clone()
                data-game-id=game.id.clone()
                class="w-full h-full border-0"
                allow="autoplay; fullscreen"
            />
        }
        .into_view(),
        RenderMode::Image => view! {
            <img
                src=game.location.clone()
                alt=game.title.clone()
                class="w-full h-full object-cover"
            />
        }
        .into_view(),
    };

    let byline = game.author.clone().map(|author| view! {
        <span class="text-sm text-gray-300">{format!("by {}", author)}</span>
    });
    let notes_id = game.id.clone();

    view! {
        <section
            class="relative h-screen w-full snap-start bg-gray-900"
            data-key=item.key.to_string()
        >
            {body}

            <div class="absolute top-4 left-4 space-x-2">
                <span class="font-bold">{game.title.clone()}</span>
                {byline}
            </div>

            <div class="absolute bottom-6 left-4 right-4 flex items-center justify-center space-x-3">
                <VoteButton game_id=game.id.clone() category=VoteCategory::Up counts=counts />
                <VoteButton game_id=game.id.clone() category=VoteCategory::Super counts=counts />
                <VoteButton game_id=game.id.clone() category=VoteCategory::Down counts=counts />
                <button
                    class="bg-gray-700 hover:bg-gray-600 rounded-full px-4 py-2"
                    on:click=move |_| set_show_notes.update(|open| *open = !*open)
                >
                    "💬"
                </button>
            </div>

            {move || show_notes.get().then(|| view! { <NotesPanel game_id=notes_id.clone() /> })}
        </section>
    }
}

#[component]
fn VoteButton(game_id: String, category: VoteCategory, counts: RwSignal<VoteCounts>) -> impl IntoView {
    let stores = use_context::<FeedStores>().expect("FeedStores not found");
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (label, class) = match category {
        VoteCategory::Up => ("👍 Up", "bg-green-600 hover:bg-green-700"),
        VoteCategory::Super => ("🚀 Super Up", "bg-purple-600 hover:bg-purple-700"),
        VoteCategory::Down => ("👎 Down", "bg-red-600 hover:bg-red-700"),
    };

    let on_click = move |_| match stores.counters.increment(category, &game_id) {
        Ok(value) => counts.update(|c| c.set(category, value)),
        Err(e) => state.show_error(&format!("Could not save vote: {}", e)),
    };

    view! {
        <button
            class=format!("{} rounded-full px-4 py-2 font-medium transition-colors", class)
            on:click=on_click
        >
            {label}
            " "
            <span class="font-bold">{move || counts.get().get(category)}</span>
        </button>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_selector() {
        assert_eq!(card_selector(42), "[data-key=\"42\"]");
    }
}
