//! Score Relay
//!
//! Listens for `message` events from embedded games and feeds them through
//! the origin-checked [`ScoreRelay`]. Only the page's own origin is allowed
//! unless more origins are listed in localStorage under
//! `swipefeed_relay_origins` (comma-separated).

use leptos::*;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::MessageEvent;

use swipefeed::relay::{OriginPolicy, RelayOutcome, ScoreRelay};

use super::global::GlobalState;

const ORIGINS_KEY: &str = "swipefeed_relay_origins";

/// Origins allowed to post scores
pub fn allowed_origins() -> Vec<String> {
    let Some(window) = web_sys::window() else {
        return Vec::new();
    };

    let mut origins = Vec::new();
    if let Ok(origin) = window.location().origin() {
        origins.push(origin);
    }
    if let Ok(Some(storage)) = window.local_storage() {
        if let Ok(Some(extra)) = storage.get_item(ORIGINS_KEY) {
            origins.extend(split_origins(&extra));
        }
    }
    origins
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

/// Start relaying scores into the global state
pub fn listen_for_scores(state: GlobalState) {
    let relay = Rc::new(RefCell::new(ScoreRelay::new(OriginPolicy::allow(
        allowed_origins(),
    ))));

    // Dropping the handle does not detach the listener; it stays for the page lifetime
    let _ = window_event_listener(ev::message, move |event: MessageEvent| {
        let Some(raw) = message_text(&event) else {
            return;
        };
        let frame_game = sending_frame_game(&event);

        let outcome = relay
            .borrow_mut()
            .receive(&event.origin(), &raw, frame_game.as_deref());

        match outcome {
            RelayOutcome::Accepted(notice) => {
                state.score_total.set(notice.total);
                state.show_success(&notice.message());
            }
            RelayOutcome::RejectedOrigin => {
                web_sys::console::warn_1(
                    &format!("Ignored score message from {}", event.origin()).into(),
                );
            }
            RelayOutcome::Ignored => {}
        }
    });
}

/// Message payload as JSON text
fn message_text(event: &MessageEvent) -> Option<String> {
    let data = event.data();
    if let Some(text) = data.as_string() {
        return Some(text);
    }
    js_sys::JSON::stringify(&data).ok().map(String::from)
}

/// Game id of the card whose iframe sent the message
fn sending_frame_game(event: &MessageEvent) -> Option<String> {
    let source: wasm_bindgen::JsValue = event.source()?.into();
    let document = web_sys::window()?.document()?;
    let frames = document.query_selector_all("iframe[data-game-id]").ok()?;

    (0..frames.length())
        .filter_map(|i| frames.item(i))
        .filter_map(|node| node.dyn_into::<web_sys::HtmlIFrameElement>().ok())
        .find(|frame| {
            frame
                .content_window()
                .map(|w| js_sys::Object::is(&w, &source))
                .unwrap_or(false)
        })
        .and_then(|frame| frame.get_attribute("data-game-id"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_origins() {
        assert_eq!(
            split_origins(" https://a.example , ,https://b.example"),
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert!(split_origins("").is_empty());
    }
}
