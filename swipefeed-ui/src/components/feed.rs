//! Feed Component
//!
//! Hosts the paginator. Cards live in a signal that the paginator's port
//! pushes into and prunes from; the newest card is watched with an
//! `IntersectionObserver`, falling back to window scroll events where the
//! observer is unavailable.

use leptos::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use swipefeed::feed::{
    FeedConfig, FeedPaginator, ItemKey, PresentationPort, RenderedItem,
    TriggerOutcome, VisibilitySignal, VisibilityThresholds,
};

use super::game_card::{card_selector, GameCard};
use super::loading::{FeedMessage, Loading};
use crate::api;

/// Presentation port writing into reactive signals
#[derive(Clone, Copy)]
struct SignalPort {
    cards: RwSignal<Vec<RenderedItem>>,
    watched: RwSignal<Option<ItemKey>>,
}

impl PresentationPort for SignalPort {
    fn render(&mut self, item: &RenderedItem) {
        self.cards.update(|cards| cards.push(item.clone()));
    }

    fn remove(&mut self, item: &RenderedItem) {
        self.cards.update(|cards| cards.retain(|c| c.key != item.key));
    }

    fn observe_last(&mut self, item: &RenderedItem) {
        self.watched.set(Some(item.key));
    }
}

#[derive(Clone, Copy, PartialEq)]
enum FeedStatus {
    Loading,
    Ready,
    Failed(&'static str),
}

type Paginator = StoredValue<Option<FeedPaginator<SignalPort>>>;

fn trigger(paginator: Paginator, signal: VisibilitySignal) {
    paginator.update_value(|feed| {
        let Some(feed) = feed.as_mut() else {
            return;
        };
        if let TriggerOutcome::Appended(report) = feed.on_last_item_visible(signal) {
            if report.looped {
                web_sys::console::log_1(&"Reached the end of the feed, starting over".into());
            }
        }
    });
}

/// The infinite game feed
#[component]
pub fn Feed() -> impl IntoView {
    let config = FeedConfig::default();
    let mode = config.render_mode;
    let thresholds = config.visibility;

    let port = SignalPort {
        cards: create_rw_signal(Vec::new()),
        watched: create_rw_signal(None),
    };
    let status = create_rw_signal(FeedStatus::Loading);
    let paginator: Paginator = store_value(None);

    // Load the list once; any failure ends the session
    spawn_local(async move {
        match api::fetch_games(mode).await {
            Ok(games) => match FeedPaginator::new(games, config, port) {
                Ok(mut feed) => {
                    feed.start();
                    paginator.set_value(Some(feed));
                    status.set(FeedStatus::Ready);
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Feed setup failed: {}", e).into());
                    status.set(FeedStatus::Failed("Error loading games."));
                }
            },
            Err(e) => {
                web_sys::console::error_1(&format!("Loading games failed: {}", e).into());
                status.set(FeedStatus::Failed(e.user_message()));
            }
        }
    });

    let observer = store_value(intersection_observer(paginator, thresholds));
    if observer.with_value(Option::is_none) {
        listen_for_scroll(paginator);
    }

    // Move the observer to the newest card once it is in the DOM
    create_effect(move |_| {
        let Some(key) = port.watched.get() else {
            return;
        };
        request_animation_frame(move || {
            observer.with_value(|observer| {
                let Some(observer) = observer else {
                    return;
                };
                observer.disconnect();
                if let Ok(Some(card)) = document().query_selector(&card_selector(key)) {
                    observer.observe(&card);
                }
            });
        });
    });

    view! {
        <main class="snap-y snap-mandatory">
            {move || match status.get() {
                FeedStatus::Loading => view! { <Loading /> }.into_view(),
                FeedStatus::Failed(message) => view! { <FeedMessage message=message /> }.into_view(),
                FeedStatus::Ready => view! {
                    <For
                        each=move || port.cards.get()
                        key=|item| item.key
                        children=move |item| view! { <GameCard item=item mode=mode /> }
                    />
                }.into_view(),
            }}
        </main>
    }
}

/// Observer reporting the watched card's visibility ratio
///
/// Returns `None` when the browser has no `IntersectionObserver`.
fn intersection_observer(
    paginator: Paginator,
    thresholds: VisibilityThresholds,
) -> Option<IntersectionObserver> {
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, _observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if entry.is_intersecting() {
                    trigger(
                        paginator,
                        VisibilitySignal::Intersection {
                            ratio: entry.intersection_ratio(),
                        },
                    );
                }
            }
        },
    );

    let mut init = IntersectionObserverInit::new();
    init.threshold(&JsValue::from_f64(thresholds.intersection_ratio));

    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init).ok();
    // Lives as long as the page
    callback.forget();
    observer
}

fn listen_for_scroll(paginator: Paginator) {
    let _ = window_event_listener(ev::scroll, move |_| {
        let window = window();
        let viewport_height = window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or_default();
        let scroll_y = window.scroll_y().unwrap_or_default();
        let document_height = document()
            .document_element()
            .map(|el| f64::from(el.scroll_height()))
            .unwrap_or_default();

        trigger(
            paginator,
            VisibilitySignal::Scroll {
                viewport_height,
                scroll_y,
                document_height,
            },
        );
    });
}

