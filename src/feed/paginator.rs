//! Feed Paginator
//!
//! Owns the cursor into the game list, the FIFO list of live cards and the
//! `loading` guard. All rendering goes through a [`PresentationPort`], so the
//! engine runs the same against a browser DOM, a terminal, or a test double.
//!
//! # Batch lifecycle
//!
//! ```text
//! visible? ──► loading? ──yes──► Busy (dropped, not queued)
//!                 │no
//!                 ▼
//!   begin_batch: loading = true, plan [next, min(next + B, len))
//!                 ▼
//!   finish_batch: render each index, next = end, loading = false,
//!                 prune oldest, observe last
//! ```

use std::collections::VecDeque;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::error::{FeedError, FeedResult};
use super::types::{FeedCursor, GameRecord, ItemKey, RenderMode, RenderedItem};
use super::visibility::{VisibilitySignal, VisibilityThresholds};

/// Where the paginator puts cards
///
/// `observe_last` registers interest in the newest card; the host reports its
/// visibility back through [`FeedPaginator::on_last_item_visible`].
pub trait PresentationPort {
    /// Append a card after all current cards
    fn render(&mut self, item: &RenderedItem);

    /// Remove a card
    fn remove(&mut self, item: &RenderedItem);

    /// Watch this card's visibility, replacing any previous registration
    fn observe_last(&mut self, item: &RenderedItem);
}

/// What happens when the last card is seen and the list is used up
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EndPolicy {
    /// Finite feed: further triggers are no-ops
    Stop,
    /// Infinite feed: restart from the first game
    #[default]
    Loop,
}

impl std::fmt::Display for EndPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EndPolicy::Stop => write!(f, "stop"),
            EndPolicy::Loop => write!(f, "loop"),
        }
    }
}

impl std::str::FromStr for EndPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stop" | "finite" => Ok(EndPolicy::Stop),
            "loop" | "infinite" => Ok(EndPolicy::Loop),
            other => Err(format!("Unknown end policy: {}", other)),
        }
    }
}

/// Paginator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Cards appended per batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Maximum live cards before the oldest are pruned (0 disables pruning)
    #[serde(default = "default_max_live_items")]
    pub max_live_items: usize,

    #[serde(default)]
    pub end_policy: EndPolicy,

    #[serde(default)]
    pub render_mode: RenderMode,

    #[serde(default)]
    pub visibility: VisibilityThresholds,
}

fn default_batch_size() -> usize {
    3
}

fn default_max_live_items() -> usize {
    12
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            max_live_items: default_max_live_items(),
            end_policy: EndPolicy::default(),
            render_mode: RenderMode::default(),
            visibility: VisibilityThresholds::default(),
        }
    }
}

impl FeedConfig {
    /// Create a config with the given batch size and defaults elsewhere
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size,
            ..Default::default()
        }
    }

    /// Builder method: set the live card limit (0 disables pruning)
    pub fn max_live_items(mut self, max: usize) -> Self {
        self.max_live_items = max;
        self
    }

    /// Builder method: set the end-of-list policy
    pub fn end_policy(mut self, policy: EndPolicy) -> Self {
        self.end_policy = policy;
        self
    }

    /// Builder method: set the render mode
    pub fn render_mode(mut self, mode: RenderMode) -> Self {
        self.render_mode = mode;
        self
    }

    /// Builder method: set visibility thresholds
    pub fn visibility(mut self, visibility: VisibilityThresholds) -> Self {
        self.visibility = visibility;
        self
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> FeedResult<()> {
        if self.batch_size == 0 {
            return Err(FeedError::InvalidConfig(
                "batch_size must be at least 1".to_string(),
            ));
        }
        self.visibility.validate().map_err(FeedError::InvalidConfig)
    }

    fn pruning_limit(&self) -> Option<usize> {
        (self.max_live_items > 0).then_some(self.max_live_items)
    }
}

/// A batch that has claimed the `loading` guard but is not rendered yet
///
/// Obtained from [`FeedPaginator::begin_batch`] and consumed by
/// [`FeedPaginator::finish_batch`].
#[derive(Debug)]
pub struct BatchPlan {
    range: Range<usize>,
    looped: bool,
}

impl BatchPlan {
    /// Indices this batch will render
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Whether the cursor wrapped to the start for this batch
    pub fn looped(&self) -> bool {
        self.looped
    }
}

/// Summary of a completed batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// Indices rendered
    pub range: Range<usize>,
    /// Whether the cursor wrapped to the start for this batch
    pub looped: bool,
    /// Cards pruned after the batch
    pub pruned: usize,
}

/// Result of a trigger or append request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// A batch was rendered
    Appended(BatchReport),
    /// A batch was already in progress; the request was dropped
    Busy,
    /// The signal did not cross the visibility threshold
    NotVisible,
    /// Finite feed with nothing left to render
    Exhausted,
}

impl TriggerOutcome {
    /// Whether any cards were rendered
    pub fn appended(&self) -> bool {
        matches!(self, TriggerOutcome::Appended(_))
    }
}

/// Batch-appending, FIFO-pruning feed over a fixed game list
pub struct FeedPaginator<P> {
    games: Vec<GameRecord>,
    config: FeedConfig,
    port: P,
    cursor: FeedCursor,
    live: VecDeque<RenderedItem>,
    loading: bool,
    next_key: ItemKey,
    observed: Option<ItemKey>,
}

impl<P: PresentationPort> FeedPaginator<P> {
    /// Create a paginator over a loaded game list
    ///
    /// Nothing is rendered until [`start`](Self::start) is called.
    pub fn new(games: Vec<GameRecord>, config: FeedConfig, port: P) -> FeedResult<Self> {
        config.validate()?;
        if games.is_empty() {
            return Err(FeedError::EmptyFeed);
        }

        tracing::debug!(
            games = games.len(),
            batch_size = config.batch_size,
            max_live_items = config.max_live_items,
            end_policy = %config.end_policy,
            "Feed paginator created"
        );

        Ok(Self {
            games,
            config,
            port,
            cursor: FeedCursor::default(),
            live: VecDeque::new(),
            loading: false,
            next_key: 0,
            observed: None,
        })
    }

    /// Render the first batch
    pub fn start(&mut self) -> TriggerOutcome {
        self.append_batch()
    }

    /// Append the next batch at the cursor
    ///
    /// Returns [`TriggerOutcome::Busy`] while another batch holds the guard
    /// and [`TriggerOutcome::Exhausted`] when the cursor is at the end. Never
    /// wraps; wrapping is the trigger's job.
    pub fn append_batch(&mut self) -> TriggerOutcome {
        match self.begin_batch() {
            Some(plan) => TriggerOutcome::Appended(self.finish_batch(plan)),
            None if self.loading => TriggerOutcome::Busy,
            None => TriggerOutcome::Exhausted,
        }
    }

    /// Claim the `loading` guard and plan the next batch
    ///
    /// Returns `None` if a batch is already in progress or nothing remains.
    pub fn begin_batch(&mut self) -> Option<BatchPlan> {
        self.plan(false)
    }

    /// Render a planned batch, release the guard, prune and re-observe
    pub fn finish_batch(&mut self, plan: BatchPlan) -> BatchReport {
        for index in plan.range.clone() {
            let item = RenderedItem {
                key: self.next_key,
                index,
                game: self.games[index].clone(),
            };
            self.next_key += 1;
            self.port.render(&item);
            self.live.push_back(item);
        }

        self.cursor.next_index = plan.range.end;
        self.loading = false;

        let pruned = self.prune_oldest();
        self.observe_last();

        tracing::debug!(
            start = plan.range.start,
            end = plan.range.end,
            looped = plan.looped,
            pruned,
            live = self.live.len(),
            "Batch appended"
        );

        BatchReport {
            range: plan.range,
            looped: plan.looped,
            pruned,
        }
    }

    /// Remove the oldest cards until the live count is within the limit
    ///
    /// Returns the number of cards removed. If the observed card was among
    /// them, observation moves to the current last card.
    pub fn prune_oldest(&mut self) -> usize {
        let Some(max) = self.config.pruning_limit() else {
            return 0;
        };

        let mut pruned = 0;
        while self.live.len() > max {
            let Some(item) = self.live.pop_front() else {
                break;
            };
            self.port.remove(&item);
            if self.observed == Some(item.key) {
                self.observed = None;
            }
            pruned += 1;
        }

        if pruned > 0 && self.observed.is_none() {
            self.observe_last();
        }
        pruned
    }

    /// Handle a visibility report for the last card
    pub fn on_last_item_visible(&mut self, signal: VisibilitySignal) -> TriggerOutcome {
        if !self.config.visibility.is_triggered(signal) {
            return TriggerOutcome::NotVisible;
        }
        self.advance()
    }

    /// Load the next batch as if the last card had been seen
    ///
    /// Applies the end policy when the list is used up.
    pub fn advance(&mut self) -> TriggerOutcome {
        if self.loading {
            tracing::trace!("Trigger dropped, batch in progress");
            return TriggerOutcome::Busy;
        }

        match self.plan(true) {
            Some(plan) => TriggerOutcome::Appended(self.finish_batch(plan)),
            None => TriggerOutcome::Exhausted,
        }
    }

    fn plan(&mut self, allow_wrap: bool) -> Option<BatchPlan> {
        if self.loading {
            return None;
        }

        let len = self.games.len();
        let mut looped = false;
        if self.cursor.next_index >= len {
            if !allow_wrap || self.config.end_policy == EndPolicy::Stop {
                return None;
            }
            tracing::debug!("End of feed reached, looping to start");
            self.cursor.next_index = 0;
            looped = true;
        }

        let start = self.cursor.next_index;
        let end = (start + self.config.batch_size).min(len);
        self.loading = true;
        Some(BatchPlan {
            range: start..end,
            looped,
        })
    }

    fn observe_last(&mut self) {
        if let Some(last) = self.live.back() {
            if self.observed != Some(last.key) {
                self.port.observe_last(last);
                self.observed = Some(last.key);
            }
        }
    }

    /// Current cursor
    pub fn cursor(&self) -> FeedCursor {
        self.cursor
    }

    /// Live cards, oldest first
    pub fn live_items(&self) -> impl Iterator<Item = &RenderedItem> {
        self.live.iter()
    }

    /// Number of live cards
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Key of the card currently observed
    pub fn observed(&self) -> Option<ItemKey> {
        self.observed
    }

    /// Whether a batch holds the `loading` guard
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether no trigger can render anything more
    pub fn is_exhausted(&self) -> bool {
        self.config.end_policy == EndPolicy::Stop && self.cursor.next_index >= self.games.len()
    }

    /// Loaded game list
    pub fn games(&self) -> &[GameRecord] {
        &self.games
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }
}
