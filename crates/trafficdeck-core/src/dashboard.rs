//! Live metrics dashboard model.
//!
//! Holds the case-study catalog, the active category tab and a simulated
//! live counter that grows by a random amount on every tick of a
//! repeating timer.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use serde::Serialize;

use crate::catalog::{CaseRecord, DatasetGroup};
use crate::constants::{
    CARD_STAGGER, DEFAULT_TICK_BOUND, DEFAULT_TICK_INTERVAL, INITIAL_LIVE_COUNTER,
    METRIC_REVEAL_BASE, METRIC_REVEAL_STEP,
};
use crate::error::DeckError;
use crate::timer::{Scheduler, TimerId, VirtualScheduler};

/// Messages delivered by the dashboard's timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardEvent {
    LiveTick,
}

/// Read-only snapshot for presentation code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardState {
    pub active_category: String,
    pub live_counter: u64,
}

/// Live feed tunables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Time between live-counter ticks.
    pub tick_interval: Duration,
    /// Each tick adds a value in `[0, tick_bound)`.
    pub tick_bound: u64,
    /// Counter value before the first tick.
    pub initial_counter: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            tick_bound: DEFAULT_TICK_BOUND,
            initial_counter: INITIAL_LIVE_COUNTER,
        }
    }
}

/// Dashboard state plus the timer and random source that drive it.
pub struct DashboardModel<S = VirtualScheduler<DashboardEvent>, R = StdRng> {
    catalog: DatasetGroup,
    active: usize,
    live_counter: u64,
    config: DashboardConfig,
    scheduler: S,
    rng: R,
    feed: Option<TimerId>,
}

impl DashboardModel {
    /// Dashboard on a virtual scheduler with a seeded random source.
    #[must_use]
    pub fn seeded(catalog: DatasetGroup, config: DashboardConfig, seed: u64) -> Self {
        Self::new(
            catalog,
            config,
            VirtualScheduler::new(),
            StdRng::seed_from_u64(seed),
        )
    }
}

impl<S, R> DashboardModel<S, R>
where
    S: Scheduler<DashboardEvent>,
    R: RngCore,
{
    /// Create a dashboard showing the catalog's first category.
    #[must_use]
    pub fn new(catalog: DatasetGroup, config: DashboardConfig, scheduler: S, rng: R) -> Self {
        Self {
            catalog,
            active: 0,
            live_counter: config.initial_counter,
            config,
            scheduler,
            rng,
            feed: None,
        }
    }

    /// Make `key` the active category.
    ///
    /// On error the active category is left untouched.
    pub fn select_category(&mut self, key: &str) -> Result<(), DeckError> {
        let index = self.catalog.position(key).ok_or_else(|| {
            tracing::warn!(key, "rejected unknown category");
            DeckError::UnknownCategory(key.to_string())
        })?;
        self.active = index;
        tracing::debug!(key, "category selected");
        Ok(())
    }

    /// Select the next tab, wrapping around.
    pub fn next_category(&mut self) {
        self.active = (self.active + 1) % self.catalog.len();
    }

    /// Select the previous tab, wrapping around.
    pub fn previous_category(&mut self) {
        self.active = (self.active + self.catalog.len() - 1) % self.catalog.len();
    }

    /// Grow the live counter by a random amount in `[0, tick_bound)`.
    ///
    /// Returns the increment applied.
    pub fn tick(&mut self) -> u64 {
        let increment = if self.config.tick_bound == 0 {
            0
        } else {
            self.rng.gen_range(0..self.config.tick_bound)
        };
        self.live_counter = self.live_counter.saturating_add(increment);
        tracing::trace!(increment, counter = self.live_counter, "live tick");
        increment
    }

    /// Start the periodic live feed. Starting a running feed is a no-op.
    pub fn start_live_feed(&mut self) -> TimerId {
        if let Some(id) = self.feed {
            return id;
        }
        let id = self
            .scheduler
            .every(self.config.tick_interval, DashboardEvent::LiveTick);
        self.feed = Some(id);
        tracing::debug!(interval = ?self.config.tick_interval, "live feed started");
        id
    }

    /// Stop the periodic live feed. Returns `false` if it was not running.
    pub fn stop_live_feed(&mut self) -> bool {
        match self.feed.take() {
            Some(id) => {
                self.scheduler.cancel(id);
                tracing::debug!("live feed stopped");
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        self.feed.is_some()
    }

    /// Advance virtual time, applying every tick that falls due.
    ///
    /// Returns the number of ticks applied.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let until = self.scheduler.now().saturating_add(elapsed);
        let mut fired = 0;
        while let Some(event) = self.scheduler.pop_due(until) {
            match event {
                DashboardEvent::LiveTick => {
                    self.tick();
                    fired += 1;
                }
            }
        }
        self.scheduler.settle(until);
        fired
    }

    /// Cancel every timer the dashboard owns.
    pub fn teardown(&mut self) {
        self.stop_live_feed();
    }

    /// Snapshot of the observable state.
    #[must_use]
    pub fn state(&self) -> DashboardState {
        DashboardState {
            active_category: self.active_key().to_string(),
            live_counter: self.live_counter,
        }
    }

    #[must_use]
    pub fn live_counter(&self) -> u64 {
        self.live_counter
    }

    #[must_use]
    pub fn active_key(&self) -> &str {
        &self.catalog.categories()[self.active].key
    }

    /// Index of the active tab.
    #[must_use]
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Case records of the active category.
    #[must_use]
    pub fn active_cases(&self) -> &[CaseRecord] {
        &self.catalog.categories()[self.active].cases
    }

    #[must_use]
    pub fn catalog(&self) -> &DatasetGroup {
        &self.catalog
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}

/// Seconds before the card at `index` appears after a tab switch.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn card_delay(index: usize) -> f64 {
    index as f64 * CARD_STAGGER
}

/// Seconds before the metric at `index` on a card appears.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn metric_delay(index: usize) -> f64 {
    METRIC_REVEAL_BASE + index as f64 * METRIC_REVEAL_STEP
}
