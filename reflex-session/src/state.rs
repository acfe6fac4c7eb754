use super::config::{ConfigError, SessionConfig};
use super::history::History;
use super::input::InputNormalizer;
use super::storage::{Store, load_history, save_history};
use super::view::SessionView;
use rand::Rng;
use reflex_core::{Attempt, InputEvent, TrialPhase};
use reflex_timing::{Timer, TimerId};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// One normalized user action
    Interact,
    GoTimerFired(TimerId),
}

/// Game session controller: owns the trial phase, the pending Go timer and the history.
pub struct GameSession<T, R, S>
where
    T: Timer,
    R: Rng,
    S: Store,
{
    phase: TrialPhase,
    timer: T,
    rng: R,
    store: S,
    config: SessionConfig,
    input: InputNormalizer,
    pending_go: Option<TimerId>,
    onset: Option<u64>,
    last_reaction: Option<Attempt>,
    history: History,
}

impl<T, R, S> GameSession<T, R, S>
where
    T: Timer,
    R: Rng,
    S: Store,
{
    /// Validates the config and loads the persisted history from `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid. Bad persisted data is not an error.
    pub fn new(config: SessionConfig, timer: T, rng: R, store: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let history = load_history(&store);
        log::info!(
            "session ready: {} previous attempts, best {:?}",
            history.len(),
            history.best().map(|b| b.as_millis())
        );

        Ok(Self {
            phase: TrialPhase::default(),
            timer,
            rng,
            store,
            input: InputNormalizer::from_config(&config),
            config,
            pending_go: None,
            onset: None,
            last_reaction: None,
            history,
        })
    }

    /// Applies an event; returns true if the phase changed
    pub fn handle_event(&mut self, event: SessionEvent) -> bool {
        let next = match event {
            SessionEvent::Interact => self.phase.on_interact(),
            SessionEvent::GoTimerFired(id) if self.pending_go == Some(id) => {
                self.phase.on_go_timer()
            }
            SessionEvent::GoTimerFired(id) => {
                log::trace!("stale timer {} ignored", id.raw());
                None
            }
        };

        let Some(next) = next else {
            log::trace!("{event:?} ignored in {}", self.phase);
            return false;
        };

        let from = self.phase;
        match (from, next) {
            (TrialPhase::Idle, TrialPhase::Armed) => self.arm(),
            (TrialPhase::Armed, TrialPhase::FalseStart) => self.cancel_pending(),
            (TrialPhase::Armed, TrialPhase::Go) => self.show_stimulus(),
            (TrialPhase::Go, TrialPhase::Result) => self.record_response(),
            (TrialPhase::Result, TrialPhase::Idle) => self.last_reaction = None,
            _ => {}
        }
        self.phase = next;
        log::debug!("{from} -> {next}");
        true
    }

    pub fn interact(&mut self) -> bool {
        self.handle_event(SessionEvent::Interact)
    }

    /// Feeds a raw input event through the normalizer
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        if !self.input.accept(event) {
            return false;
        }
        self.interact()
    }

    /// Delivers any expired timers; returns true if the phase changed
    pub fn tick(&mut self) -> bool {
        let mut changed = false;
        for id in self.timer.expired() {
            changed |= self.handle_event(SessionEvent::GoTimerFired(id));
        }
        changed
    }

    fn arm(&mut self) {
        self.cancel_pending();
        let (min, max) = self.config.delay_range_ms;
        let delay_ms = self.rng.random_range(min..=max);
        let id = self.timer.schedule(Duration::from_millis(delay_ms));
        self.pending_go = Some(id);
        self.onset = None;
        log::debug!("stimulus scheduled in {delay_ms} ms (timer {})", id.raw());
    }

    fn cancel_pending(&mut self) {
        if let Some(id) = self.pending_go.take() {
            self.timer.cancel(id);
        }
    }

    fn show_stimulus(&mut self) {
        self.pending_go = None;
        self.onset = Some(self.timer.now());
    }

    fn record_response(&mut self) {
        let now = self.timer.now();
        let onset = self.onset.take().unwrap_or(now);
        let attempt = Attempt::from_millis(now.saturating_sub(onset));
        self.last_reaction = Some(attempt);

        let new_best = self.history.record(attempt);
        log::info!(
            "reaction {attempt} ({:?}){}",
            attempt.rating(),
            if new_best { ", new best" } else { "" }
        );

        if let Err(e) = save_history(&mut self.store, &self.history) {
            log::warn!("failed to persist history: {e}");
        }
    }

    pub fn phase(&self) -> TrialPhase {
        self.phase
    }

    pub fn last_reaction(&self) -> Option<Attempt> {
        self.last_reaction
    }

    /// Live reaction time while the stimulus is showing
    pub fn elapsed_since_onset(&self) -> Option<u64> {
        match (self.phase, self.onset) {
            (TrialPhase::Go, Some(onset)) => Some(self.timer.now().saturating_sub(onset)),
            _ => None,
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn pending_go(&self) -> Option<TimerId> {
        self.pending_go
    }

    /// When the pending Go timer is due, in timer milliseconds
    pub fn next_deadline(&self) -> Option<u64> {
        self.pending_go.and_then(|_| self.timer.next_deadline())
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            phase: self.phase,
            live_ms: self.elapsed_since_onset(),
            last_reaction: self.last_reaction,
            attempts: self.history.attempts().to_vec(),
            best: self.history.best(),
            average: self.history.average(),
        }
    }
}
