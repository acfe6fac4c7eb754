use reflex_core::{Attempt, Rating, StimulusColor, TrialPhase, phase_message};

/// Read-only snapshot of a session for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub phase: TrialPhase,
    /// Time since stimulus onset while in Go
    pub live_ms: Option<u64>,
    pub last_reaction: Option<Attempt>,
    pub attempts: Vec<Attempt>,
    pub best: Option<Attempt>,
    pub average: Option<u64>,
}

impl SessionView {
    pub fn color(&self) -> StimulusColor {
        StimulusColor::for_phase(self.phase)
    }

    pub fn rating(&self) -> Option<Rating> {
        self.last_reaction.map(|a| a.rating())
    }

    pub fn title(&self) -> String {
        match (self.phase, self.last_reaction) {
            (TrialPhase::Result, Some(rt)) => rt.to_string(),
            (phase, _) => phase_message(phase).0.to_string(),
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self.rating() {
            Some(rating) if self.phase == TrialPhase::Result => rating.message(),
            _ => phase_message(self.phase).1,
        }
    }

    /// "Attempts: 3 | Best: 210 ms | Average: 250 ms", empty without history
    pub fn stats_line(&self) -> String {
        match (self.best, self.average) {
            (Some(best), Some(avg)) => format!(
                "Attempts: {} | Best: {} | Average: {} ms",
                self.attempts.len(),
                best,
                avg
            ),
            _ => String::new(),
        }
    }
}
