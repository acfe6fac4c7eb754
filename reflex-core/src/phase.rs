use serde::{Deserialize, Serialize};

/// Phases of a single reaction trial
#[derive(Copy, Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TrialPhase {
    #[default]
    Idle,
    Armed,
    Go,
    Result,
    FalseStart,
}

impl TrialPhase {
    pub const ALL: [TrialPhase; 5] = [
        TrialPhase::Idle,
        TrialPhase::Armed,
        TrialPhase::Go,
        TrialPhase::Result,
        TrialPhase::FalseStart,
    ];

    /// Phase reached when the user interacts, `None` if the interact is ignored.
    pub fn on_interact(&self) -> Option<Self> {
        use TrialPhase::*;
        Some(match self {
            Idle => Armed,
            Armed => FalseStart,
            Go => Result,
            Result => Idle,
            FalseStart => Idle,
        })
    }

    /// Phase reached when the scheduled stimulus timer fires.
    pub fn on_go_timer(&self) -> Option<Self> {
        match self {
            TrialPhase::Armed => Some(TrialPhase::Go),
            _ => None,
        }
    }
}

impl std::fmt::Display for TrialPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TrialPhase::Idle => "idle",
            TrialPhase::Armed => "armed",
            TrialPhase::Go => "go",
            TrialPhase::Result => "result",
            TrialPhase::FalseStart => "false-start",
        };
        f.write_str(name)
    }
}
