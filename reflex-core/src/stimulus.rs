use crate::TrialPhase;

/// Full-screen stimulus color shown for each phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StimulusColor {
    pub rgba: [u8; 4],
}

impl StimulusColor {
    pub const BLUE: StimulusColor = StimulusColor::rgb(0x3b, 0x82, 0xf6);
    pub const RED: StimulusColor = StimulusColor::rgb(0xef, 0x44, 0x44);
    pub const GREEN: StimulusColor = StimulusColor::rgb(0x22, 0xc5, 0x5e);
    pub const ORANGE: StimulusColor = StimulusColor::rgb(0xf9, 0x73, 0x16);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { rgba: [r, g, b, 255] }
    }

    pub fn for_phase(phase: TrialPhase) -> Self {
        match phase {
            TrialPhase::Idle | TrialPhase::Result => Self::BLUE,
            TrialPhase::Armed => Self::RED,
            TrialPhase::Go => Self::GREEN,
            TrialPhase::FalseStart => Self::ORANGE,
        }
    }

    /// Same color with the given alpha, used for translucent overlays
    pub fn with_alpha(self, alpha: u8) -> Self {
        let [r, g, b, _] = self.rgba;
        Self {
            rgba: [r, g, b, alpha],
        }
    }
}

/// Title and subtitle shown for a phase
pub fn phase_message(phase: TrialPhase) -> (&'static str, &'static str) {
    match phase {
        TrialPhase::Idle => ("Test your speed!", "Click to start"),
        TrialPhase::Armed => ("Wait...", "Get ready for green"),
        TrialPhase::Go => ("NOW!", "Click fast!"),
        TrialPhase::FalseStart => ("Too soon!", "Wait until it turns green"),
        TrialPhase::Result => ("Result", "Click to try again"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn go_is_green_and_armed_is_red() {
        assert_eq!(StimulusColor::for_phase(TrialPhase::Go), StimulusColor::GREEN);
        assert_eq!(StimulusColor::for_phase(TrialPhase::Armed), StimulusColor::RED);
        assert_eq!(
            StimulusColor::for_phase(TrialPhase::Idle),
            StimulusColor::for_phase(TrialPhase::Result)
        );
    }

    #[test]
    fn alpha_keeps_channels() {
        let c = StimulusColor::ORANGE.with_alpha(51);
        assert_eq!(c.rgba, [0xf9, 0x73, 0x16, 51]);
    }
}
