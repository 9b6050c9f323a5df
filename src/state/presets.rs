//! Fixed duration shortcuts

use serde::Serialize;

/// Which row of buttons a preset belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetKind {
    /// Quick presets panel
    Quick,
    /// Daily ritual cards
    Ritual,
}

/// A named, fixed duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Preset {
    pub label: &'static str,
    pub seconds: u32,
    pub kind: PresetKind,
    pub description: Option<&'static str>,
}

pub const PRESETS: [Preset; 6] = [
    Preset {
        label: "Quick Focus",
        seconds: 5 * 60,
        kind: PresetKind::Quick,
        description: None,
    },
    Preset {
        label: "Pomodoro",
        seconds: 25 * 60,
        kind: PresetKind::Quick,
        description: None,
    },
    Preset {
        label: "Deep Work",
        seconds: 45 * 60,
        kind: PresetKind::Quick,
        description: None,
    },
    Preset {
        label: "Morning Momentum",
        seconds: 15 * 60,
        kind: PresetKind::Ritual,
        description: Some(
            "Kick off the day with a 15 minute burst to set the tone for everything that follows.",
        ),
    },
    Preset {
        label: "Afternoon Reset",
        seconds: 10 * 60,
        kind: PresetKind::Ritual,
        description: Some(
            "Shake off the post-lunch slump with a 10 minute timer and a walk around the room.",
        ),
    },
    Preset {
        label: "Evening Wind Down",
        seconds: 5 * 60,
        kind: PresetKind::Ritual,
        description: Some("Wrap the day with 5 quiet minutes to review wins and plan for tomorrow."),
    },
];

/// Look up a preset by label, ignoring ASCII case
pub fn find_preset(label: &str) -> Option<&'static Preset> {
    PRESETS
        .iter()
        .find(|preset| preset.label.eq_ignore_ascii_case(label.trim()))
}
