//! Ranked color rules for a single ring position.
//!
//! Rules are evaluated top-down. The first rule whose predicate holds and
//! whose palette color is set decides the position's color; if none matches
//! the position is off. Hand rules always rank above marker rules.

use crate::color::Color;
use crate::color::Palette;
use crate::geometry::RingGeometry;
use crate::mode::DisplayMode;
use crate::time_sample::HandPositions;

/// Everything a rule may look at when deciding one position.
#[derive(Debug, Clone, Copy)]
pub struct Probe<'a> {
    pub position: usize,
    pub hour: usize,
    pub minute: usize,

    /// `None` when resolving what a position shows once the second hand has
    /// moved past it.
    pub second: Option<usize>,

    pub mode: DisplayMode,
    pub geometry: &'a RingGeometry,
}

impl<'a> Probe<'a> {
    pub fn new(
        position: usize,
        hands: &HandPositions,
        mode: DisplayMode,
        geometry: &'a RingGeometry,
    ) -> Self {
        Self {
            position,
            hour: hands.hour,
            minute: hands.minute,
            second: Some(hands.second),
            mode,
            geometry,
        }
    }

    /// The same probe with the second hand taken off the dial.
    pub fn without_second(self) -> Self {
        Self {
            second: None,
            ..self
        }
    }

    fn on_second(&self) -> bool {
        self.second == Some(self.position)
    }

    fn on_minute(&self) -> bool {
        self.minute == self.position
    }

    fn on_hour(&self) -> bool {
        self.hour == self.position
    }
}

pub struct Rule {
    pub name: &'static str,
    applies: fn(&Probe<'_>) -> bool,
    color: fn(&Palette) -> Option<Color>,
}

pub static RULES: &[Rule] = &[
    Rule {
        name: "all-aligned",
        applies: |p| p.on_second() && p.on_minute() && p.on_hour(),
        color: |palette| Some(palette.all_aligned),
    },
    Rule {
        name: "minute+second",
        applies: |p| p.on_second() && p.on_minute(),
        color: |palette| palette.minute_second,
    },
    Rule {
        name: "hour+second",
        applies: |p| p.on_second() && p.on_hour(),
        color: |palette| palette.hour_second,
    },
    Rule {
        name: "second",
        applies: |p| p.on_second(),
        color: |palette| Some(palette.second),
    },
    Rule {
        name: "hour+minute",
        applies: |p| p.on_minute() && p.on_hour(),
        color: |palette| Some(palette.hour_minute),
    },
    Rule {
        name: "minute",
        applies: |p| p.on_minute(),
        color: |palette| Some(palette.minute),
    },
    Rule {
        name: "hour",
        applies: |p| p.on_hour(),
        color: |palette| Some(palette.hour),
    },
    // A zero position reached here cannot be the minute position, so the
    // minute hand is necessarily past 12 o'clock.
    Rule {
        name: "zero-marker",
        applies: |p| p.geometry.is_zero_marker(p.position) && p.minute > 0,
        color: |palette| Some(palette.zero_marker),
    },
    Rule {
        name: "quarter-marker",
        applies: |p| p.mode.shows_quarter_markers() && p.geometry.is_quarter_marker(p.position),
        color: |palette| Some(palette.quarter_marker),
    },
    Rule {
        name: "quarter-as-hour-marker",
        applies: |p| p.mode.shows_hour_markers() && p.geometry.is_quarter_marker(p.position),
        color: |palette| Some(palette.hour_marker),
    },
    Rule {
        name: "hour-marker",
        applies: |p| p.mode.shows_hour_markers() && p.geometry.is_hour_marker(p.position),
        color: |palette| Some(palette.hour_marker),
    },
];

/// Outcome of evaluating [`RULES`] for one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub color: Color,

    /// Name of the deciding rule, `None` if the position is off.
    pub rule: Option<&'static str>,
}

pub fn resolve(probe: &Probe<'_>, palette: &Palette) -> Resolution {
    RULES
        .iter()
        .filter(|rule| (rule.applies)(probe))
        .find_map(|rule| {
            (rule.color)(palette).map(|color| Resolution {
                color,
                rule: Some(rule.name),
            })
        })
        .unwrap_or(Resolution {
            color: crate::color::OFF,
            rule: None,
        })
}
