/// Which fixed markers are drawn on the ring.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, serde::Deserialize, clap::ValueEnum,
)]
pub enum DisplayMode {
    #[default]
    BothMarkers,
    HourOnly,
    NoMarkers,
    QuarterOnly,
}

impl DisplayMode {
    /// The next mode when the mode button is pressed.
    pub fn next(self) -> Self {
        match self {
            DisplayMode::BothMarkers => DisplayMode::HourOnly,
            DisplayMode::HourOnly => DisplayMode::NoMarkers,
            DisplayMode::NoMarkers => DisplayMode::QuarterOnly,
            DisplayMode::QuarterOnly => DisplayMode::BothMarkers,
        }
    }

    pub fn shows_quarter_markers(self) -> bool {
        matches!(self, DisplayMode::BothMarkers | DisplayMode::QuarterOnly)
    }

    pub fn shows_hour_markers(self) -> bool {
        matches!(self, DisplayMode::BothMarkers | DisplayMode::HourOnly)
    }
}

#[cfg(test)]
mod tests {
    use super::DisplayMode;

    #[test]
    fn test_cycle_order() {
        let modes: Vec<_> = std::iter::successors(Some(DisplayMode::default()), |m| Some(m.next()))
            .take(5)
            .collect();

        assert_eq!(
            modes,
            [
                DisplayMode::BothMarkers,
                DisplayMode::HourOnly,
                DisplayMode::NoMarkers,
                DisplayMode::QuarterOnly,
                DisplayMode::BothMarkers,
            ]
        );
    }

    #[test]
    fn test_four_steps_return_to_start() {
        for start in [
            DisplayMode::BothMarkers,
            DisplayMode::HourOnly,
            DisplayMode::NoMarkers,
            DisplayMode::QuarterOnly,
        ] {
            assert_eq!(start.next().next().next().next(), start);
        }
    }

    #[test]
    fn test_marker_flags() {
        assert!(DisplayMode::BothMarkers.shows_quarter_markers());
        assert!(DisplayMode::BothMarkers.shows_hour_markers());
        assert!(!DisplayMode::HourOnly.shows_quarter_markers());
        assert!(DisplayMode::HourOnly.shows_hour_markers());
        assert!(!DisplayMode::NoMarkers.shows_quarter_markers());
        assert!(!DisplayMode::NoMarkers.shows_hour_markers());
        assert!(DisplayMode::QuarterOnly.shows_quarter_markers());
        assert!(!DisplayMode::QuarterOnly.shows_hour_markers());
    }
}
