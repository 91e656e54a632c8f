use std::num::NonZeroUsize;

/// Clock hours that get an hour marker. 0, 3, 6 and 9 are covered by the
/// zero and quarter markers.
const HOUR_MARKER_HOURS: [usize; 8] = [1, 2, 4, 5, 7, 8, 10, 11];

/// Fixed layout of the ring: its size and where the markers sit.
///
/// Positions are indexed clockwise from 12 o'clock, `0..size`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingGeometry {
    size: usize,
    hour_markers: [usize; 8],
    quarter_markers: [usize; 3],
}

impl RingGeometry {
    pub fn new(size: NonZeroUsize) -> Self {
        let size = size.get();

        Self {
            size,
            hour_markers: HOUR_MARKER_HOURS.map(|hour| hour * size / 12),
            quarter_markers: [1, 2, 3].map(|quarter| quarter * size / 4),
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn hour_markers(&self) -> &[usize; 8] {
        &self.hour_markers
    }

    pub fn quarter_markers(&self) -> &[usize; 3] {
        &self.quarter_markers
    }

    #[inline]
    pub fn is_zero_marker(&self, position: usize) -> bool {
        position == 0
    }

    pub fn is_quarter_marker(&self, position: usize) -> bool {
        self.quarter_markers.contains(&position)
    }

    pub fn is_hour_marker(&self, position: usize) -> bool {
        self.hour_markers.contains(&position)
    }

    /// The position counter-clockwise of `position`, wrapping at 12 o'clock.
    pub fn behind(&self, position: usize) -> usize {
        if position == 0 {
            self.size - 1
        } else {
            position - 1
        }
    }
}
