use std::collections::BTreeMap;

use crate::color::Color;

/// Colors of one complete ring image.
///
/// Only lit positions are stored; every other position is off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    size: usize,
    pixels: BTreeMap<usize, Color>,
}

impl Frame {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            pixels: BTreeMap::new(),
        }
    }

    pub fn set(&mut self, position: usize, color: Color) {
        debug_assert!(position < self.size, "position {position} outside frame");
        if color == crate::color::OFF {
            self.pixels.remove(&position);
        } else {
            self.pixels.insert(position, color);
        }
    }

    pub fn get(&self, position: usize) -> Color {
        self.pixels
            .get(&position)
            .copied()
            .unwrap_or(crate::color::OFF)
    }

    /// Lit positions in ascending order.
    pub fn lit(&self) -> impl Iterator<Item = (usize, Color)> + '_ {
        self.pixels.iter().map(|(position, color)| (*position, *color))
    }

    pub fn positions_with(&self, color: Color) -> Vec<usize> {
        self.lit()
            .filter(|(_, c)| *c == color)
            .map(|(position, _)| position)
            .collect()
    }
}

/// One position and the color it has to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    pub position: usize,
    pub color: Color,

    /// Rule that decided the color, `None` if off.
    pub rule: Option<&'static str>,
}

/// The few positions that change between two ticks of the same minute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickUpdate {
    pub second: Pixel,

    /// Position right behind the second hand, restored to what it shows
    /// without the second hand on it.
    pub trail: Pixel,

    /// Previous second position when the hand skipped past the trail.
    pub stale: Option<Pixel>,
}

impl TickUpdate {
    /// Pixels in the order they must be written so the second hand wins
    /// wherever positions coincide.
    pub fn pixels(&self) -> impl Iterator<Item = &Pixel> {
        self.stale
            .iter()
            .chain(std::iter::once(&self.trail))
            .chain(std::iter::once(&self.second))
    }
}
