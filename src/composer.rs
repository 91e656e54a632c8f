use crate::color::Palette;
use crate::frame::Frame;
use crate::frame::Pixel;
use crate::frame::TickUpdate;
use crate::geometry::RingGeometry;
use crate::mode::DisplayMode;
use crate::rules::Probe;
use crate::time_sample::TimeSample;

/// Turns a time of day into ring colors.
#[derive(Debug, Clone)]
pub struct FrameComposer {
    geometry: RingGeometry,
    palette: Palette,
}

impl FrameComposer {
    pub fn new(geometry: RingGeometry, palette: Palette) -> Self {
        Self { geometry, palette }
    }

    pub fn geometry(&self) -> &RingGeometry {
        &self.geometry
    }

    /// Every position of the ring for `time`, markers included.
    pub fn render_full_frame(&self, time: TimeSample, mode: DisplayMode) -> Frame {
        let hands = time.hands(&self.geometry);
        let mut frame = Frame::new(self.geometry.size());

        for position in 0..self.geometry.size() {
            let probe = Probe::new(position, &hands, mode, &self.geometry);
            let resolution = crate::rules::resolve(&probe, &self.palette);
            frame.set(position, resolution.color);
        }

        tracing::debug!(%time, ?hands, ?mode, lit = frame.lit().count(), "Rendered full frame");
        frame
    }

    /// The positions to repaint on a tick within the same minute.
    ///
    /// `previous_second` is the second position painted on the last tick,
    /// if any.
    pub fn render_tick(
        &self,
        previous_second: Option<usize>,
        time: TimeSample,
        mode: DisplayMode,
    ) -> TickUpdate {
        let hands = time.hands(&self.geometry);
        let trail = self.geometry.behind(hands.second);

        let second = self.pixel(Probe::new(hands.second, &hands, mode, &self.geometry));
        let trail = self.pixel(Probe::new(trail, &hands, mode, &self.geometry).without_second());
        let stale = previous_second
            .filter(|previous| *previous != second.position && *previous != trail.position)
            .map(|previous| {
                self.pixel(Probe::new(previous, &hands, mode, &self.geometry).without_second())
            });

        tracing::debug!(
            %time,
            second.position = second.position,
            second.rule = second.rule,
            trail.position = trail.position,
            trail.rule = trail.rule,
            stale = ?stale.map(|p| p.position),
            "Rendered tick"
        );

        TickUpdate {
            second,
            trail,
            stale,
        }
    }

    fn pixel(&self, probe: Probe<'_>) -> Pixel {
        let resolution = crate::rules::resolve(&probe, &self.palette);
        Pixel {
            position: probe.position,
            color: resolution.color,
            rule: resolution.rule,
        }
    }
}
