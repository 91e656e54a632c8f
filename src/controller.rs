use crate::composer::FrameComposer;
use crate::frame::Frame;
use crate::frame::TickUpdate;
use crate::mode::DisplayMode;
use crate::time_sample::HandPositions;
use crate::time_sample::TimeSample;

/// What the display needs for the current tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameUpdate {
    Full(Frame),
    Tick(TickUpdate),
}

/// Owns the display mode and decides when the whole ring is repainted.
///
/// A full frame is due at startup, after every mode change, at the start of
/// every minute, whenever the hour or minute hand moved since the last paint
/// and after a failed push. All other ticks only repaint the second hand and
/// what it leaves behind.
#[derive(Debug)]
pub struct DisplayModeController {
    composer: FrameComposer,
    mode: DisplayMode,
    full_render_pending: bool,
    rollover_armed: bool,
    last_hands: Option<HandPositions>,
}

impl DisplayModeController {
    pub fn new(composer: FrameComposer, mode: DisplayMode) -> Self {
        Self {
            composer,
            mode,
            full_render_pending: true,
            rollover_armed: true,
            last_hands: None,
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn is_full_render_pending(&self) -> bool {
        self.full_render_pending
    }

    pub fn advance_mode(&mut self) -> DisplayMode {
        let previous = self.mode;
        self.mode = self.mode.next();
        self.full_render_pending = true;
        tracing::info!(?previous, mode = ?self.mode, "Display mode changed");
        self.mode
    }

    /// Marks a full render when a new minute starts.
    ///
    /// Fires once when the second reaches 0 and re-arms as soon as it has
    /// left 0 again.
    pub fn on_minute_rollover(&mut self, time: TimeSample) -> bool {
        if time.second() != 0 {
            self.rollover_armed = true;
            return false;
        }

        if !self.rollover_armed {
            return false;
        }

        self.rollover_armed = false;
        self.full_render_pending = true;
        tracing::debug!(%time, "Minute rollover");
        true
    }

    pub fn request_full_render(&mut self) {
        self.full_render_pending = true;
    }

    pub fn next_update(&mut self, time: TimeSample) -> FrameUpdate {
        self.on_minute_rollover(time);
        let hands = time.hands(self.composer.geometry());

        // a stalled loop or a clock step can skip second 0
        if let Some(last) = self.last_hands {
            if last.hour != hands.hour || last.minute != hands.minute {
                tracing::debug!(%time, ?last, ?hands, "Hands moved since last paint");
                self.full_render_pending = true;
            }
        }

        let update = if self.full_render_pending {
            self.full_render_pending = false;
            FrameUpdate::Full(self.composer.render_full_frame(time, self.mode))
        } else {
            let previous_second = self.last_hands.map(|last| last.second);
            FrameUpdate::Tick(self.composer.render_tick(previous_second, time, self.mode))
        };

        self.last_hands = Some(hands);
        update
    }
}
