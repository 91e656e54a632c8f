use tokio_util::sync::CancellationToken;

use crate::controller::DisplayModeController;
use crate::controller::FrameUpdate;
use crate::display::DisplaySink;
use crate::event::Event;
use crate::event::EventReceiver;
use crate::time_sample::TimeSource;

/// Why the render loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// SIGINT, SIGTERM or a closed event channel.
    Interrupted,

    /// The shutdown trigger fired; the host should power off.
    PowerOff,
}

/// The periodic render loop.
pub struct Runner<T, S> {
    controller: DisplayModeController,
    time_source: T,
    display: S,
    tick_interval: std::time::Duration,
}

impl<T, S> Runner<T, S>
where
    T: TimeSource,
    S: DisplaySink,
{
    pub fn new(
        controller: DisplayModeController,
        time_source: T,
        display: S,
        tick_interval: std::time::Duration,
    ) -> Self {
        Self {
            controller,
            time_source,
            display,
            tick_interval,
        }
    }

    /// Renders until cancelled or asked to shut down, then releases the
    /// display.
    pub async fn run(
        mut self,
        cancellation_token: CancellationToken,
        mut event_receiver: EventReceiver,
    ) -> (Exit, S) {
        let mut render_interval = tokio::time::interval(self.tick_interval);
        render_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        let exit = loop {
            tokio::select! {
                biased;

                _ = cancellation_token.cancelled() => {
                    tracing::info!("Cancelled, ending render loop");
                    break Exit::Interrupted;
                }

                event = event_receiver.recv() => {
                    let Some(event) = event else {
                        tracing::error!("Receiver closed");
                        break Exit::Interrupted;
                    };

                    if let Some(exit) = self.handle_event(event) {
                        break exit;
                    }
                }

                _ = render_interval.tick() => self.render(),
            }
        };

        if let Err(error) = self.display.release() {
            tracing::error!(?error, "Failed to release display");
        }

        (exit, self.display)
    }

    fn handle_event(&mut self, event: Event) -> Option<Exit> {
        match event {
            Event::AdvanceMode => {
                self.controller.advance_mode();
                self.render();
                None
            }
            Event::Shutdown => {
                tracing::info!("Shutdown requested");
                Some(Exit::PowerOff)
            }
        }
    }

    /// One frame. Errors are logged and the frame is skipped.
    pub fn render(&mut self) {
        let time = match self.time_source.now() {
            Ok(time) => time,
            Err(error) => {
                tracing::warn!(?error, "Could not read time, skipping frame");
                return;
            }
        };

        let result = match self.controller.next_update(time) {
            FrameUpdate::Full(frame) => self.display.show_frame(&frame),
            FrameUpdate::Tick(update) => self.display.show_tick(&update),
        };

        if let Err(error) = result {
            tracing::warn!(?error, "Could not update display, repainting next frame");
            self.controller.request_full_render();
        }
    }
}
