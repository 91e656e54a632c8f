/// Requests posted by the triggers to the render loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Switch to the next display mode.
    AdvanceMode,

    /// Blank the ring and power the host off.
    Shutdown,
}

/// Capacity of the channel between triggers and the render loop.
pub const CHANNEL_CAPACITY: usize = 16;

pub type EventSender = tokio::sync::mpsc::Sender<Event>;
pub type EventReceiver = tokio::sync::mpsc::Receiver<Event>;

pub fn channel() -> (EventSender, EventReceiver) {
    tokio::sync::mpsc::channel(CHANNEL_CAPACITY)
}

/// Posts `event` without waiting, for callers outside the runtime.
pub fn post(sender: &EventSender, event: Event) {
    if let Err(error) = sender.try_send(event) {
        tracing::warn!(?error, "Dropping event");
    } else {
        tracing::debug!(?event, "Posted event");
    }
}
