use tokio::signal::unix::signal;
use tokio::signal::unix::SignalKind;
use tokio_util::sync::CancellationToken;

use crate::event::Event;
use crate::event::EventSender;

/// Maps Unix signals onto clock events.
///
/// `SIGUSR1` advances the display mode, `SIGUSR2` requests a shutdown,
/// `SIGINT` and `SIGTERM` cancel `cancellation_token`.
pub async fn run_signals(
    cancellation_token: CancellationToken,
    event_sender: EventSender,
) -> Result<(), crate::error::Error> {
    let mut usr1 = signal(SignalKind::user_defined1()).map_err(crate::error::Error::Signal)?;
    let mut usr2 = signal(SignalKind::user_defined2()).map_err(crate::error::Error::Signal)?;
    let mut interrupt = signal(SignalKind::interrupt()).map_err(crate::error::Error::Signal)?;
    let mut terminate = signal(SignalKind::terminate()).map_err(crate::error::Error::Signal)?;

    loop {
        let event = tokio::select! {
            _ = cancellation_token.cancelled() => {
                tracing::debug!("Cancelled, no longer listening for signals");
                break;
            }

            _ = usr1.recv() => Event::AdvanceMode,
            _ = usr2.recv() => Event::Shutdown,

            _ = interrupt.recv() => {
                tracing::info!("SIGINT received, shutting down");
                cancellation_token.cancel();
                break;
            }

            _ = terminate.recv() => {
                tracing::info!("SIGTERM received, shutting down");
                cancellation_token.cancel();
                break;
            }
        };

        tracing::debug!(?event, "Signal received");
        if event_sender.send(event).await.is_err() {
            tracing::error!(?event, "Receiver closed");
            return Err(crate::error::Error::EventChannelClosed);
        }
    }

    Ok(())
}
