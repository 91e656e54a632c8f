use tokio_util::sync::CancellationToken;

use crate::composer::FrameComposer;
use crate::controller::DisplayModeController;
use crate::display::DisplaySink;
use crate::display::RingDisplay;
use crate::geometry::RingGeometry;
use crate::runner::Exit;
use crate::time_sample::LocalTimeSource;

mod cli;
mod color;
mod composer;
mod config;
mod controller;
mod display;
mod error;
mod event;
mod frame;
mod geometry;
#[cfg(feature = "rpi")]
mod gpio;
mod logging;
mod mode;
mod power;
mod rules;
mod runner;
mod systemd;
mod time_sample;
mod triggers;
mod writer;

#[tokio::main(flavor = "current_thread")]
async fn main() -> color_eyre::eyre::Result<()> {
    setup_panic();
    color_eyre::install().map_err(crate::error::Error::InstallingColorEyre)?;
    let cli = <crate::cli::Cli as clap::Parser>::parse();
    let cfg = crate::config::Config::load(&cli.config).await?;
    crate::logging::setup(cli.verbosity, cfg.debug);
    let time_source = LocalTimeSource::new();

    match cli.command {
        cli::Command::Run => {
            run(cfg, time_source).await?;
        }
        cli::Command::VerifyConfig => {
            tracing::info!("Configuration verified");
        }
        cli::Command::Render { time, mode } => {
            render(&cfg, &time, mode)?;
        }
    }

    Ok(())
}

fn setup_panic() {
    human_panic::setup_panic!(human_panic::Metadata::new(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    ));
}

async fn run(
    config: crate::config::Config,
    time_source: LocalTimeSource,
) -> Result<(), crate::error::Error> {
    let notifier = systemd::ServiceNotifier::new();
    let geometry = RingGeometry::new(config.ring_size());
    let size = geometry.size();
    let brightness = config.display.brightness_u8();
    let controller = DisplayModeController::new(
        FrameComposer::new(geometry, config.palette.clone()),
        config.ring.initial_mode,
    );

    let (event_sender, event_receiver) = crate::event::channel();
    let cancellation_token = CancellationToken::new();
    let signals = tokio::task::spawn({
        let cancellation_token = cancellation_token.clone();
        let event_sender = event_sender.clone();
        triggers::run_signals(cancellation_token, event_sender)
    });

    #[cfg(feature = "rpi")]
    let _buttons = gpio::Buttons::setup(&config.buttons, &event_sender)?;
    drop(event_sender);

    let parts = RunParts {
        controller,
        time_source,
        tick_interval: config.display.tick_interval,
        cancellation_token: cancellation_token.clone(),
        event_receiver,
        notifier: &notifier,
    };

    let exit = match &config.display.backend {
        config::Backend::Ddp {
            host,
            port,
            udp_port,
        } => {
            let writer = writer::DdpWriter::connect(*host, *port, *udp_port)?;
            parts.drive(RingDisplay::new(writer, size, brightness)).await
        }

        config::Backend::Log => {
            let writer = writer::LogWriter::default();
            parts.drive(RingDisplay::new(writer, size, brightness)).await
        }

        #[cfg(feature = "rpi")]
        config::Backend::Spi { bus } => {
            let writer = writer::spi(*bus)?;
            parts.drive(RingDisplay::new(writer, size, brightness)).await
        }
    };

    cancellation_token.cancel();
    match signals.await {
        Ok(Ok(())) => {}
        Ok(Err(error)) => tracing::warn!(?error, "Signal handling ended with error"),
        Err(error) => tracing::warn!(?error, "Signal task failed"),
    }

    match exit {
        Exit::Interrupted => notifier.set_stopping("interrupted"),
        Exit::PowerOff => {
            notifier.set_stopping("power off");
            if let Err(error) = power::power_off(&config.shutdown.command).await {
                tracing::error!(?error, "Power-off request failed");
            }
        }
    }

    Ok(())
}

/// Everything the render loop needs apart from the display.
struct RunParts<'a> {
    controller: DisplayModeController,
    time_source: LocalTimeSource,
    tick_interval: std::time::Duration,
    cancellation_token: CancellationToken,
    event_receiver: crate::event::EventReceiver,
    notifier: &'a systemd::ServiceNotifier,
}

impl RunParts<'_> {
    async fn drive<S: DisplaySink>(self, display: S) -> Exit {
        let mode = self.controller.mode();
        let runner = runner::Runner::new(
            self.controller,
            self.time_source,
            display,
            self.tick_interval,
        );

        self.notifier.set_running(mode);
        tracing::info!(?mode, "Clock running");

        let (exit, _display) = runner
            .run(self.cancellation_token, self.event_receiver)
            .await;
        tracing::info!(?exit, "Clock stopped");
        exit
    }
}

fn render(
    config: &crate::config::Config,
    at: &str,
    mode: Option<crate::mode::DisplayMode>,
) -> Result<(), crate::error::Error> {
    let format = time::macros::format_description!("[hour]:[minute]:[second]");
    let parsed = time::Time::parse(at, format).map_err(|source| {
        crate::error::Error::TimeParsing {
            input: at.to_string(),
            source,
        }
    })?;

    let sample = crate::time_sample::TimeSample::from(parsed);
    let composer = FrameComposer::new(RingGeometry::new(config.ring_size()), config.palette.clone());
    let frame = composer.render_full_frame(sample, mode.unwrap_or(config.ring.initial_mode));

    for (position, color) in frame.lit() {
        println!("{position:>3} {}", crate::color::to_hex(color));
    }

    Ok(())
}
