#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Setting up error reporting failed")]
    InstallingColorEyre(#[source] color_eyre::Report),

    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    #[error("DDP error")]
    Ddp(#[from] ddp_rs::error::DDPError),

    #[error("Failed to parse time '{}'", .input)]
    TimeParsing {
        input: String,
        #[source]
        source: time::error::Parse,
    },

    #[error("Failed to bind UDP socket")]
    UDPBind(#[source] std::io::Error),

    #[error("Failed to install signal handler")]
    Signal(#[source] std::io::Error),

    #[error("Event channel closed")]
    EventChannelClosed,

    #[error("Failed to run power-off command '{}'", .command)]
    PowerOff {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Power-off command '{}' exited with {}", .command, .status)]
    PowerOffStatus {
        command: String,
        status: std::process::ExitStatus,
    },

    #[cfg(feature = "rpi")]
    #[error("GPIO error")]
    Gpio(#[from] rppal::gpio::Error),

    #[cfg(feature = "rpi")]
    #[error("SPI error")]
    Spi(#[from] rppal::spi::Error),
}

impl From<std::convert::Infallible> for Error {
    fn from(value: std::convert::Infallible) -> Self {
        match value {}
    }
}
