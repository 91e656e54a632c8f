use ddp_rs::connection::DDPConnection;
use rgb::RGB8;

/// Sends the ring to a DDP receiver, one RGB triple per LED.
pub struct DdpWriter {
    connection: DDPConnection,
}

impl DdpWriter {
    pub fn new(connection: DDPConnection) -> Self {
        Self { connection }
    }

    pub fn connect(
        host: std::net::IpAddr,
        port: u16,
        udp_port: u16,
    ) -> Result<Self, crate::error::Error> {
        let connection = DDPConnection::try_new(
            std::net::SocketAddr::new(host, port),
            ddp_rs::protocol::PixelConfig::default(), // RGB, 8 bits per channel
            ddp_rs::protocol::ID::Default,
            std::net::UdpSocket::bind(("0.0.0.0", udp_port))
                .map_err(crate::error::Error::UDPBind)?,
        )?;

        tracing::info!(%host, port, udp_port, "Connected DDP display");
        Ok(Self::new(connection))
    }
}

impl smart_leds_trait::SmartLedsWrite for DdpWriter {
    type Error = ddp_rs::error::DDPError;
    type Color = RGB8;

    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        self.connection
            .write(
                &iterator
                    .into_iter()
                    .map(|c| c.into())
                    .flat_map(|rgb| [rgb.r, rgb.g, rgb.b].into_iter())
                    .collect::<Vec<u8>>(),
            )
            .map(drop)
    }
}

/// Writes nothing, only traces the lit LEDs. For dry runs without hardware.
#[derive(Debug, Default)]
pub struct LogWriter {
    last: Vec<RGB8>,
}

impl smart_leds_trait::SmartLedsWrite for LogWriter {
    type Error = std::convert::Infallible;
    type Color = RGB8;

    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        let colors: Vec<RGB8> = iterator.into_iter().map(Into::into).collect();
        if colors != self.last {
            let lit = colors
                .iter()
                .enumerate()
                .filter(|(_, color)| **color != RGB8::default())
                .map(|(position, color)| format!("{position}={}", crate::color::to_hex(*color)))
                .collect::<Vec<_>>()
                .join(" ");

            tracing::info!(%lit, "Ring");
            self.last = colors;
        }

        Ok(())
    }
}

/// WS2812 ring on the Raspberry Pi SPI bus.
///
/// Needs `core_freq=250` in `/boot/config.txt` for a stable SPI clock.
#[cfg(feature = "rpi")]
pub fn spi(
    bus: crate::config::SpiBus,
) -> Result<ws2812_spi::hosted::Ws2812<rppal::spi::Spi>, crate::error::Error> {
    // three SPI bits per WS2812 bit at 800kHz
    let spi_freq = 800_000 * 3;

    let spi = rppal::spi::Spi::new(
        bus.into(),
        rppal::spi::SlaveSelect::Ss0,
        spi_freq,
        rppal::spi::Mode::Mode0,
    )?;

    tracing::info!(?bus, spi_freq, "Opened SPI display");
    Ok(ws2812_spi::hosted::Ws2812::new(spi))
}
