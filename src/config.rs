use std::num::NonZeroUsize;

/// Shortest debounce the buttons may be configured with.
pub const MIN_DEBOUNCE: std::time::Duration = std::time::Duration::from_millis(400);

#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Debug-level logging for this crate, regardless of `-v`.
    #[serde(default)]
    pub debug: bool,

    #[serde(default)]
    pub ring: RingConfig,

    pub display: DisplayConfig,

    #[serde(default)]
    pub palette: crate::color::Palette,

    #[serde(default)]
    pub buttons: ButtonsConfig,

    #[serde(default)]
    pub shutdown: ShutdownConfig,
}

#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RingConfig {
    #[serde(default = "default_ring_size")]
    pub size: usize,

    #[serde(default)]
    pub initial_mode: crate::mode::DisplayMode,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            size: default_ring_size(),
            initial_mode: crate::mode::DisplayMode::default(),
        }
    }
}

fn default_ring_size() -> usize {
    60
}

#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    /// Scale applied to every color, 0.0 to 1.0.
    #[serde(default = "default_brightness")]
    pub brightness: f32,

    #[serde(with = "humantime_serde", default = "default_tick_interval")]
    pub tick_interval: std::time::Duration,

    pub backend: Backend,
}

fn default_brightness() -> f32 {
    0.5
}

fn default_tick_interval() -> std::time::Duration {
    std::time::Duration::from_millis(50)
}

impl DisplayConfig {
    pub fn brightness_u8(&self) -> u8 {
        // validated to 0.0..=1.0 on load
        (self.brightness * 255.0).round() as u8
    }
}

#[derive(Debug, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Backend {
    /// DDP over UDP, e.g. to a WLED controller.
    Ddp {
        host: std::net::IpAddr,
        #[serde(default = "default_ddp_port")]
        port: u16,
        #[serde(default = "default_ddp_port")]
        udp_port: u16,
    },

    /// Only logs what would be shown.
    Log,

    /// WS2812 ring on the Raspberry Pi SPI bus.
    #[cfg(feature = "rpi")]
    Spi {
        #[serde(default)]
        bus: SpiBus,
    },
}

fn default_ddp_port() -> u16 {
    4048
}

#[cfg(feature = "rpi")]
#[derive(Debug, Default, Clone, Copy, serde::Deserialize)]
pub enum SpiBus {
    #[default]
    Spi0,
    Spi1,
}

#[cfg(feature = "rpi")]
impl From<SpiBus> for rppal::spi::Bus {
    fn from(value: SpiBus) -> Self {
        match value {
            SpiBus::Spi0 => rppal::spi::Bus::Spi0,
            SpiBus::Spi1 => rppal::spi::Bus::Spi1,
        }
    }
}

#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ButtonsConfig {
    /// BCM number of the mode button.
    pub mode_pin: u8,

    /// BCM number of the shutdown button.
    pub shutdown_pin: u8,

    #[serde(with = "humantime_serde")]
    pub debounce: std::time::Duration,
}

impl Default for ButtonsConfig {
    fn default() -> Self {
        Self {
            mode_pin: 23,
            shutdown_pin: 20,
            debounce: MIN_DEBOUNCE,
        }
    }
}

#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShutdownConfig {
    /// Program and arguments run on the shutdown trigger.
    pub command: Vec<String>,
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self {
            command: vec![String::from("sudo"), String::from("poweroff")],
        }
    }
}

impl Config {
    pub async fn load(path: &camino::Utf8Path) -> Result<Self, ConfigError> {
        let config_str =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ConfigError::ReadingFile {
                    path: path.to_path_buf(),
                    source,
                })?;

        Self::parse(&config_str)
    }

    pub fn parse(config_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(config_str).map_err(ConfigError::ParsingConfig)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.ring.size == 0 {
            return Err(ConfigError::EmptyRing);
        }

        if !(0.0..=1.0).contains(&self.display.brightness) {
            return Err(ConfigError::Brightness(self.display.brightness));
        }

        if self.display.tick_interval.is_zero() {
            return Err(ConfigError::TickInterval);
        }

        if self.buttons.debounce < MIN_DEBOUNCE {
            return Err(ConfigError::Debounce(self.buttons.debounce));
        }

        if self.buttons.mode_pin == self.buttons.shutdown_pin {
            return Err(ConfigError::SharedButtonPin(self.buttons.mode_pin));
        }

        if self.shutdown.command.is_empty() {
            return Err(ConfigError::EmptyShutdownCommand);
        }

        Ok(())
    }

    pub fn ring_size(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.ring.size).unwrap_or(NonZeroUsize::MIN)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file from path '{}'", .path)]
    ReadingFile {
        path: camino::Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    ParsingConfig(#[from] toml::de::Error),

    #[error("Ring size must be at least 1")]
    EmptyRing,

    #[error("Brightness must be between 0.0 and 1.0, got {}", .0)]
    Brightness(f32),

    #[error("Tick interval must not be zero")]
    TickInterval,

    #[error("Button debounce must be at least {:?}, got {:?}", MIN_DEBOUNCE, .0)]
    Debounce(std::time::Duration),

    #[error("Mode and shutdown button cannot share pin {}", .0)]
    SharedButtonPin(u8),

    #[error("Shutdown command must not be empty")]
    EmptyShutdownCommand,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::DisplayMode;

    #[test]
    fn test_testfile_ddp() {
        let config = Config::parse(include_str!("../test/ddp.toml")).unwrap();

        assert!(!config.debug);
        assert_eq!(config.ring.size, 60);
        assert_eq!(config.ring.initial_mode, DisplayMode::BothMarkers);
        assert_eq!(config.display.brightness_u8(), 128);
        assert_eq!(
            config.display.tick_interval,
            std::time::Duration::from_millis(50)
        );
        assert!(matches!(
            config.display.backend,
            Backend::Ddp {
                port: 4048,
                udp_port: 4048,
                ..
            }
        ));
        assert_eq!(config.shutdown.command, ["sudo", "poweroff"]);
    }

    #[test]
    fn test_testfile_log_minimal() {
        let config = Config::parse(include_str!("../test/log_minimal.toml")).unwrap();

        assert!(matches!(config.display.backend, Backend::Log));
        assert_eq!(config.ring_size().get(), 60);
        assert_eq!(config.buttons.mode_pin, 23);
        assert_eq!(config.buttons.shutdown_pin, 20);
        assert_eq!(config.buttons.debounce, MIN_DEBOUNCE);
        assert_eq!(config.palette, crate::color::Palette::default());
    }

    #[test]
    fn test_testfile_full() {
        let config = Config::parse(include_str!("../test/full.toml")).unwrap();

        assert!(config.debug);
        assert_eq!(config.ring.size, 24);
        assert_eq!(config.ring.initial_mode, DisplayMode::QuarterOnly);
        assert_eq!(config.display.brightness_u8(), 255);
        assert_eq!(
            config.display.tick_interval,
            std::time::Duration::from_millis(100)
        );
        assert_eq!(
            config.palette.minute_second,
            Some(crate::color::Color {
                r: 140,
                g: 0,
                b: 120
            })
        );
        assert_eq!(
            config.buttons.debounce,
            std::time::Duration::from_millis(500)
        );
        assert_eq!(config.shutdown.command, ["systemctl", "poweroff"]);
    }

    #[test]
    fn test_zero_ring_is_rejected() {
        let result = Config::parse(
            r#"
            [ring]
            size = 0

            [display.backend]
            type = "log"
            "#,
        );
        assert!(matches!(result, Err(ConfigError::EmptyRing)));
    }

    #[test]
    fn test_brightness_out_of_range() {
        let result = Config::parse(
            r#"
            [display]
            brightness = 1.5

            [display.backend]
            type = "log"
            "#,
        );
        assert!(matches!(result, Err(ConfigError::Brightness(_))));
    }

    #[test]
    fn test_short_debounce_is_rejected() {
        let result = Config::parse(
            r#"
            [display.backend]
            type = "log"

            [buttons]
            mode_pin = 23
            shutdown_pin = 20
            debounce = "100ms"
            "#,
        );
        assert!(matches!(result, Err(ConfigError::Debounce(_))));
    }

    #[test]
    fn test_empty_shutdown_command() {
        let result = Config::parse(
            r#"
            [display.backend]
            type = "log"

            [shutdown]
            command = []
            "#,
        );
        assert!(matches!(result, Err(ConfigError::EmptyShutdownCommand)));
    }

    #[test]
    fn test_unknown_backend() {
        let result = Config::parse(
            r#"
            [display.backend]
            type = "hdmi"
            "#,
        );
        assert!(matches!(result, Err(ConfigError::ParsingConfig(_))));
    }
}
