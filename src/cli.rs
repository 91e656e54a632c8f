use clap::Parser;

#[derive(Debug, Parser)]
pub struct Cli {
    #[command(flatten)]
    pub verbosity: clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>,

    /// Path of the configuration file
    #[clap(long, short)]
    pub config: camino::Utf8PathBuf,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Show the time on the ring until interrupted
    Run,

    VerifyConfig,

    /// Print the frame for a time of day instead of showing it
    Render {
        /// Time as HH:MM:SS, 24 or 12 hour
        time: String,

        /// Marker mode, defaults to the configured one
        #[clap(long, value_enum)]
        mode: Option<crate::mode::DisplayMode>,
    },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use clap::Parser;

    use super::*;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_render_args() {
        let cli = Cli::parse_from([
            "ring-clock",
            "-c",
            "clock.toml",
            "render",
            "15:00:00",
            "--mode",
            "hour-only",
        ]);

        let Command::Render { time, mode } = cli.command else {
            panic!("Expected render command");
        };
        assert_eq!(time, "15:00:00");
        assert_eq!(mode, Some(crate::mode::DisplayMode::HourOnly));
        assert_eq!(cli.config, "clock.toml");
    }
}
