use std::path::PathBuf;

use tracing::Level;

use crate::cli::Cli;

pub const DEFAULT_DATA_FILE: &str = "appointments.json";
pub const DEFAULT_HORIZON_DAYS: u32 = 7;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_file: PathBuf,
    /// Days shown by `upcoming` when none are given.
    pub horizon_days: u32,
    pub log_level: Level,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        // Each -v raises the level one step above what was configured.
        let log_level = match cli.verbose {
            0 => cli.log_level,
            1 => cli.log_level.max(Level::INFO),
            2 => cli.log_level.max(Level::DEBUG),
            _ => Level::TRACE,
        };

        Config {
            data_file: cli.file.clone(),
            horizon_days: cli.horizon,
            log_level,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            horizon_days: DEFAULT_HORIZON_DAYS,
            log_level: Level::WARN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn defaults_match_cli_defaults() {
        let cli = Cli::try_parse_from(["datebook"]).unwrap();
        let config = Config::from_cli(&cli);
        let default = Config::default();
        assert_eq!(config.data_file, default.data_file);
        assert_eq!(config.horizon_days, default.horizon_days);
        assert_eq!(config.log_level, default.log_level);
    }

    #[test]
    fn verbose_raises_level() {
        let cli = Cli::try_parse_from(["datebook", "-v"]).unwrap();
        assert_eq!(Config::from_cli(&cli).log_level, Level::INFO);

        let cli = Cli::try_parse_from(["datebook", "-vv"]).unwrap();
        assert_eq!(Config::from_cli(&cli).log_level, Level::DEBUG);

        // never lowers an explicit level
        let cli = Cli::try_parse_from(["datebook", "--log-level", "trace", "-v"]).unwrap();
        assert_eq!(Config::from_cli(&cli).log_level, Level::TRACE);
    }

    #[test]
    fn file_and_horizon_flags() {
        let args = ["datebook", "--file", "/tmp/x.json", "--horizon", "30"];
        let cli = Cli::try_parse_from(args).unwrap();
        let config = Config::from_cli(&cli);
        assert_eq!(config.data_file, PathBuf::from("/tmp/x.json"));
        assert_eq!(config.horizon_days, 30);
    }
}
