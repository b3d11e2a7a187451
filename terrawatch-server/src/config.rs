use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use std::path::PathBuf;
use std::time::Duration;

use terrawatch_core::config::POLL_INTERVAL_MS;
use terrawatch_core::{EngineConfig, PositionOptions, SearchPolicy};

#[derive(Parser, Clone, Debug)]
#[command(version, about = "Geofence monitor for field sales territories")]
pub struct Cli {
    #[command(flatten)]
    pub verbose: Verbosity<InfoLevel>,

    /// Assignment snapshot (JSON) for this session
    #[arg(short, long)]
    pub snapshot: PathBuf,

    /// Recorded track (JSON array of fixes and failures) to replay as the device position
    #[arg(short, long)]
    pub track: PathBuf,

    /// Report the nearest foreign zone/point instead of the first one in catalog order
    #[arg(long, default_value_t = false)]
    pub nearest: bool,
}

impl Cli {
    pub fn monitor_config(&self) -> MonitorConfig {
        let policy = if self.nearest {
            SearchPolicy::Nearest
        } else {
            SearchPolicy::FirstMatch
        };
        MonitorConfig {
            engine: EngineConfig::default().with_policy(policy),
            ..MonitorConfig::default()
        }
    }
}

/// Settings for one monitoring session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonitorConfig {
    pub poll_interval: Duration,
    pub position_options: PositionOptions,
    pub engine: EngineConfig,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        MonitorConfig {
            poll_interval: Duration::from_millis(POLL_INTERVAL_MS),
            position_options: PositionOptions::default(),
            engine: EngineConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_monitor_config() {
        let config = MonitorConfig::default();
        assert_eq!(config.poll_interval, Duration::from_secs(5));
        assert_eq!(config.position_options.timeout_ms, 10_000);
        assert_eq!(config.position_options.max_age_ms, 5000);
        assert!(config.position_options.high_accuracy);
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["terrawatch", "--snapshot", "s.json", "--track", "t.json"]).unwrap();
        assert_eq!(cli.snapshot, PathBuf::from("s.json"));
        assert!(!cli.nearest);
        assert_eq!(cli.monitor_config().engine.zone_policy, SearchPolicy::FirstMatch);

        let cli =
            Cli::try_parse_from(["terrawatch", "-s", "s.json", "-t", "t.json", "--nearest"]).unwrap();
        assert_eq!(cli.monitor_config().engine.point_policy, SearchPolicy::Nearest);
    }

    #[test]
    fn test_cli_requires_inputs() {
        assert!(Cli::try_parse_from(["terrawatch", "--snapshot", "s.json"]).is_err());
    }
}
