//! Configuration and CLI argument handling

use std::time::Duration;

use clap::Parser;

use crate::timer::EntryPolicy;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "digit-timer")]
#[command(about = "A digit-entry countdown timer served over HTTP")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Wall-clock milliseconds between ticks (each tick counts down one second)
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Refuse a seventh digit even when the oldest digit is 0
    #[arg(long)]
    pub strict_entry: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn entry_policy(&self) -> EntryPolicy {
        if self.strict_entry {
            EntryPolicy::Strict
        } else {
            EntryPolicy::Compatible
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["digit-timer"]).unwrap();
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.tick_period(), Duration::from_secs(1));
        assert_eq!(config.entry_policy(), EntryPolicy::Compatible);
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn test_flags() {
        let config = Config::try_parse_from([
            "digit-timer",
            "--strict-entry",
            "--tick-ms",
            "100",
            "-v",
            "-p",
            "9000",
        ])
        .unwrap();
        assert_eq!(config.entry_policy(), EntryPolicy::Strict);
        assert_eq!(config.tick_period(), Duration::from_millis(100));
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn test_zero_tick_rejected() {
        assert!(Config::try_parse_from(["digit-timer", "--tick-ms", "0"]).is_err());
    }
}
