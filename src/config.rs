//! Configuration and CLI argument handling

use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser)]
#[command(name = "take-five")]
#[command(about = "A state-managed Pomodoro timer server for browser frontends")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20653")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Focus phase length in minutes
    #[arg(short, long, default_value = "25")]
    pub work: i64,

    /// Break phase length in minutes
    #[arg(short, long = "break", default_value = "5")]
    pub break_minutes: i64,

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
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_cycle() {
        let config = <Config as Parser>::try_parse_from(["take-five"]).unwrap();
        assert_eq!(config.work, 25);
        assert_eq!(config.break_minutes, 5);
        assert_eq!(config.port, 20653);
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn phase_lengths_are_parsed_from_flags() {
        let config =
            <Config as Parser>::try_parse_from(["take-five", "--work", "50", "--break", "10", "-v"])
                .unwrap();
        assert_eq!(config.work, 50);
        assert_eq!(config.break_minutes, 10);
        assert_eq!(config.log_level(), "debug");
    }
}
