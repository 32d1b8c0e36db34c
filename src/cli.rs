use crate::config::{DriverConfig, OutputFormat};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parses "ACM filter" files and lists the fields and values each filter references
#[derive(Parser, Debug)]
#[command(name = "acm-filter", author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (default is $HOME/.acm-filter.json)
    #[arg(long, global = true, env = "ACM_FILTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format, overrides the config file
    #[arg(long, global = true, value_enum, env = "ACM_FILTER_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Print values without their surrounding quotes
    #[arg(long, global = true)]
    pub unquote_values: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse every non-blank line of a filter file
    Parse {
        /// Filter file to parse
        file: PathBuf,
    },
    /// Read filters interactively, one per line
    Repl,
}

impl Cli {
    /// Command-line flags take precedence over the config file.
    pub fn apply_overrides(&self, mut config: DriverConfig) -> DriverConfig {
        if let Some(format) = self.format {
            config.format = format;
        }
        if self.unquote_values {
            config.unquote_values = true;
        }
        if self.no_color {
            config.color = false;
        }
        config
    }
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from(["acm-filter", "--format", "json", "--no-color", "parse", "rules.acm"]).unwrap();
        let config = cli.apply_overrides(DriverConfig { unquote_values: true, ..DriverConfig::default() });
        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.unquote_values);
        assert!(!config.color);
        assert!(matches!(cli.command, Commands::Parse { ref file } if file == &PathBuf::from("rules.acm")));
    }

    #[test]
    fn test_parse_requires_file() {
        assert!(Cli::try_parse_from(["acm-filter", "parse"]).is_err());
    }
}
