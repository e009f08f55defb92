//! Shared CLI definitions for distui.
//!
//! Used by the main application and by the build script (manpage).

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// How the confirmed parameters are written to stdout.
#[derive(Debug, Default, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Single-line JSON object, keys in parameter order
    #[default]
    Json,
    /// One `name = value` line per parameter
    Text,
}

impl OutputFormat {
    /// Parse a format name as written in the config file ("json", "text").
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "text" | "txt" => Some(Self::Text),
            _ => None,
        }
    }
}

/// Command-line arguments for distui
#[derive(Clone, Parser, Debug, Default)]
#[command(
    name = "distui",
    version,
    about = "Pick continuous distribution parameters in the Terminal",
    long_about = "Interactively choose a continuous probability distribution and its \
                  parameters while previewing the density curve. On confirmation (Enter) \
                  the chosen parameters are printed to stdout; Esc cancels."
)]
pub struct Args {
    /// Output format for the confirmed parameters (default: json, or the config file's output.format)
    #[arg(long = "format", value_enum)]
    pub format: Option<OutputFormat>,

    /// Directory that PNG/EPS exports of the density preview are written to (default: current directory)
    #[arg(long = "export-dir", value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    /// Enable debug mode: on-screen event counters and a log file in the cache directory
    #[arg(long = "debug", action)]
    pub debug: bool,

    /// Clear all cache data (log files) and exit
    #[arg(long = "clear-cache", action)]
    pub clear_cache: bool,

    /// Write the default configuration file and exit
    #[arg(long = "generate-config", action)]
    pub generate_config: bool,

    /// Overwrite an existing configuration file (used with --generate-config)
    #[arg(long = "force", action, requires = "generate_config")]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn args_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn parse_format_and_flags() {
        let args = Args::parse_from(["distui", "--format", "text", "--debug"]);
        assert_eq!(args.format, Some(OutputFormat::Text));
        assert!(args.debug);
        assert!(!args.generate_config);
    }

    #[test]
    fn force_requires_generate_config() {
        assert!(Args::try_parse_from(["distui", "--force"]).is_err());
        let args = Args::parse_from(["distui", "--generate-config", "--force"]);
        assert!(args.force);
    }

    #[test]
    fn output_format_from_name() {
        assert_eq!(OutputFormat::from_name("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_name(" text "), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::from_name("yaml"), None);
    }
}
