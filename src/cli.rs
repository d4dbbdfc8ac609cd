//! CLI definitions for Progress Helper.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Progress Helper CLI.
#[derive(Parser)]
#[command(name = "progress-helper")]
#[command(about = "Mark online-course sections complete in your open browser tab")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ~/.progress-helper/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Chrome remote debugging endpoint, overrides the config file
    #[arg(short, long, global = true, env = "PROGRESS_HELPER_ENDPOINT")]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Mark sections and items complete, e.g. "1;2:1,3-4;5-7"
    Tick {
        /// Spec to run (default: the last saved spec)
        spec: Option<String>,

        /// Milliseconds to wait after each click
        #[arg(short, long)]
        delay: Option<u64>,
    },

    /// Mark whole sections complete by number
    Select {
        /// 1-based section numbers
        #[arg(required = true, num_args = 1..)]
        sections: Vec<u32>,
    },

    /// List the sections found on the page
    Sections {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Mark every section complete
    MarkAll,

    /// Save a spec for later runs
    Save {
        spec: String,
    },

    /// Print the saved spec
    Last,

    /// Show how a spec is interpreted without touching the browser
    Parse {
        spec: String,
    },
}

/// How `sections` prints its listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Table,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tick_with_delay() {
        let cli =
            Cli::try_parse_from(["progress-helper", "tick", "1;2:1,3", "--delay", "50"]).unwrap();
        match cli.command {
            Commands::Tick { spec, delay } => {
                assert_eq!(spec.as_deref(), Some("1;2:1,3"));
                assert_eq!(delay, Some(50));
            }
            _ => panic!("expected tick"),
        }
    }

    #[test]
    fn test_parse_tick_without_spec() {
        let cli = Cli::try_parse_from(["progress-helper", "tick"]).unwrap();
        assert!(matches!(cli.command, Commands::Tick { spec: None, delay: None }));
    }

    #[test]
    fn test_select_requires_sections() {
        assert!(Cli::try_parse_from(["progress-helper", "select"]).is_err());
        let cli = Cli::try_parse_from(["progress-helper", "select", "1", "4"]).unwrap();
        assert!(matches!(cli.command, Commands::Select { ref sections } if sections == &[1, 4]));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "progress-helper",
            "sections",
            "--endpoint",
            "http://127.0.0.1:9333",
            "--config",
            "/tmp/ph.toml",
        ])
        .unwrap();
        assert_eq!(cli.endpoint.as_deref(), Some("http://127.0.0.1:9333"));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/ph.toml")));
        assert!(matches!(
            cli.command,
            Commands::Sections {
                format: OutputFormat::Table
            }
        ));
    }

    #[test]
    fn test_sections_format_values() {
        let cli = Cli::try_parse_from(["progress-helper", "sections", "-f", "json"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Sections {
                format: OutputFormat::Json
            }
        ));

        let err = Cli::try_parse_from(["progress-helper", "sections", "--format", "yaml"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn test_mark_all_subcommand_name() {
        let cli = Cli::try_parse_from(["progress-helper", "mark-all"]).unwrap();
        assert!(matches!(cli.command, Commands::MarkAll));
    }
}
