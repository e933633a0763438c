//! Application orchestration and command routing.
//!
//! Handles command-line argument parsing and delegates to appropriate command handlers.

use crate::commands;
use crate::logging;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

/// Fits recorded power levels to a display width and draws them as a waveform
#[derive(Parser, Debug)]
#[command(name = "powertrace")]
#[command(version)]
#[command(about = "Fits recorded power levels to a display width and draws them as a waveform")]
#[command(long_about = "Fits recorded power levels to a display width and draws them as a waveform.\n\nA power trace is a text file with one peak level (dBFS) per line, polled\nat a fixed interval while recording. Traces can be built from WAV files\nwith the 'meter' command.\n\nEXAMPLES:\n    # Build a trace from a recording and draw it\n    $ powertrace meter take.wav -o take.trace\n    $ powertrace render take.trace\n    \n    # Draw 40 columns wide and 10 rows tall\n    $ powertrace render take.trace -w 40 -H 10\n    \n    # Pipe a trace in and dump its buckets as JSON\n    $ powertrace meter take.wav | powertrace buckets - --json")]
#[command(
    after_help = "CONFIGURATION:\n    Config file:        ~/.config/powertrace/powertrace.toml\n    Logs:               ~/.local/state/powertrace/powertrace.log.*"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Draw a power trace as a vertical-bar waveform
    ///
    /// Levels are averaged into one bucket per column and bars are scaled
    /// between the quietest and loudest level of the trace.
    #[command(visible_alias = "r")]
    Render {
        /// Trace file to draw, or '-' for stdin
        #[arg(value_name = "TRACE")]
        trace: PathBuf,

        /// Width in columns (defaults to the configured width)
        #[arg(short, long)]
        width: Option<u16>,

        /// Height in rows (defaults to the configured height)
        #[arg(short = 'H', long)]
        height: Option<u16>,
    },

    /// Print the buckets a power trace is fitted into
    #[command(visible_alias = "b")]
    Buckets {
        /// Trace file to bucket, or '-' for stdin
        #[arg(value_name = "TRACE")]
        trace: PathBuf,

        /// Target width in columns (defaults to the configured width)
        #[arg(short, long)]
        width: Option<u16>,

        /// Print the bucket set as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build a power trace from a WAV file
    ///
    /// The first channel is metered once per polling interval and the peak
    /// level of each interval is written in dBFS.
    #[command(visible_alias = "m")]
    Meter {
        /// WAV file to meter
        #[arg(value_name = "WAV")]
        wav: PathBuf,

        /// Write the trace to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Polling interval in milliseconds (defaults to the configured interval)
        #[arg(short, long, value_name = "MS")]
        interval_ms: Option<u64>,
    },

    /// Open configuration file in your preferred editor
    ///
    /// Uses $EDITOR environment variable or falls back to nano/vi.
    #[command(visible_alias = "c")]
    Config,

    /// Show recent log entries from the application
    Logs,

    /// Generate shell completion script
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Runs the application based on command-line arguments.
///
/// # Errors
/// - If logging initialization fails
/// - If command execution fails
pub fn run() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    // Commands that don't need logging
    match &cli.command {
        Commands::Completions { shell } => {
            generate(*shell, &mut Cli::command(), "powertrace", &mut io::stdout());
            return Ok(());
        }
        Commands::Logs => return commands::handle_logs(),
        _ => {}
    }

    logging::init_logging()?;
    tracing::debug!("Running {:?}", cli.command);

    match cli.command {
        Commands::Render {
            trace,
            width,
            height,
        } => commands::handle_render(&trace, width, height),
        Commands::Buckets { trace, width, json } => commands::handle_buckets(&trace, width, json),
        Commands::Meter {
            wav,
            output,
            interval_ms,
        } => commands::handle_meter(&wav, output.as_deref(), interval_ms),
        Commands::Config => commands::handle_config(),
        Commands::Completions { .. } | Commands::Logs => {
            unreachable!("These commands are handled earlier")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render_overrides() {
        let cli = Cli::try_parse_from(["powertrace", "render", "take.trace", "-w", "40", "-H", "10"])
            .unwrap();
        match cli.command {
            Commands::Render {
                trace,
                width,
                height,
            } => {
                assert_eq!(trace, PathBuf::from("take.trace"));
                assert_eq!(width, Some(40));
                assert_eq!(height, Some(10));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_meter_from_alias() {
        let cli = Cli::try_parse_from(["powertrace", "m", "take.wav", "--interval-ms", "100"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Meter {
                interval_ms: Some(100),
                output: None,
                ..
            }
        ));
    }

    #[test]
    fn test_negative_width_is_rejected_by_parser() {
        assert!(Cli::try_parse_from(["powertrace", "render", "t", "-w", "-1"]).is_err());
    }
}
