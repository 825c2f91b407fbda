use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "focus-keeper")]
#[command(about = "Run timed focus sessions from the terminal")]
#[command(long_about = "focus-keeper - background focus timers

Runs one or more named countdown sessions side by side, shows them in a
live dashboard, and raises a desktop notification with an audible cue when
a session finishes. Finished sessions are kept in a local history.

QUICK START:
  focus-keeper start \"Deep Work\"              25-minute session (default)
  focus-keeper start \"Write@50m\" \"Tea@4m\"     Two sessions at once
  focus-keeper start \"Read@20m\" --plain       Single-line countdown
  focus-keeper history                         Recently finished sessions

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  focus-keeper <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output,
    /// or 'json' for machine-readable output suitable for scripting.
    /// Defaults to `general.default_output` from the config file.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start one or more focus sessions
    ///
    /// Each session is given as TITLE or TITLE@DURATION. Sessions run side
    /// by side in a live dashboard until they finish or you quit; quitting
    /// stops whatever is still running.
    ///
    /// # Examples
    ///
    ///   focus-keeper start "Deep Work"
    ///   focus-keeper start "Write@50m" "Email@15m"
    ///   focus-keeper start "Read" -d 45m
    ///   focus-keeper start "Tea@4m" --plain
    ///
    /// # Durations
    ///
    ///   25m, 1h, 1h30m, 90s, or a bare number of minutes
    ///
    /// # Dashboard keys
    ///
    ///   j/k, arrows     Select session
    ///   space, p        Pause or resume
    ///   x               Stop selected session
    ///   q, Esc, Ctrl-C  Stop all and quit
    #[command(alias = "s")]
    Start(StartArgs),

    /// Show recently finished sessions
    ///
    /// Lists completed and stopped sessions, newest first, with totals.
    ///
    /// # Examples
    ///
    ///   focus-keeper history
    ///   focus-keeper history -n 50
    ///   focus-keeper history -o json
    #[command(alias = "h")]
    History {
        /// Number of sessions to show
        #[arg(long, short = 'n', default_value = "10")]
        limit: usize,
    },

    /// Delete all session history
    Clear {
        /// Skip confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Show or create the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    ///
    /// Outputs a completion script for the specified shell.
    /// Redirect to a file or source directly.
    ///
    /// Example: focus-keeper completions bash > ~/.bash_completion.d/focus-keeper
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,

        /// Show installation instructions
        #[arg(long, short = 'i')]
        install: bool,
    },
}

/// Arguments for starting sessions.
#[derive(Args)]
pub struct StartArgs {
    /// Sessions to run, as TITLE or TITLE@DURATION
    #[arg(required = true, value_name = "SESSION")]
    pub sessions: Vec<String>,

    /// Duration for sessions given without one
    ///
    /// Defaults to `focus.default_duration_minutes` from the config file.
    #[arg(long, short = 'd')]
    pub duration: Option<String>,

    /// Print a single-line countdown instead of the dashboard
    #[arg(long)]
    pub plain: bool,

    /// Do not record these sessions in the history
    #[arg(long)]
    pub no_history: bool,
}

/// Arguments for configuration management.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long, short = 'f')]
        force: bool,
    },
}
