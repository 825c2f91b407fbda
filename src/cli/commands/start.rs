//! Start command implementation.
//!
//! Runs a batch of sessions in the foreground, in the dashboard or as a
//! single countdown line, and records how each one ended.

use std::io::Write;

use chrono::Duration;
use colored::Colorize;
use tokio::runtime::Runtime;

use crate::cli::args::{OutputFormat, StartArgs};
use crate::config::{Config, Paths};
use crate::error::FocusError;
use crate::features::focus::{
    parse_duration, FocusRun, FocusService, HistoryStore, SessionEvent, SessionRequest,
};
use crate::output::{format_countdown_line, format_summary};
use crate::storage::Database;
use crate::tui;

/// Worker threads driving session timers.
const TIMER_THREADS: usize = 2;

/// Execute the start command.
///
/// # Errors
///
/// Returns an error if a session argument is invalid, the history database
/// cannot be opened or written, or the terminal fails.
pub fn start(
    args: StartArgs,
    config: &Config,
    paths: &Paths,
    format: OutputFormat,
) -> Result<String, FocusError> {
    let default_duration = match args.duration.as_deref() {
        Some(raw) => parse_duration(raw)
            .ok_or_else(|| FocusError::InvalidArgument(format!("Invalid duration: {raw}")))?,
        None => Duration::minutes(i64::from(config.focus.default_duration_minutes)),
    };
    let requests = SessionRequest::parse_all(&args.sessions, default_duration)?;

    // Open before anything runs so a broken database fails fast
    let history = if config.focus.record_history && !args.no_history {
        Some(HistoryStore::with_database(Database::open(paths)?))
    } else {
        None
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(TIMER_THREADS)
        .thread_name("focus-timer")
        .enable_all()
        .build()?;
    let service = FocusService::from_config(runtime.handle().clone(), &config.focus);

    let mut run = FocusRun::start(&service, &requests);
    log::info!("started {} session(s)", requests.len());

    if args.plain {
        run_plain(&runtime, &mut run, format)?;
    } else {
        tui::run(&mut run)?;
    }

    let mut results = run.into_results();
    if let Some(store) = &history {
        for entry in &mut results {
            store.record(entry)?;
        }
    }

    format_summary(&results, history.is_some(), format)
}

/// Stream updates to stdout until every session ends or Ctrl-C stops them.
fn run_plain(
    runtime: &Runtime,
    run: &mut FocusRun<'_>,
    format: OutputFormat,
) -> Result<(), FocusError> {
    runtime.block_on(async {
        let mut stdout = std::io::stdout();

        while !run.is_finished() {
            tokio::select! {
                event = run.next_event() => {
                    let Some(event) = event else { break };
                    match format {
                        OutputFormat::Pretty => print_pretty(&mut stdout, run, &event)?,
                        OutputFormat::Json => {
                            writeln!(stdout, "{}", serde_json::to_string(&event)?)?;
                        }
                    }
                }
                signal = tokio::signal::ctrl_c() => {
                    signal?;
                    log::info!("interrupted, stopping remaining sessions");
                    run.stop_all();
                }
            }
        }

        if format == OutputFormat::Pretty {
            write!(stdout, "\r\x1b[2K")?;
            stdout.flush()?;
        }
        Ok::<(), FocusError>(())
    })
}

fn print_pretty(
    out: &mut impl Write,
    run: &FocusRun<'_>,
    event: &SessionEvent,
) -> Result<(), FocusError> {
    // Clear the countdown line before redrawing it
    write!(out, "\r\x1b[2K")?;
    if event.complete {
        writeln!(out, "{}", format!("✅ {} complete", event.title).green())?;
    }

    let line = format_countdown_line(&run.snapshots());
    if !line.is_empty() {
        write!(out, "{line}")?;
    }
    out.flush()?;
    Ok(())
}
