use chrono::Local;
use colored::Colorize;

use crate::features::focus::{
    format_clock, format_duration, HistoryEntry, HistoryTotals, Outcome, SessionSnapshot,
};

fn outcome_icon(outcome: Outcome) -> String {
    match outcome {
        Outcome::Completed => "✓".green().to_string(),
        Outcome::Stopped => "✗".red().to_string(),
    }
}

fn truncate(title: &str, width: usize) -> String {
    if title.chars().count() > width {
        let cut: String = title.chars().take(width.saturating_sub(3)).collect();
        format!("{cut}...")
    } else {
        title.to_string()
    }
}

/// Format the outcome of a `start` run
pub fn format_summary_pretty(entries: &[HistoryEntry], recorded: bool) -> String {
    if entries.is_empty() {
        return "No sessions ran.".to_string();
    }

    let mut output = Vec::new();
    let completed = entries
        .iter()
        .filter(|e| e.outcome == Outcome::Completed)
        .count();
    output.push(
        format!("🎯 {completed} of {} sessions completed", entries.len())
            .bold()
            .to_string(),
    );

    for entry in entries {
        output.push(format!(
            "  {} {}  {}",
            outcome_icon(entry.outcome),
            entry.title,
            format_duration(chrono::Duration::seconds(entry.focused_seconds)).dimmed()
        ));
    }

    if recorded {
        output.push(String::new());
        output.push("   Use 'focus-keeper history' to review".dimmed().to_string());
    }

    output.join("\n")
}

/// Format history entries with totals as a table
pub fn format_history_pretty(entries: &[HistoryEntry], totals: &HistoryTotals) -> String {
    if entries.is_empty() {
        return "No focus sessions found.\n\nStart one with: focus-keeper start \"Deep Work\""
            .to_string();
    }

    let mut output = Vec::new();
    output.push("📋 Focus Session History".bold().to_string());
    output.push("═".repeat(60));
    output.push(String::new());

    output.push(format!(
        "{:<17} {:<10} {:<28} {}",
        "Ended", "Focused", "Session", "Status"
    ));
    output.push("─".repeat(60));

    for entry in entries {
        let ended = entry
            .ended_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string();
        let focused = format_duration(chrono::Duration::seconds(entry.focused_seconds));

        output.push(format!(
            "{:<17} {:<10} {:<28} {}",
            ended,
            focused,
            truncate(&entry.title, 27),
            outcome_icon(entry.outcome)
        ));
    }

    output.push("─".repeat(60));
    output.push(format!(
        "{} sessions, {} completed, {} focused",
        totals.sessions,
        totals.completed,
        format_duration(chrono::Duration::seconds(totals.focused_seconds))
    ));

    output.join("\n")
}

/// One-line countdown across every tracked session
pub fn format_countdown_line(sessions: &[SessionSnapshot]) -> String {
    sessions
        .iter()
        .map(|s| {
            let clock = format_clock(s.time_left);
            if s.is_running {
                format!("{} {}", s.title.bold(), clock)
            } else {
                format!("{} {} {}", s.title.bold(), clock, "(paused)".yellow())
            }
        })
        .collect::<Vec<_>>()
        .join(" │ ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn make_entry(title: &str, outcome: Outcome, focused_seconds: i64) -> HistoryEntry {
        let ended_at = Utc.with_ymd_and_hms(2024, 5, 2, 14, 30, 0).unwrap();
        HistoryEntry {
            id: None,
            session_id: title.to_lowercase(),
            title: title.to_string(),
            planned_seconds: 1500,
            focused_seconds,
            outcome,
            started_at: ended_at - chrono::Duration::minutes(25),
            ended_at,
        }
    }

    fn snapshot(title: &str, time_left: u64, is_running: bool) -> SessionSnapshot {
        SessionSnapshot {
            id: title.to_lowercase(),
            title: title.to_string(),
            time_left,
            planned: 1500,
            is_running,
        }
    }

    #[test]
    fn test_summary_counts_completed() {
        colored::control::set_override(false);
        let entries = vec![
            make_entry("Write", Outcome::Completed, 1500),
            make_entry("Read", Outcome::Stopped, 600),
        ];
        let output = format_summary_pretty(&entries, true);

        assert!(output.contains("1 of 2 sessions completed"));
        assert!(output.contains("Write"));
        assert!(output.contains("Read"));
        assert!(output.contains("focus-keeper history"));
    }

    #[test]
    fn test_summary_empty() {
        assert_eq!(format_summary_pretty(&[], false), "No sessions ran.");
    }

    #[test]
    fn test_summary_unrecorded_has_no_hint() {
        colored::control::set_override(false);
        let entries = vec![make_entry("Write", Outcome::Completed, 1500)];
        let output = format_summary_pretty(&entries, false);
        assert!(!output.contains("focus-keeper history"));
    }

    #[test]
    fn test_history_table() {
        colored::control::set_override(false);
        let entries = vec![make_entry("Deep Work", Outcome::Completed, 1500)];
        let totals = HistoryTotals {
            sessions: 1,
            completed: 1,
            focused_seconds: 1500,
        };
        let output = format_history_pretty(&entries, &totals);

        assert!(output.contains("Focus Session History"));
        assert!(output.contains("Deep Work"));
        assert!(output.contains("1 sessions, 1 completed"));
    }

    #[test]
    fn test_history_empty() {
        let output = format_history_pretty(&[], &HistoryTotals::default());
        assert!(output.contains("No focus sessions found"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a rather long session title", 10), "a rathe...");
    }

    #[test]
    fn test_countdown_line() {
        colored::control::set_override(false);
        let line = format_countdown_line(&[
            snapshot("Write", 1499, true),
            snapshot("Read", 600, false),
        ]);
        assert_eq!(line, "Write 24:59 │ Read 10:00 (paused)");
    }
}
