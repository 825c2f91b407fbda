use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn focus_keeper(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("focus-keeper").unwrap();
    cmd.env("FOCUS_KEEPER_HOME", home.path())
        .env_remove("FOCUS_KEEPER_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();
    focus_keeper(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("start"))
        .stdout(predicate::str::contains("history"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_completions_bash() {
    let home = TempDir::new().unwrap();
    focus_keeper(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_focus-keeper"));
}

#[test]
fn test_completions_install_instructions() {
    let home = TempDir::new().unwrap();
    focus_keeper(&home)
        .args(["completions", "zsh", "--install"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fpath"));
}

#[test]
fn test_config_path_uses_home_override() {
    let home = TempDir::new().unwrap();
    focus_keeper(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.yaml"))
        .stdout(predicate::str::contains(
            home.path().to_string_lossy().as_ref(),
        ));
}

#[test]
fn test_config_init_then_show() {
    let home = TempDir::new().unwrap();
    focus_keeper(&home)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(home.path().join("config.yaml").exists());

    focus_keeper(&home)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    focus_keeper(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default_duration_minutes: 25"));
}

#[test]
fn test_broken_config_is_reported() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join("config.yaml"), "focus:\n  default_duration_minutes: lots\n").unwrap();

    focus_keeper(&home)
        .args(["history"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("loading configuration"));
}

#[test]
fn test_history_empty() {
    let home = TempDir::new().unwrap();
    focus_keeper(&home)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No focus sessions found"));
}

#[test]
fn test_history_json_empty() {
    let home = TempDir::new().unwrap();
    let output = focus_keeper(&home)
        .args(["history", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["count"], 0);
    assert_eq!(parsed["totals"]["sessions"], 0);
}

#[test]
fn test_clear_requires_force() {
    let home = TempDir::new().unwrap();
    focus_keeper(&home)
        .arg("clear")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    focus_keeper(&home)
        .args(["clear", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cleared"));
}

#[test]
fn test_start_rejects_invalid_duration() {
    let home = TempDir::new().unwrap();
    focus_keeper(&home)
        .args(["start", "Read@soon", "--plain"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid duration"));
}

#[test]
fn test_start_plain_completes_and_records() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("config.yaml"),
        "focus:\n  notifications: false\n  notification_sound: false\n",
    )
    .unwrap();

    focus_keeper(&home)
        .args(["start", "Tea@2s", "--plain"])
        .timeout(std::time::Duration::from_secs(20))
        .assert()
        .success()
        .stdout(predicate::str::contains("Tea complete"))
        .stdout(predicate::str::contains("1 of 1 sessions completed"));

    let output = focus_keeper(&home)
        .args(["history", "--output", "json"])
        .output()
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["count"], 1);
    assert_eq!(parsed["items"][0]["title"], "Tea");
    assert_eq!(parsed["items"][0]["outcome"], "completed");
}

#[test]
fn test_start_no_history_skips_database() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("config.yaml"),
        "focus:\n  notifications: false\n  notification_sound: false\n",
    )
    .unwrap();

    focus_keeper(&home)
        .args(["-o", "json", "start", "Tea@1s", "--plain", "--no-history"])
        .timeout(std::time::Duration::from_secs(20))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"recorded\": false"));

    assert!(!home.path().join("focus-keeper.db").exists());
}

#[test]
fn test_start_json_stream_is_clean_with_default_config() {
    let home = TempDir::new().unwrap();

    let output = focus_keeper(&home)
        .args(["-o", "json", "start", "Tea@2s", "--plain", "--no-history"])
        .timeout(std::time::Duration::from_secs(20))
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(!stdout.contains('\x07'));

    // One JSON object per update, then the pretty-printed summary
    let summary_at = stdout.find("\n{\n").map_or(0, |i| i + 1);
    let (events, summary) = stdout.split_at(summary_at);

    let events: Vec<serde_json::Value> = events
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    let last = events.last().unwrap();
    assert_eq!(last["id"], "tea");
    assert_eq!(last["time_left"], 0);
    assert_eq!(last["complete"], true);

    let summary: serde_json::Value = serde_json::from_str(summary).unwrap();
    assert_eq!(summary["count"], 1);
}
