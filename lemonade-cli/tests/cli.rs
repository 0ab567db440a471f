use std::io::Write;
use std::process::{Command, Output, Stdio};

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "lemonade-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

fn run_with_input(args: &[&str], input: &str) -> Output {
    let exe = env!("CARGO_BIN_EXE_lemonade");
    let mut child = Command::new(exe)
        .args(args)
        .arg("--no-color")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn cli");
    child
        .stdin
        .take()
        .expect("stdin handle")
        .write_all(input.as_bytes())
        .expect("write answers");
    child.wait_with_output().expect("run cli")
}

fn week_of_answers(per_day: &str) -> String {
    per_day.repeat(7)
}

#[test]
fn cli_plays_a_full_week_from_stdin() {
    let input = format!("lots\n-2\n{}", week_of_answers("10\n10\n10\n1\n"));
    let output = run_with_input(&["--seed", "42"], &input);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Lemonade Stand"));
    assert!(stdout.contains("Please enter a whole number of zero or more."));
    assert!(stdout.contains("=== Day 1 of 7 ==="));
    assert!(stdout.contains("=== Day 7 of 7 ==="));
    assert!(!stdout.contains("Day 8"));
    assert!(stdout.contains("Bought 10 lemons"));
    assert!(stdout.contains("Game over after 7 days"));
}

#[test]
fn cli_same_seed_same_output() {
    let input = week_of_answers("5\n5\n5\n1\n");
    let first = run_with_input(&["--seed", "7"], &input);
    let second = run_with_input(&["--seed", "7"], &input);
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn cli_fails_when_input_closes_early() {
    let output = run_with_input(&["--seed", "1"], "3\n3\n");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("input closed"));
}

#[test]
fn cli_autoplay_needs_no_input() {
    let output = run_with_input(&["--seed", "5", "--autoplay", "--strategy", "cautious"], "");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Autoplay: Cautious strategy"));
    assert!(stdout.contains("Game over after 7 days"));
}

#[test]
fn cli_reads_config_file() {
    let path = temp_path("config");
    std::fs::write(&path, r#"{ "days": 2, "starting_cash": 20.0 }"#).expect("write config");
    let output = run_with_input(
        &["--seed", "3", "--config", path.to_str().expect("utf8 path")],
        &"0\n0\n0\n0\n".repeat(2),
    );
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("=== Day 2 of 2 ==="));
    assert!(stdout.contains("Game over after 2 days! You finished with $20.00"));
}

#[test]
fn cli_rejects_invalid_config() {
    let path = temp_path("bad-config");
    std::fs::write(&path, r#"{ "days": 0 }"#).expect("write config");
    let output = run_with_input(
        &["--seed", "3", "--config", path.to_str().expect("utf8 path")],
        "",
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid config"));
}
