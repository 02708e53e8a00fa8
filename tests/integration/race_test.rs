use std::io::{BufRead, BufReader};
use std::process::{Command, Output, Stdio};

fn run_race(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_vault_race"))
        .args(args)
        .output()
        .expect("Failed to execute vault_race")
}

fn stdout_of(output: &Output) -> String {
    if !output.status.success() {
        panic!(
            "Command failed with status: {:?}\nstderr: {}\nstdout: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr),
            String::from_utf8_lossy(&output.stdout)
        );
    }
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Extract the secret from the "Vault created with secret N" line.
fn announced_secret(stdout: &str) -> u32 {
    stdout
        .lines()
        .find_map(secret_in_line)
        .expect("vault creation line missing or malformed")
}

#[test]
fn test_race_reports_every_stage() {
    let output = run_race(&[]);
    let stdout = stdout_of(&output);

    let secret = announced_secret(&stdout);
    assert!(secret < 999, "secret {} outside the password space", secret);

    for task in ["AscendingSearcher", "DescendingSearcher", "Watchdog"] {
        assert!(
            stdout.contains(&format!("Prepared {}", task)),
            "{} was never prepared",
            task
        );
        assert!(
            stdout.contains(&format!("{} started", task)),
            "{} never started",
            task
        );
        assert!(
            stdout.contains(&format!("{} finished.", task)),
            "{} never finished",
            task
        );
    }

    // Secrets near either end are found within a few checks, possibly before
    // the watchdog thread gets to its first tick
    if (100..=898).contains(&secret) {
        assert!(stdout.contains("Watchdog countdown: 10"));
    }
    assert!(!stdout.contains("watchdog budget is"));
}

#[test]
fn test_race_has_exactly_one_winner() {
    let output = run_race(&[]);
    let stdout = stdout_of(&output);
    let secret = announced_secret(&stdout);

    let searcher_wins: Vec<&str> = stdout
        .lines()
        .filter(|line| line.contains("guessed the secret"))
        .collect();
    let forced = stdout
        .lines()
        .filter(|line| line.contains("forced termination"))
        .count();

    // Default pacing sweeps the whole space well inside the watchdog budget
    assert_eq!(searcher_wins.len(), 1, "stdout:\n{}", stdout);
    assert_eq!(forced, 0, "stdout:\n{}", stdout);
    assert!(
        searcher_wins[0].ends_with(&format!("guessed the secret {}", secret)),
        "winner announced the wrong guess: {}",
        searcher_wins[0]
    );
    assert!(stdout.contains("Watchdog: a searcher already found the secret."));
}

#[test]
fn test_race_ends_exactly_once() {
    let output = run_race(&[]);
    let stdout = stdout_of(&output);

    let ended = stdout
        .lines()
        .filter(|line| line.contains("The race has ended."))
        .count();
    assert_eq!(ended, 1);

    let last = stdout.lines().last().expect("no output");
    assert!(
        last.contains("The race has ended."),
        "final line should announce the end, got: {}",
        last
    );
}

#[test]
fn test_verbose_logs_guesses() {
    let output = run_race(&["--verbose"]);
    let stdout = stdout_of(&output);

    assert!(stdout.contains("watchdog budget is 10s"));
    assert!(stdout.contains("The race has ended."));
}

#[test]
fn test_unknown_flag_is_rejected() {
    let output = run_race(&["--secret", "5"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--secret"), "stderr: {}", stderr);
}

/// Secret from a single "Vault created with secret N" line.
fn secret_in_line(line: &str) -> Option<u32> {
    if !line.contains("Vault created with secret") {
        return None;
    }
    line.rsplit(' ').next().and_then(|value| value.trim().parse().ok())
}

#[cfg(unix)]
#[test]
fn test_sigint_interrupts_every_task() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_vault_race"))
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute vault_race");

    let stdout = child.stdout.take().expect("stdout not captured");
    let mut lines = Vec::new();
    let mut interrupted = false;

    for line in BufReader::new(stdout).lines() {
        let line = line.expect("unreadable output");
        // Near the middle a searcher needs at least half a second to win,
        // far longer than the signal takes to arrive.
        if let Some(secret) = secret_in_line(&line) {
            if (100..=898).contains(&secret) {
                let rc = unsafe { libc::kill(child.id() as libc::pid_t, libc::SIGINT) };
                assert_eq!(rc, 0, "failed to signal vault_race");
                interrupted = true;
            }
        }
        lines.push(line);
    }

    let status = child.wait().expect("vault_race did not exit");
    let stdout = lines.join("\n");
    assert!(status.success(), "status: {:?}\nstdout:\n{}", status, stdout);

    for task in ["AscendingSearcher", "DescendingSearcher", "Watchdog"] {
        assert!(
            stdout.contains(&format!("{} finished.", task)),
            "{} never finished:\n{}",
            task,
            stdout
        );
    }
    let ended = lines
        .iter()
        .filter(|line| line.contains("The race has ended."))
        .count();
    assert_eq!(ended, 1, "stdout:\n{}", stdout);

    if !interrupted {
        // Secret too close to an end: the race may already be over
        return;
    }

    assert!(stdout.contains("Interrupting all tasks"), "stdout:\n{}", stdout);
    for task in ["AscendingSearcher", "DescendingSearcher", "Watchdog"] {
        assert!(
            stdout.contains(&format!("{} interrupted", task)),
            "{} never logged the interrupt:\n{}",
            task,
            stdout
        );
    }
    assert!(!stdout.contains("guessed the secret"), "stdout:\n{}", stdout);
    assert!(!stdout.contains("forced termination"), "stdout:\n{}", stdout);
}
