use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

const JUNE_RECORDS: &str = r#"[
  {"id": 1, "date": "2024-06-01", "difficulty": "Easy", "xpEarned": 10, "timeMinutes": 12},
  {"id": 2, "date": "2024-06-02", "difficulty": "Hard", "xpEarned": 30, "timeSpent": 48},
  {"id": 3, "date": "2024-06-04", "difficulty": "Medium", "xpEarned": 20},
  {"id": 4, "date": "garbage", "difficulty": "Medium"}
]"#;

struct CliTestEnv {
    _temp_dir: TempDir,
    home: PathBuf,
    xdg_config: PathBuf,
    xdg_state: PathBuf,
    input: PathBuf,
}

impl CliTestEnv {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let base = temp_dir.path().to_path_buf();
        let home = base.join("home");
        let xdg_config = base.join("xdg-config");
        let xdg_state = base.join("xdg-state");

        fs::create_dir_all(&home).expect("failed to create HOME");
        fs::create_dir_all(&xdg_config).expect("failed to create XDG_CONFIG_HOME");
        fs::create_dir_all(&xdg_state).expect("failed to create XDG_STATE_HOME");

        let input = base.join("tasks.json");
        fs::write(&input, JUNE_RECORDS).expect("failed to write record fixture");

        Self {
            _temp_dir: temp_dir,
            home,
            xdg_config,
            xdg_state,
            input,
        }
    }

    fn write_config(&self, content: &str) {
        let dir = self.xdg_config.join("solvetrack");
        fs::create_dir_all(&dir).expect("failed to create config dir");
        fs::write(dir.join("config.toml"), content).expect("failed to write config");
    }

    fn input_arg(&self) -> String {
        self.input.to_string_lossy().into_owned()
    }
}

fn run_report(env: &CliTestEnv, args: &[&str]) -> Output {
    let bin_path = PathBuf::from(assert_cmd::cargo::cargo_bin!("solvetrack-report"));

    Command::new(bin_path)
        .args(args)
        .env("HOME", &env.home)
        .env("XDG_CONFIG_HOME", &env.xdg_config)
        .env("XDG_STATE_HOME", &env.xdg_state)
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|e| panic!("failed to execute solvetrack-report: {e}"))
}

fn assert_success(args: &[&str], output: &Output) {
    if output.status.success() {
        return;
    }

    let rendered_args = args
        .iter()
        .map(|arg| OsString::from(arg).to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    panic!(
        "solvetrack-report {rendered_args} failed\nstatus: {}\nstdout:\n{}\nstderr:\n{}",
        output.status, stdout, stderr
    );
}

#[test]
fn terminal_report_shows_month_summary() {
    let env = CliTestEnv::new();
    let input = env.input_arg();
    let args = ["--input", &input, "--today", "2024-06-04", "--target", "50"];

    let output = run_report(&env, &args);
    assert_success(&args, &output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Practice Report: June 2024"), "got:\n{stdout}");
    assert!(stdout.contains("120% of 50 XP"), "got:\n{stdout}");
    assert!(stdout.contains("Goal reached!"));
    assert!(stdout.contains("Current:  1 day"));
    assert!(stdout.contains("Mon  Tue  Wed"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("skipped 1 malformed record"), "got:\n{stderr}");
}

#[test]
fn json_export_is_a_full_snapshot() {
    let env = CliTestEnv::new();
    let input = env.input_arg();
    let args = [
        "--input", &input, "--today", "2024-06-04", "--target", "50", "--export", "json",
    ];

    let output = run_report(&env, &args);
    assert_success(&args, &output);

    let snapshot: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(snapshot["dailyStats"].as_array().map(Vec::len), Some(3));
    assert_eq!(snapshot["monthStats"]["currentXp"], 60);
    assert_eq!(snapshot["goalProgress"]["percent"], 120);
    assert_eq!(snapshot["goalProgress"]["remaining"], 0);
    assert_eq!(snapshot["streak"]["current"], 1);
    assert_eq!(snapshot["skippedRecords"], 1);
}

#[test]
fn json_export_is_stable_across_runs() {
    let env = CliTestEnv::new();
    let input = env.input_arg();
    let args = ["--input", &input, "--today", "2024-06-04", "--export", "json"];

    let first = run_report(&env, &args);
    let second = run_report(&env, &args);
    assert_success(&args, &first);
    assert_success(&args, &second);
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn markdown_export_renders_tables() {
    let env = CliTestEnv::new();
    let input = env.input_arg();
    let args = ["--input", &input, "--today", "2024-06-04", "--export", "md"];

    let output = run_report(&env, &args);
    assert_success(&args, &output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("# Practice Report: June 2024"));
    assert!(stdout.contains("| Tasks | 3 |"));
    assert!(stdout.contains("## Best Days"));
}

#[test]
fn chart_flag_prints_aligned_series() {
    let env = CliTestEnv::new();
    let input = env.input_arg();
    let args = [
        "--input", &input, "--today", "2024-06-04", "--chart", "weekday_distribution",
    ];

    let output = run_report(&env, &args);
    assert_success(&args, &output);

    let series: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(series["labels"].as_array().map(Vec::len), Some(7));
    assert_eq!(series["values"].as_array().map(Vec::len), Some(7));
    assert_eq!(series["labels"][0], "Mon");
}

#[test]
fn config_target_applies_and_flag_overrides_it() {
    let env = CliTestEnv::new();
    env.write_config("[goal]\ntarget_xp = 120\n");
    let input = env.input_arg();

    let args = ["--input", &input, "--today", "2024-06-04", "--export", "json"];
    let output = run_report(&env, &args);
    assert_success(&args, &output);
    let snapshot: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(snapshot["goalProgress"]["percent"], 50);
    assert_eq!(snapshot["monthStats"]["targetXp"], 120);

    let args = [
        "--input", &input, "--today", "2024-06-04", "--target", "60", "--export", "json",
    ];
    let output = run_report(&env, &args);
    assert_success(&args, &output);
    let snapshot: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(snapshot["goalProgress"]["percent"], 100);
}

#[test]
fn month_goal_is_resolved_for_the_requested_month() {
    let env = CliTestEnv::new();
    env.write_config("[goal]\ntarget_xp = 120\n\n[goal.months]\n\"2024-06\" = 30\n");
    let input = env.input_arg();

    let args = ["--input", &input, "--today", "2024-06-04", "--export", "json"];
    let output = run_report(&env, &args);
    assert_success(&args, &output);
    let snapshot: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(snapshot["monthStats"]["targetXp"], 30);
    assert_eq!(snapshot["goalProgress"]["percent"], 200);

    // Months without an entry fall back to target_xp
    let args = [
        "--input", &input, "--today", "2024-06-04", "--month", "2024-05", "--export", "json",
    ];
    let output = run_report(&env, &args);
    assert_success(&args, &output);
    let snapshot: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(snapshot["monthStats"]["targetXp"], 120);
}

#[test]
fn truncated_record_file_is_an_error() {
    let env = CliTestEnv::new();
    fs::write(
        &env.input,
        "{\n  \"tasks\": [\n    {\"date\": \"2024-06-01\", \"difficulty\": \"Easy\"},\n",
    )
    .expect("failed to write truncated fixture");
    let input = env.input_arg();

    let output = run_report(&env, &["--input", &input, "--today", "2024-06-04"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read records"), "got:\n{stderr}");
}

#[test]
fn explicit_month_selects_calendar() {
    let env = CliTestEnv::new();
    let input = env.input_arg();
    let args = [
        "--input", &input, "--today", "2024-06-04", "--month", "2024-02", "--export", "json",
    ];

    let output = run_report(&env, &args);
    assert_success(&args, &output);

    let snapshot: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    // February 2024 starts on a Thursday
    assert_eq!(snapshot["calendarDays"].as_array().map(Vec::len), Some(32));
    assert_eq!(snapshot["monthStats"]["totalTasks"], 0);
}

#[test]
fn invalid_month_is_rejected() {
    let env = CliTestEnv::new();
    let input = env.input_arg();

    let output = run_report(&env, &["--input", &input, "--month", "2024-13"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid month"), "got:\n{stderr}");
}

#[test]
fn unknown_export_format_is_rejected() {
    let env = CliTestEnv::new();
    let input = env.input_arg();

    let output = run_report(&env, &["--input", &input, "--export", "csv"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown export format"), "got:\n{stderr}");
}

#[test]
fn invalid_config_is_reported() {
    let env = CliTestEnv::new();
    env.write_config("[analytics]\ntop_days = 0\n");
    let input = env.input_arg();

    let output = run_report(&env, &["--input", &input]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("top_days"), "got:\n{stderr}");
}
