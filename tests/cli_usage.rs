use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

fn unique_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!(
        "bbob_postproc_cli_test_{}_{}",
        name,
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    fs::create_dir_all(&p).unwrap();
    p
}

fn run_tool(cwd: &PathBuf, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bbob-postproc"))
        .current_dir(cwd)
        .args(args)
        .output()
        .expect("failed to run bbob-postproc")
}

#[test]
fn no_arguments_prints_help_and_creates_nothing() {
    let cwd = unique_dir("noargs");

    let output = run_tool(&cwd, &[]);
    assert!(output.status.success(), "status: {}", output.status);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"), "help text expected, got: {stdout}");
    assert!(stdout.contains("FOLDER"));

    // In particular no ppdatamany directory.
    assert_eq!(fs::read_dir(&cwd).unwrap().count(), 0);

    let _ = fs::remove_dir_all(&cwd);
}

#[test]
fn help_flag_exits_zero() {
    let cwd = unique_dir("help");
    let output = run_tool(&cwd, &["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--settings"));
    let _ = fs::remove_dir_all(&cwd);
}

#[test]
fn bogus_settings_fails_with_code_two_and_no_output() {
    let cwd = unique_dir("bogus");

    let output = run_tool(&cwd, &["--settings", "bogus", "somefolder"]);
    assert_eq!(output.status.code(), Some(2));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("bogus"), "stderr: {stderr}");

    assert_eq!(fs::read_dir(&cwd).unwrap().count(), 0);

    let _ = fs::remove_dir_all(&cwd);
}

#[test]
fn unknown_option_fails_with_code_two() {
    let cwd = unique_dir("badopt");
    let output = run_tool(&cwd, &["--frobnicate", "somefolder"]);
    assert_eq!(output.status.code(), Some(2));
    let _ = fs::remove_dir_all(&cwd);
}

#[test]
fn missing_folder_is_a_runtime_error_not_a_usage_error() {
    let cwd = unique_dir("missing");
    let output = run_tool(&cwd, &["does-not-exist"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("post-processing failed"), "stderr: {stderr}");
    let _ = fs::remove_dir_all(&cwd);
}
