use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::Mutex;
use tempfile::TempDir;

// Writing an executable while another test forks can fail with ETXTBSY, so
// tests that spawn processes take turns.
static SERIAL: Mutex<()> = Mutex::new(());

/// Stands in for `python -i -u`: prompts on stderr, output on stderr too so
/// the ordering on the merged stream is deterministic.
const FAKE_INTERPRETER: &str = r#"#!/bin/sh
printf '>>> ' >&2
while IFS= read -r line; do
  case "$line" in
    *:|" "*) printf '... ' >&2 ;;
    *) echo "ran: $line" >&2; printf '>>> ' >&2 ;;
  esac
done
"#;

fn write_fake_interpreter(dir: &Path) -> PathBuf {
    let path = dir.join("fakepython");
    fs::write(&path, FAKE_INTERPRETER).expect("Failed to write fake interpreter");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
        .expect("Failed to make fake interpreter executable");
    path
}

fn write_script(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("demo.py");
    fs::write(&path, content).expect("Failed to write test script");
    path
}

fn run(script: &Path, extra_args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pyscriptty"))
        .args([
            "--char-delay",
            "0",
            "--prompt-delay",
            "0",
            "--separation-pause",
            "0.05",
            "--end-delay",
            "0",
        ])
        .args(extra_args)
        .arg(script)
        .env_remove("PYSCRIPTTY_PYTHON")
        .output()
        .expect("Failed to execute pyscriptty")
}

#[test]
fn test_basic_playback() {
    let _serial = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let dir = TempDir::new().unwrap();
    let python = write_fake_interpreter(dir.path());
    let script = write_script(
        dir.path(),
        "## intro slide\nx = 1\n\nif x:\n    y = 2\n\ny\n",
    );

    let output = run(&script, &["--python", python.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "pyscriptty failed with stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("x = 1"), "typed line missing: {stdout}");
    assert!(stdout.contains("ran: x = 1"), "interpreter output missing: {stdout}");
    assert!(stdout.contains("...     y = 2"), "continuation missing: {stdout}");
    assert!(stdout.contains("ran: y"), "last line not run: {stdout}");
    assert!(!stdout.contains("intro slide"), "ignored line was typed: {stdout}");
}

#[test]
fn test_unterminated_last_line() {
    let _serial = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let dir = TempDir::new().unwrap();
    let python = write_fake_interpreter(dir.path());
    let script = write_script(dir.path(), "x = 1\ny = 2");

    let output = run(&script, &["--python", python.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "pyscriptty failed with stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ran: y = 2"), "last line not run: {stdout}");
}

#[test]
fn test_python_exec_directive() {
    let _serial = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let dir = TempDir::new().unwrap();
    let python = write_fake_interpreter(dir.path());
    let script = write_script(
        dir.path(),
        &format!(
            "# <pyscript>: python_exec {}\nprint('hi')\n",
            python.display()
        ),
    );

    // the directive wins over --python
    let output = run(&script, &["--python", "/nonexistent/python"]);
    assert!(
        output.status.success(),
        "pyscriptty failed with stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ran: print('hi')"), "got: {stdout}");
}

#[test]
fn test_start_and_pause_directives() {
    let _serial = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let dir = TempDir::new().unwrap();
    let python = write_fake_interpreter(dir.path());
    let script = write_script(
        dir.path(),
        "hidden = 1\n# <pyscript>: start\nshown = 2\n# <pyscript>: pause 100ms\n",
    );

    let output = run(&script, &["--python", python.to_str().unwrap()]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ran: shown = 2"), "got: {stdout}");
    assert!(!stdout.contains("hidden"), "preamble was played: {stdout}");
}

#[test]
fn test_misplaced_python_exec() {
    let _serial = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let dir = TempDir::new().unwrap();
    let script = write_script(dir.path(), "x = 1\n# <pyscript>: python_exec python3\n");

    let output = run(&script, &[]);
    assert!(
        !output.status.success(),
        "pyscriptty should reject a late python_exec"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 2"), "got: {stderr}");
    assert!(stderr.contains("first line"), "got: {stderr}");
}

#[test]
fn test_unknown_directive() {
    let _serial = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let dir = TempDir::new().unwrap();
    let script = write_script(dir.path(), "# <pyscript>: rewind 2\n");

    let output = run(&script, &["--python", "/nonexistent/python"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown directive"), "got: {stderr}");
    // parse errors are reported before any interpreter is launched
    assert!(!stderr.contains("Failed to spawn"), "got: {stderr}");
}

#[test]
fn test_structural_error() {
    let _serial = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let dir = TempDir::new().unwrap();
    let script = write_script(dir.path(), "if x:\n    pass\n\n    pass\n");

    let output = run(&script, &[]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("closing"), "got: {stderr}");
}

#[test]
fn test_interpreter_exits_early() {
    let _serial = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let dir = TempDir::new().unwrap();
    let script = write_script(dir.path(), "x = 1\n");

    // `true` ignores its arguments and exits without printing a prompt
    let output = run(&script, &["--python", "true"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("before a prompt"), "got: {stderr}");
}

#[test]
fn test_missing_script_argument() {
    let _serial = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let output = Command::new(env!("CARGO_BIN_EXE_pyscriptty"))
        .output()
        .expect("Failed to execute pyscriptty");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "got: {stderr}");
}

#[test]
fn test_missing_script_file() {
    let _serial = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let output = run(Path::new("/nonexistent/demo.py"), &[]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to read script file"), "got: {stderr}");
}
