//! Fatal reports end the process, so each test re-runs itself as a child
//! process and checks the child's exit status and stderr.

use ada_runtime::error::{ada_constraint_error, ada_program_error, ada_runtime_error};
use ada_runtime::{FATAL_EXIT_CODE, FatalError};
use std::ffi::{CString, c_char};
use std::process::{Command, Output};

const CHILD_ENV: &str = "ADA_RUNTIME_FATAL_CHILD";

fn in_child() -> bool {
    std::env::var_os(CHILD_ENV).is_some()
}

fn run_child(test_name: &str) -> Output {
    Command::new(std::env::current_exe().unwrap())
        .args([test_name, "--exact", "--nocapture", "--test-threads=1"])
        .env(CHILD_ENV, "1")
        .output()
        .unwrap()
}

fn assert_fatal(output: &Output, expected_line: &str) {
    assert_eq!(output.status.code(), Some(FATAL_EXIT_CODE));

    let stderr = String::from_utf8_lossy(&output.stderr);
    let reports: Vec<&str> = stderr.lines().filter(|l| l.contains(" ERROR: ")).collect();
    assert_eq!(reports, [expected_line]);

    // The harness never got to print its summary.
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("test result"), "child kept running: {stdout}");
}

fn fire(report: unsafe extern "C" fn(*const c_char) -> !, message: &str) -> ! {
    let message = CString::new(message).unwrap();
    unsafe { report(message.as_ptr()) }
}

#[test]
fn runtime_error_terminates_with_status_one() {
    if in_child() {
        fire(ada_runtime_error, "division by zero");
    }
    let output = run_child("runtime_error_terminates_with_status_one");
    assert_fatal(&output, "RUNTIME ERROR: division by zero");
}

#[test]
fn constraint_error_terminates_with_status_one() {
    if in_child() {
        fire(ada_constraint_error, "index 11 not in 1 .. 10");
    }
    let output = run_child("constraint_error_terminates_with_status_one");
    assert_fatal(&output, "CONSTRAINT ERROR: index 11 not in 1 .. 10");
}

#[test]
fn program_error_terminates_with_status_one() {
    if in_child() {
        fire(ada_program_error, "function ended without return");
    }
    let output = run_child("program_error_terminates_with_status_one");
    assert_fatal(&output, "PROGRAM ERROR: function ended without return");
}

#[test]
fn report_from_rust_side_matches_builtin() {
    if in_child() {
        FatalError::Constraint("value out of range".into()).report();
    }
    let output = run_child("report_from_rust_side_matches_builtin");
    assert_fatal(&output, "CONSTRAINT ERROR: value out of range");
}

#[test]
fn earlier_output_survives_fatal_exit() {
    if in_child() {
        unsafe { ada_runtime::io::ada_put(c"partial line".as_ptr()) };
        fire(ada_runtime_error, "stop");
    }
    let output = run_child("earlier_output_survives_fatal_exit");
    assert_fatal(&output, "RUNTIME ERROR: stop");
    assert!(String::from_utf8_lossy(&output.stdout).contains("partial line"));
}
