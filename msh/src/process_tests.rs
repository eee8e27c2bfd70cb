//! End-to-end tests driving the full dispatch path: fork, redirection,
//! foreground wait, background tracking and reaping.

use msh_types::{Context, ExitStatus};
use nix::sys::signal::Signal;
use once_cell::sync::Lazy;
use std::fs;
use std::sync::{Mutex, MutexGuard};
use std::thread::sleep;
use std::time::Duration;

use crate::parser::CommandPlan;
use crate::process::ProcessState;
use crate::shell::Shell;

fn test_shell() -> (Shell, Context) {
    let shell = Shell::new();
    let ctx = Context::new(shell.pid, shell.pgid, true);
    (shell, ctx)
}

// The working directory and HOME are process-global; tests touching them
// serialize here.
static CWD_LOCK: Lazy<Mutex<()>> = Lazy::new(Mutex::default);

fn cwd_lock() -> MutexGuard<'static, ()> {
    CWD_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

#[test]
fn foreground_exit_codes_are_recorded() {
    let (mut shell, mut ctx) = test_shell();

    shell.eval_line(&mut ctx, "false").unwrap();
    assert_eq!(shell.last_state, ProcessState::Exited(1));

    shell.eval_line(&mut ctx, "true").unwrap();
    assert_eq!(shell.last_state, ProcessState::Exited(0));
}

#[test]
fn noop_and_comment_lines_leave_status_unchanged() {
    let (mut shell, mut ctx) = test_shell();
    shell.last_state = ProcessState::Exited(7);

    shell.eval_line(&mut ctx, "").unwrap();
    shell.eval_line(&mut ctx, "   \n").unwrap();
    shell.eval_line(&mut ctx, "#comment with args").unwrap();

    assert_eq!(shell.last_state, ProcessState::Exited(7));
}

#[test]
fn cd_changes_directory_without_touching_status() {
    let _guard = cwd_lock();
    let (mut shell, mut ctx) = test_shell();
    shell.last_state = ProcessState::Exited(3);

    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().canonicalize().unwrap();

    shell
        .eval_line(&mut ctx, &format!("cd {}", target.display()))
        .unwrap();
    assert_eq!(std::env::current_dir().unwrap(), target);
    assert_eq!(shell.last_state, ProcessState::Exited(3));

    // A failed cd is reported but stays non-fatal.
    shell
        .eval_line(&mut ctx, "cd /no/such/directory/anywhere")
        .unwrap();
    assert_eq!(shell.last_state, ProcessState::Exited(3));
}

#[test]
fn bare_cd_goes_to_home() {
    let _guard = cwd_lock();
    let (mut shell, mut ctx) = test_shell();
    shell.last_state = ProcessState::Exited(5);

    let home = tempfile::tempdir().unwrap();
    let target = home.path().canonicalize().unwrap();
    let saved_home = std::env::var_os("HOME");
    std::env::set_var("HOME", &target);

    shell.eval_line(&mut ctx, "cd").unwrap();
    assert_eq!(std::env::current_dir().unwrap(), target);
    assert_eq!(shell.last_state, ProcessState::Exited(5));

    // With HOME unset, bare cd reports and leaves the directory alone.
    std::env::remove_var("HOME");
    let status = shell.eval_line(&mut ctx, "cd").unwrap();
    assert_eq!(status, ExitStatus::ExitedWith(1));
    assert_eq!(std::env::current_dir().unwrap(), target);

    if let Some(home) = saved_home {
        std::env::set_var("HOME", home);
    }
}

#[test]
fn one_shot_mode_returns_command_status() {
    let (mut shell, mut ctx) = test_shell();
    assert_eq!(crate::one_shot_code(&mut shell, &mut ctx, "false"), 1);
    assert_eq!(crate::one_shot_code(&mut shell, &mut ctx, "true"), 0);
    // Malformed input is a diagnostic plus a failure code, not a crash.
    assert_eq!(crate::one_shot_code(&mut shell, &mut ctx, "ls >"), 1);
}

#[test]
fn one_shot_mode_drains_background_work() {
    let (mut shell, mut ctx) = test_shell();
    assert_eq!(crate::one_shot_code(&mut shell, &mut ctx, "sleep 0.1 &"), 0);
    assert!(shell.jobs.is_empty());
    assert_eq!(shell.last_state, ProcessState::Exited(0));
}

#[test]
fn output_redirection_round_trip() {
    let (mut shell, mut ctx) = test_shell();
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("out.txt");
    let second = dir.path().join("copy.txt");

    shell
        .eval_line(&mut ctx, &format!("echo hello > {}", first.display()))
        .unwrap();
    assert_eq!(fs::read_to_string(&first).unwrap(), "hello\n");

    shell
        .eval_line(
            &mut ctx,
            &format!("cat < {} > {}", first.display(), second.display()),
        )
        .unwrap();
    assert_eq!(fs::read_to_string(&second).unwrap(), "hello\n");
}

#[test]
fn failed_input_redirection_fails_only_the_child() {
    let (mut shell, mut ctx) = test_shell();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.txt");

    shell
        .eval_line(&mut ctx, &format!("cat < {}", missing.display()))
        .unwrap();
    assert_eq!(shell.last_state, ProcessState::Exited(1));
}

#[test]
fn unknown_command_exits_one() {
    let (mut shell, mut ctx) = test_shell();
    shell
        .eval_line(&mut ctx, "definitely-not-a-command-msh")
        .unwrap();
    assert_eq!(shell.last_state, ProcessState::Exited(1));
}

#[test]
fn background_job_is_tracked_and_reaped_once() {
    let (mut shell, mut ctx) = test_shell();

    shell.eval_line(&mut ctx, "sleep 0.2 &").unwrap();
    assert_eq!(shell.jobs.len(), 1);

    for _ in 0..100 {
        shell.reap_and_report();
        if shell.jobs.is_empty() {
            break;
        }
        sleep(Duration::from_millis(20));
    }

    assert!(shell.jobs.is_empty());
    assert_eq!(shell.last_state, ProcessState::Exited(0));
    // Reaping again with nothing outstanding stays a no-op.
    shell.reap_and_report();
    assert!(shell.jobs.is_empty());
}

#[test]
fn interrupt_death_is_observable_as_signaled() {
    let (mut shell, mut ctx) = test_shell();

    // The tokenizer has no quoting, so build the plan directly for a child
    // that interrupts itself.
    let plan = CommandPlan {
        argv: vec![
            "sh".to_string(),
            "-c".to_string(),
            "kill -INT $$".to_string(),
        ],
        input: None,
        output: None,
        background: false,
    };
    shell.execute(&mut ctx, plan).unwrap();

    assert_eq!(
        shell.last_state,
        ProcessState::Signaled(Signal::SIGINT)
    );
    assert_eq!(shell.last_state.to_string(), "terminated by signal 2");
}
