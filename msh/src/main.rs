use clap::Parser;
use msh_types::{Context, ExitStatus};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::repl::Repl;
use crate::shell::Shell;

mod builtin;
mod parser;
mod process;
#[cfg(test)]
mod process_tests;
mod repl;
mod shell;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Run a single command line and exit with its status
    #[arg(short, long)]
    command: Option<String>,
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let mut shell = Shell::new();
    shell.set_signals();
    let mut ctx = Context::new(shell.pid, shell.pgid, true);

    if let Some(command) = cli.command.as_deref() {
        run_command(&mut shell, &mut ctx, command)
    } else {
        run_interactive(&mut shell, &mut ctx)
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

fn run_command(shell: &mut Shell, ctx: &mut Context, command: &str) -> ExitCode {
    debug!("one-shot mode: {:?}", command);
    ExitCode::from(one_shot_code(shell, ctx, command))
}

/// Exit code for a single command line: the command's own status, after
/// collecting any background work it left behind.
pub(crate) fn one_shot_code(shell: &mut Shell, ctx: &mut Context, command: &str) -> u8 {
    match shell.eval_line(ctx, command) {
        Ok(ExitStatus::ExitedWith(code)) => code as u8,
        Ok(ExitStatus::Running(_)) => {
            // A trailing `&` in one-shot mode: collect it before leaving.
            for (_, state) in shell.jobs.drain() {
                shell.last_state = state;
            }
            shell.last_state.exit_code() as u8
        }
        Err(err) => {
            eprintln!("msh: {:#}", err);
            1
        }
    }
}

fn run_interactive(shell: &mut Shell, ctx: &mut Context) -> ExitCode {
    debug!("start interactive loop");
    let mut repl = Repl::new(shell);
    match repl.run(ctx) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("msh: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
