use anyhow::{Context as _, Result};
use msh_types::{Context, ExitStatus};
use nix::unistd::{getpgrp, getpid, Pid};
use tracing::{debug, error, warn};

use crate::builtin::{self, ShellProxy};
use crate::parser::CommandPlan;
use crate::process::fork::fork_process;
use crate::process::signal::{set_sigint, SigintDisposition};
use crate::process::{wait_pid, Job, JobTable, Process, ProcessState, StdioRedirect};

/// Interpreter state: the most recent Termination Status and the tracked
/// background processes.
pub struct Shell {
    pub pid: Pid,
    pub pgid: Pid,
    pub last_state: ProcessState,
    pub jobs: JobTable,
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

impl Shell {
    pub fn new() -> Self {
        Shell {
            pid: getpid(),
            pgid: getpgrp(),
            // Defined default: `status` before any command reports code 0.
            last_state: ProcessState::Exited(0),
            jobs: JobTable::new(),
        }
    }

    /// Install the interpreter's own interrupt policy: SIGINT never stops
    /// the shell itself.
    pub fn set_signals(&self) {
        if let Err(err) = set_sigint(SigintDisposition::Ignore) {
            warn!("failed to ignore SIGINT in the interpreter: {}", err);
        }
    }

    pub fn eval_line(&mut self, ctx: &mut Context, line: &str) -> Result<ExitStatus> {
        let plan = CommandPlan::parse(line)?;
        self.execute(ctx, plan)
    }

    /// Dispatch one plan: no-op, builtin, or external launch.
    pub fn execute(&mut self, ctx: &mut Context, plan: CommandPlan) -> Result<ExitStatus> {
        if plan.is_noop() {
            debug!("no-op plan");
            return Ok(ExitStatus::ExitedWith(0));
        }

        let name = plan.argv[0].clone();
        if let Some(command) = builtin::get_command(&name) {
            debug!("dispatch builtin: {}", name);
            ctx.foreground = true;
            return Ok(command(ctx, plan.argv, self));
        }

        self.launch(ctx, plan)
    }

    fn launch(&mut self, ctx: &mut Context, plan: CommandPlan) -> Result<ExitStatus> {
        ctx.foreground = !plan.background;
        let cmd = plan.argv[0].clone();
        let redirect = StdioRedirect::new(plan.input, plan.output);
        let process = Process::new(cmd.clone(), plan.argv, redirect);

        let pid = match fork_process(ctx, &process) {
            Ok(pid) => pid,
            Err(err) => {
                // Process creation failure is resource exhaustion: fatal to
                // the interpreter, after draining background work.
                error!("fork failed: {:#}", err);
                eprintln!("msh: {:#}", err);
                self.last_state = ProcessState::Exited(1);
                self.exit_shell(ctx)
            }
        };

        if ctx.foreground {
            match wait_pid(pid, false) {
                Some((_, state)) => {
                    self.last_state = state;
                    Ok(ExitStatus::ExitedWith(state.exit_code()))
                }
                None => {
                    warn!("foreground child {} yielded no wait status", pid);
                    Ok(ExitStatus::ExitedWith(self.last_state.exit_code()))
                }
            }
        } else {
            println!("background pid {}", pid);
            self.jobs.insert(Job::new(pid, cmd));
            Ok(ExitStatus::Running(pid))
        }
    }

    /// Collect terminated background processes without blocking, reporting
    /// each exactly once and recording its status.
    pub fn reap_and_report(&mut self) {
        for (job, state) in self.jobs.reap_finished() {
            println!("background pid {} done: {}", job.pid, state);
            self.last_state = state;
        }
    }
}

impl ShellProxy for Shell {
    fn exit_shell(&mut self, _ctx: &Context) -> ! {
        for (job, state) in self.jobs.drain() {
            debug!("collected background pid {} on exit: {}", job.pid, state);
            self.last_state = state;
        }
        std::process::exit(self.last_state.exit_code());
    }

    fn changepwd(&mut self, path: &str) -> Result<()> {
        debug!("chdir to {}", path);
        std::env::set_current_dir(path).context("failed to change directory")
    }

    fn last_state(&self) -> ProcessState {
        self.last_state
    }
}
