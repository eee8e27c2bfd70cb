use anyhow::{Context as _, Result};
use nix::unistd::{fork, ForkResult, Pid};
use tracing::{debug, error};

use super::process::Process;
use msh_types::Context;

/// Create the child for an external command. The parent gets the child's
/// pid back and owns it from there (blocking wait for a foreground command,
/// job-table registration for a background one). The child applies its
/// signal disposition and redirection and execs; it never returns into
/// interpreter code.
pub(crate) fn fork_process(ctx: &Context, process: &Process) -> Result<Pid> {
    debug!(
        "fork_process cmd:{} foreground:{}",
        process.cmd, ctx.foreground
    );

    let pid = unsafe { fork().context("failed fork")? };

    match pid {
        ForkResult::Parent { child } => {
            debug!("forked child pid: {}", child);
            Ok(child)
        }
        ForkResult::Child => {
            if let Err(e) = process.launch(ctx.foreground) {
                error!("child launch failed: {}", e);
                eprintln!("{}: {:#}", process.cmd, e);
                std::process::exit(1);
            }
            // execvp replaces the image on success and exits on failure,
            // so this point is never reached.
            std::process::exit(1);
        }
    }
}
