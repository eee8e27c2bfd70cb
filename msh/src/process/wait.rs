use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::Pid;
use tracing::{debug, error};

use super::state::ProcessState;

/// Wait for one specific child. With `no_hang` the call polls and returns
/// `None` while the child is still alive; without it the call blocks until
/// the child terminates.
pub fn wait_pid(pid: Pid, no_hang: bool) -> Option<(Pid, ProcessState)> {
    let options = if no_hang {
        Some(WaitPidFlag::WNOHANG)
    } else {
        None
    };

    let res = match waitpid(pid, options) {
        Ok(WaitStatus::Exited(pid, status)) => {
            debug!("process {} exited with status {}", pid, status);
            (pid, ProcessState::Exited(status as u8))
        }
        Ok(WaitStatus::Signaled(pid, signal, core_dumped)) => {
            debug!(
                "process {} killed by signal {:?}, core_dumped: {}",
                pid, signal, core_dumped
            );
            (pid, ProcessState::Signaled(signal))
        }
        Ok(WaitStatus::StillAlive) => {
            return None;
        }
        Err(nix::errno::Errno::ECHILD) => {
            // Already collected elsewhere; there is no status to observe,
            // so report nothing rather than invent one.
            debug!("no child process {} (ECHILD)", pid);
            return None;
        }
        status => {
            error!("unexpected waitpid status for pid {}: {:?}", pid, status);
            return None;
        }
    };

    Some(res)
}
