use libc::STDOUT_FILENO;
use nix::unistd::Pid;
use std::os::unix::io::RawFd;
use thiserror::Error;

/// msh specific error types
#[derive(Error, Debug)]
pub enum MshError {
    #[error("`{0}` requires a path operand")]
    MissingRedirectTarget(char),
}

pub type MshResult<T> = std::result::Result<T, MshError>;

/// Per-dispatch execution context handed to builtins and the process core.
///
/// `outfile` is where builtins write their normal output; it is always the
/// interpreter's own stdout (the interpreter never redirects its own
/// streams), but builtins go through the fd so they stay decoupled from the
/// shell's stdio.
#[derive(Debug, Clone)]
pub struct Context {
    pub shell_pid: Pid,
    pub shell_pgid: Pid,
    /// Whether the command currently being dispatched runs in the foreground.
    pub foreground: bool,
    pub outfile: RawFd,
}

impl Context {
    pub fn new(shell_pid: Pid, shell_pgid: Pid, foreground: bool) -> Self {
        Context {
            shell_pid,
            shell_pgid,
            foreground,
            outfile: STDOUT_FILENO,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ExitStatus {
    ExitedWith(i32),
    Running(Pid),
}
