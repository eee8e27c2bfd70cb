use anyhow::{Context as _, Result};
use libc::{STDIN_FILENO, STDOUT_FILENO};
use nix::fcntl::{open, OFlag};
use nix::sys::stat::Mode;
use nix::unistd::{close, dup2};
use std::os::unix::io::RawFd;
use tracing::debug;

/// Standard-stream redirection for a launched command.
///
/// Applied in the child between fork and exec; the opened descriptors are
/// scoped to the child and either consumed by the program image or released
/// when the child exits on error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StdioRedirect {
    pub input: Option<String>,
    pub output: Option<String>,
}

impl StdioRedirect {
    pub fn new(input: Option<String>, output: Option<String>) -> Self {
        StdioRedirect { input, output }
    }

    /// Wire up the child's stdin and stdout. A background child reads from
    /// /dev/null unconditionally; a foreground child reads from the input
    /// path when one was given. An output path is created/truncated in
    /// either mode.
    pub(crate) fn apply(&self, foreground: bool) -> Result<()> {
        let stdin_source = if foreground {
            self.input.as_deref()
        } else {
            Some("/dev/null")
        };

        if let Some(path) = stdin_source {
            let fd = open(path, OFlag::O_RDONLY, Mode::empty())
                .with_context(|| format!("cannot open {} for input", path))?;
            redirect_fd(fd, STDIN_FILENO)?;
        }

        if let Some(path) = self.output.as_deref() {
            let mode = Mode::from_bits_truncate(0o644);
            let fd = open(
                path,
                OFlag::O_WRONLY | OFlag::O_CREAT | OFlag::O_TRUNC,
                mode,
            )
            .with_context(|| format!("cannot open {} for output", path))?;
            redirect_fd(fd, STDOUT_FILENO)?;
        }

        Ok(())
    }
}

fn redirect_fd(fd: RawFd, target: RawFd) -> Result<()> {
    debug!("dup2 {} -> {}", fd, target);
    dup2(fd, target).context("failed dup2")?;
    close(fd).context("failed close")?;
    Ok(())
}
