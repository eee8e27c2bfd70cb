use anyhow::{Context as _, Result};
use std::ffi::CString;
use tracing::{debug, error};

use super::redirect::StdioRedirect;
use super::signal::{set_sigint, SigintDisposition};
use nix::unistd::execvp;

/// One external command about to be launched. The parent owns the resulting
/// process handle; this type only describes what the child should become.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pub(crate) cmd: String,
    pub(crate) argv: Vec<String>,
    pub(crate) redirect: StdioRedirect,
}

impl Process {
    pub fn new(cmd: String, argv: Vec<String>, redirect: StdioRedirect) -> Self {
        Process { cmd, argv, redirect }
    }

    /// Child-side half of the launch: apply the interrupt disposition for
    /// this execution mode, wire up redirection, then replace the image via
    /// the PATH lookup. Never returns into interpreter code; any failure
    /// exits the child with code 1 without touching interpreter state.
    pub(crate) fn launch(&self, foreground: bool) -> Result<()> {
        if foreground {
            // Applied before exec so an interrupt arriving during setup
            // already hits the intended policy.
            set_sigint(SigintDisposition::Default)?;
        }

        self.redirect.apply(foreground)?;

        let cmd = CString::new(self.cmd.clone()).context("failed new CString")?;
        let argv: Result<Vec<CString>> = self
            .argv
            .clone()
            .into_iter()
            .map(|a| {
                CString::new(a).map_err(|e| anyhow::anyhow!("failed to create CString: {}", e))
            })
            .collect();
        let argv = argv?;

        debug!(
            "launch: execvp cmd:{:?} argv:{:?} foreground:{}",
            cmd, argv, foreground
        );

        match execvp(&cmd, &argv) {
            Ok(_) => Ok(()),
            Err(err) => {
                error!("failed to exec {:?} ({})", cmd, err);
                eprintln!("{}: command not found", self.cmd);
                std::process::exit(1);
            }
        }
    }
}
