use anyhow::Result;
use msh_types::{Context, ExitStatus};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use tracing::debug;

use crate::process::ProcessState;

pub mod cd;
pub mod status;

/// Interface builtin commands use to reach back into the shell without
/// direct coupling.
pub trait ShellProxy {
    /// Orderly shutdown: drain tracked background processes, then terminate
    /// the interpreter with the last known status code. Never returns.
    fn exit_shell(&mut self, ctx: &Context) -> !;

    /// Change the interpreter's working directory.
    fn changepwd(&mut self, path: &str) -> Result<()>;

    /// The most recent Termination Status.
    fn last_state(&self) -> ProcessState;
}

/// All builtin commands conform to this signature.
pub type BuiltinCommand =
    fn(ctx: &Context, argv: Vec<String>, proxy: &mut dyn ShellProxy) -> ExitStatus;

static BUILTIN_COMMAND: Lazy<HashMap<&str, BuiltinCommand>> = Lazy::new(|| {
    let mut builtin = HashMap::new();
    builtin.insert("cd", cd::command as BuiltinCommand);
    builtin.insert("status", status::command as BuiltinCommand);
    builtin.insert("exit", exit as BuiltinCommand);
    builtin
});

/// Look up a builtin by its exact, case-sensitive name.
pub fn get_command(name: &str) -> Option<BuiltinCommand> {
    BUILTIN_COMMAND.get(name).copied()
}

/// Built-in exit command: graceful shell termination.
pub fn exit(ctx: &Context, _argv: Vec<String>, proxy: &mut dyn ShellProxy) -> ExitStatus {
    debug!("exit command called - initiating shell shutdown");
    proxy.exit_shell(ctx)
}
