use super::ShellProxy;
use msh_types::{Context, ExitStatus};
use std::fs::File;
use std::io::Write;
use std::mem;
use std::os::unix::io::FromRawFd;

/// `status` — render the most recent Termination Status. Before any command
/// has completed this reports the default of exit code 0.
pub fn command(ctx: &Context, _argv: Vec<String>, proxy: &mut dyn ShellProxy) -> ExitStatus {
    let file = unsafe { File::from_raw_fd(ctx.outfile) };
    writeln!(&file, "{}", proxy.last_state()).ok();
    mem::forget(file);
    ExitStatus::ExitedWith(0)
}
