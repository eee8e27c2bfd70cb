use super::ShellProxy;
use msh_types::{Context, ExitStatus};
use std::fs::File;
use std::io::Write;
use std::mem;
use std::os::unix::io::FromRawFd;

/// `cd [path]` — change the interpreter's working directory. With no
/// argument, the target comes from the HOME environment variable. Failure
/// is reported but never fatal to the interpreter, and the Termination
/// Status is left untouched either way.
pub fn command(ctx: &Context, argv: Vec<String>, proxy: &mut dyn ShellProxy) -> ExitStatus {
    let dir = match argv.get(1) {
        Some(dir) => dir.clone(),
        None => match std::env::var("HOME") {
            Ok(home) => home,
            Err(_) => {
                report(ctx, "cd: HOME is not set");
                return ExitStatus::ExitedWith(1);
            }
        },
    };

    match proxy.changepwd(&dir) {
        Ok(_) => ExitStatus::ExitedWith(0),
        Err(err) => {
            report(ctx, &format!("cd: {}: {}", dir, err));
            ExitStatus::ExitedWith(1)
        }
    }
}

fn report(ctx: &Context, msg: &str) {
    let file = unsafe { File::from_raw_fd(ctx.outfile) };
    writeln!(&file, "{}", msg).ok();
    mem::forget(file);
}
