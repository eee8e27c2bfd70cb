use anyhow::Result;
use msh_types::Context;
use std::io::{self, BufRead, Write};
use tracing::debug;

use crate::builtin::ShellProxy;
use crate::shell::Shell;

const PROMPT: &str = ": ";

/// The prompt/read/eval loop. Background jobs are reaped before each prompt
/// and again after each dispatched command, so completions are reported
/// promptly without ever blocking the loop.
pub struct Repl<'a> {
    pub shell: &'a mut Shell,
}

impl<'a> Repl<'a> {
    pub fn new(shell: &'a mut Shell) -> Self {
        Repl { shell }
    }

    pub fn run(&mut self, ctx: &mut Context) -> Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        let mut line = String::new();

        loop {
            self.shell.reap_and_report();

            write!(stdout, "{}", PROMPT)?;
            stdout.flush()?;

            line.clear();
            let read = stdin.lock().read_line(&mut line)?;
            if read == 0 {
                // End of input is an implicit `exit`.
                debug!("end of input, shutting down");
                self.shell.exit_shell(ctx);
            }

            if let Err(err) = self.shell.eval_line(ctx, &line) {
                // Malformed input: diagnose, treat the line as a no-op.
                eprintln!("msh: {:#}", err);
            }

            self.shell.reap_and_report();
        }
    }
}
