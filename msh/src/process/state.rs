use nix::sys::signal::Signal;

/// Termination Status of a launched process: the exit code, or the signal
/// that killed it. A wait operation is the only producer; immutable once
/// recorded.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ProcessState {
    Exited(u8),
    Signaled(Signal),
}

impl ProcessState {
    /// The value the interpreter itself exits with when this is the last
    /// recorded status. Signal deaths use the conventional 128 + signo.
    pub fn exit_code(&self) -> i32 {
        match self {
            ProcessState::Exited(code) => *code as i32,
            ProcessState::Signaled(signal) => 128 + *signal as i32,
        }
    }
}

impl std::fmt::Display for ProcessState {
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ProcessState::Exited(code) => {
                write!(formatter, "exited normally, code {}", code)
            }
            ProcessState::Signaled(signal) => {
                write!(formatter, "terminated by signal {}", *signal as i32)
            }
        }
    }
}
