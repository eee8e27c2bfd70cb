#![allow(clippy::module_inception)]

pub mod fork;
pub mod job;
pub mod process;
pub mod redirect;
pub mod signal;
pub mod state;
pub mod wait;

pub use job::{Job, JobTable};
pub use process::Process;
pub use redirect::StdioRedirect;
pub use state::ProcessState;
pub use wait::wait_pid;
