use nix::unistd::Pid;
use tracing::debug;

use super::state::ProcessState;
use super::wait::wait_pid;

/// One tracked background process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub pid: Pid,
    pub cmd: String,
}

impl Job {
    pub fn new(pid: Pid, cmd: String) -> Self {
        Job { pid, cmd }
    }
}

/// The set of outstanding background processes. The execution engine
/// inserts, the reaper removes; the interpreter is single-threaded so plain
/// sequential access is enough.
#[derive(Debug, Default)]
pub struct JobTable {
    jobs: Vec<Job>,
}

impl JobTable {
    pub fn new() -> Self {
        JobTable { jobs: Vec::new() }
    }

    pub fn insert(&mut self, job: Job) {
        debug!("track background job pid:{} cmd:{}", job.pid, job.cmd);
        self.jobs.push(job);
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Non-blocking poll of every tracked pid. Terminated jobs are removed
    /// and returned, each exactly once. Safe to call with nothing
    /// outstanding.
    pub fn reap_finished(&mut self) -> Vec<(Job, ProcessState)> {
        let mut finished = Vec::new();
        self.jobs.retain(|job| match wait_pid(job.pid, true) {
            Some((_, state)) => {
                debug!("reaped background job pid:{} state:{}", job.pid, state);
                finished.push((job.clone(), state));
                false
            }
            None => true,
        });
        finished
    }

    /// Blocking collection of every remaining tracked process, in tracking
    /// order. Used by the orderly-shutdown path.
    pub fn drain(&mut self) -> Vec<(Job, ProcessState)> {
        let mut collected = Vec::new();
        for job in self.jobs.drain(..) {
            if let Some((_, state)) = wait_pid(job.pid, false) {
                debug!("drained background job pid:{} state:{}", job.pid, state);
                collected.push((job, state));
            }
        }
        collected
    }
}
