use anyhow::Result;
use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};
use tracing::debug;

/// Interrupt-signal policy for the current process.
///
/// The interpreter always ignores SIGINT. A foreground child restores the
/// default disposition between fork and exec so it can be interrupted; a
/// background child keeps the inherited ignore (an ignored disposition
/// survives exec).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SigintDisposition {
    Ignore,
    Default,
}

pub(crate) fn set_sigint(disposition: SigintDisposition) -> Result<()> {
    let handler = match disposition {
        SigintDisposition::Ignore => SigHandler::SigIgn,
        SigintDisposition::Default => SigHandler::SigDfl,
    };
    debug!("set SIGINT disposition {:?}", disposition);
    let action = SigAction::new(handler, SaFlags::empty(), SigSet::all());
    unsafe {
        sigaction(Signal::SIGINT, &action)
            .map_err(|e| anyhow::anyhow!("failed to set SIGINT disposition: {}", e))?;
    }
    Ok(())
}
