use std::io::Write;

use crate::error::{DashboardError, Result};
use crate::models::Signal;

/// Audible cue for new signals. Fire-and-forget: the dashboard logs a failure
/// and moves on.
pub trait Notifier: Send {
    fn signal_cue(&mut self, signal: &Signal) -> Result<()>;
}

/// Rings the terminal bell on stderr.
#[derive(Debug, Default)]
pub struct TerminalBell;

impl Notifier for TerminalBell {
    fn signal_cue(&mut self, _signal: &Signal) -> Result<()> {
        let mut err = std::io::stderr().lock();
        err.write_all(b"\x07")
            .and_then(|_| err.flush())
            .map_err(|e| DashboardError::Notify(e.to_string()))
    }
}

#[derive(Debug, Default)]
pub struct Silent;

impl Notifier for Silent {
    fn signal_cue(&mut self, _signal: &Signal) -> Result<()> {
        Ok(())
    }
}

pub fn from_config(sound_enabled: bool) -> Box<dyn Notifier> {
    if sound_enabled {
        Box::new(TerminalBell)
    } else {
        Box::new(Silent)
    }
}
