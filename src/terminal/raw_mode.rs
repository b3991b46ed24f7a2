// ABOUTME: Scoped raw mode for the local terminal
// The guard restores the captured mode exactly once, on drop or explicit restore

use super::LocalTerminal;
use std::io;
use std::sync::Arc;
use tracing::{debug, warn};

/// Mode of the terminal before the session switched it to raw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TerminalState {
    was_raw: bool,
}

#[must_use = "raw mode is restored as soon as the guard is dropped"]
pub struct RawModeGuard<T: LocalTerminal> {
    terminal: Arc<T>,
    state: Option<TerminalState>,
}

impl<T: LocalTerminal> RawModeGuard<T> {
    /// Capture the current mode and switch the terminal to raw.
    pub fn enter(terminal: Arc<T>) -> io::Result<Self> {
        let was_raw = terminal.is_raw_mode_enabled()?;
        let state = TerminalState { was_raw };

        if !was_raw {
            terminal.enable_raw_mode()?;
        }
        debug!("Entered raw mode (previously raw: {})", was_raw);

        Ok(Self {
            terminal,
            state: Some(state),
        })
    }

    /// Restore now instead of waiting for drop.
    pub fn restore(mut self) {
        self.restore_once();
    }

    fn restore_once(&mut self) {
        let Some(state) = self.state.take() else {
            return;
        };

        if state.was_raw {
            return;
        }

        match self.terminal.disable_raw_mode() {
            Ok(()) => debug!("Restored terminal mode"),
            Err(e) => warn!("Failed to restore terminal mode: {}", e),
        }
    }
}

impl<T: LocalTerminal> Drop for RawModeGuard<T> {
    fn drop(&mut self) {
        self.restore_once();
    }
}
