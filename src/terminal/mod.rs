// ABOUTME: Local terminal control: raw mode with guaranteed restore, size queries and resize forwarding

pub mod raw_mode;
pub mod resize;

pub use raw_mode::RawModeGuard;
pub use resize::{ResizeNotifier, ResizeWatcher};

use crate::models::TerminalSize;
use std::io;

/// Operations the session needs from the local terminal device.
#[cfg_attr(test, mockall::automock)]
pub trait LocalTerminal: Send + Sync {
    fn is_raw_mode_enabled(&self) -> io::Result<bool>;
    fn enable_raw_mode(&self) -> io::Result<()>;
    fn disable_raw_mode(&self) -> io::Result<()>;
    fn size(&self) -> io::Result<TerminalSize>;
}

/// The process's controlling terminal, driven through crossterm.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrosstermTerminal;

impl LocalTerminal for CrosstermTerminal {
    fn is_raw_mode_enabled(&self) -> io::Result<bool> {
        crossterm::terminal::is_raw_mode_enabled()
    }

    fn enable_raw_mode(&self) -> io::Result<()> {
        crossterm::terminal::enable_raw_mode()
    }

    fn disable_raw_mode(&self) -> io::Result<()> {
        crossterm::terminal::disable_raw_mode()
    }

    fn size(&self) -> io::Result<TerminalSize> {
        crossterm::terminal::size().map(TerminalSize::from)
    }
}
