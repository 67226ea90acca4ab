//! Terminal management for the closing key-press wait.

use crate::error::Result;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::io::{self, IsTerminal};
use tracing::debug;

/// Manages terminal state including raw mode.
/// Ensures terminal is restored on drop.
#[derive(Default)]
pub struct TerminalManager {
    /// Whether raw mode was enabled by this instance.
    was_raw: bool,
}

impl TerminalManager {
    /// Creates a new terminal manager.
    pub fn new() -> Self {
        Self { was_raw: false }
    }

    /// Returns true when stdin is attached to a terminal.
    pub fn is_interactive() -> bool {
        io::stdin().is_terminal()
    }

    /// Enters raw mode so a single key press is delivered without Enter.
    pub fn enter_raw_mode(&mut self) -> Result<()> {
        if !self.was_raw {
            enable_raw_mode()?;
            self.was_raw = true;
        }
        Ok(())
    }

    /// Exits raw mode, restoring normal terminal behavior.
    pub fn exit_raw_mode(&mut self) -> Result<()> {
        if self.was_raw {
            disable_raw_mode()?;
            self.was_raw = false;
        }
        Ok(())
    }

    /// Returns whether the terminal is currently in raw mode.
    pub fn is_raw(&self) -> bool {
        self.was_raw
    }

    /// Blocks until one key is pressed.
    ///
    /// Resize, mouse and key-release events are skipped.
    pub fn wait_for_key(&mut self) -> Result<()> {
        self.enter_raw_mode()?;
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    debug!(code = ?key.code, "Key pressed");
                    break;
                }
            }
        }
        self.exit_raw_mode()
    }
}

impl Drop for TerminalManager {
    fn drop(&mut self) {
        // Always restore terminal state on drop
        let _ = self.exit_raw_mode();
    }
}
