//! Raw terminal input
//!
//! A [`RawSession`] owns the terminal's raw mode for as long as it lives and
//! hands it back on [`RawSession::close`] or on drop, whichever comes first.
//! Key presses are read through the [`KeySource`] trait so the selector can be
//! driven by scripted input in tests.

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use log::debug;
use std::io;
use std::panic;
use std::sync::Once;

/// A classified key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Char(String),
    Up,
    Down,
    Enter,
    Interrupt,
}

/// Switches the terminal between cooked and raw input
pub trait TerminalMode {
    fn enable(&mut self) -> io::Result<()>;
    fn disable(&mut self) -> io::Result<()>;
}

/// Yields one complete key event per call
pub trait KeySource {
    fn next_key(&mut self) -> Result<Key>;
}

/// The process terminal, driven through crossterm
#[derive(Debug, Default, Clone, Copy)]
pub struct CrosstermMode;

impl TerminalMode for CrosstermMode {
    fn enable(&mut self) -> io::Result<()> {
        install_panic_restore();
        terminal::enable_raw_mode()
    }

    fn disable(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()
    }
}

/// Reads key events from the process terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct CrosstermKeys;

impl KeySource for CrosstermKeys {
    fn next_key(&mut self) -> Result<Key> {
        loop {
            let event = event::read().context("Failed to read terminal event")?;
            if let Event::Key(key) = event
                && let Some(classified) = classify(&key)
            {
                return Ok(classified);
            }
        }
    }
}

/// Maps a crossterm key event onto the keys the selector understands.
///
/// Release and repeat events, and keys with no meaning to the selector, map
/// to `None` so the caller keeps reading.
pub fn classify(key: &KeyEvent) -> Option<Key> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Key::Interrupt)
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Key::Char(c.to_string()))
        }
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Enter => Some(Key::Enter),
        _ => None,
    }
}

/// Scoped ownership of raw mode
pub struct RawSession<M: TerminalMode> {
    mode: M,
    active: bool,
}

impl<M: TerminalMode> RawSession<M> {
    /// Enables raw mode and returns the guard that will disable it again
    pub fn open(mut mode: M) -> Result<Self> {
        mode.enable().context("Failed to enable raw mode")?;
        debug!("Raw input session opened");
        Ok(Self { mode, active: true })
    }

    /// Restores cooked mode. Calling this more than once is a no-op.
    pub fn close(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.mode.disable().context("Failed to disable raw mode")?;
        debug!("Raw input session closed");
        Ok(())
    }
}

impl<M: TerminalMode> Drop for RawSession<M> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            debug!("Failed to restore terminal mode on drop: {e}");
        }
    }
}

static PANIC_HOOK: Once = Once::new();

// Release builds abort on panic, so the session guard never gets dropped.
fn install_panic_restore() {
    PANIC_HOOK.call_once(|| {
        let default_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info: &panic::PanicHookInfo| {
            let _ = terminal::disable_raw_mode();
            default_hook(panic_info);
        }));
    });
}
