//! Single-column selection menu
//!
//! The menu is drawn inline below the cursor. Every redraw first erases the
//! rows of the previous frame, so navigating never grows the scrollback.

use super::raw::{CrosstermKeys, CrosstermMode, Key, KeySource, RawSession, TerminalMode};
use crate::ui;

use anyhow::{Result, anyhow};
use colored::Colorize;
use crossterm::{
    cursor::MoveToPreviousLine,
    queue,
    style::Print,
    terminal::{self, Clear, ClearType},
};
use log::debug;
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

const NAVIGATION_HINT: &str = "Use ↑↓ arrows to navigate, Enter to select:";

/// Exit status used when the user interrupts a selection
pub const INTERRUPT_EXIT_CODE: i32 = 130;

/// Options plus the highlighted index of one active selection
#[derive(Debug, Clone)]
pub struct SelectionState {
    options: Vec<String>,
    cursor: usize,
}

impl SelectionState {
    pub fn new(options: Vec<String>) -> Result<Self> {
        if options.is_empty() {
            return Err(anyhow!("Cannot select from an empty list"));
        }
        Ok(Self { options, cursor: 0 })
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selected(&self) -> &str {
        // cursor < options.len() is upheld by every mutation
        self.options
            .get(self.cursor)
            .map_or("", String::as_str)
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        self.cursor = (self.cursor + 1).min(self.options.len() - 1);
    }
}

/// How a selection ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Selected(String),
    Interrupted,
}

struct FrameLine {
    text: String,
    highlighted: bool,
}

fn frame_lines(prompt: &str, state: &SelectionState) -> Vec<FrameLine> {
    let mut lines = vec![
        FrameLine {
            text: prompt.to_string(),
            highlighted: false,
        },
        FrameLine {
            text: NAVIGATION_HINT.to_string(),
            highlighted: false,
        },
        FrameLine {
            text: String::new(),
            highlighted: false,
        },
    ];

    for (index, option) in state.options().iter().enumerate() {
        if index == state.cursor() {
            lines.push(FrameLine {
                text: format!("> {option} <"),
                highlighted: true,
            });
        } else {
            lines.push(FrameLine {
                text: format!("  {option}"),
                highlighted: false,
            });
        }
    }

    lines
}

/// Terminal rows a line occupies once wrapped at `columns`
fn rows_for(text: &str, columns: u16) -> u16 {
    let columns = usize::from(columns.max(1));
    let width = text.width().max(1);
    u16::try_from(width.div_ceil(columns)).unwrap_or(u16::MAX)
}

/// Visible terminal dimensions frames are laid out against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalSize {
    pub columns: u16,
    pub rows: u16,
}

impl Default for TerminalSize {
    fn default() -> Self {
        Self {
            columns: 80,
            rows: 24,
        }
    }
}

struct FrameWriter<'a, W: Write> {
    out: &'a mut W,
    size: TerminalSize,
    drawn_rows: u16,
}

impl<'a, W: Write> FrameWriter<'a, W> {
    fn new(out: &'a mut W, size: TerminalSize) -> Self {
        Self {
            out,
            size,
            drawn_rows: 0,
        }
    }

    fn draw(&mut self, lines: &[FrameLine]) -> io::Result<()> {
        self.erase()?;
        for line in lines {
            let text = if line.highlighted {
                line.text.green().bold().to_string()
            } else {
                line.text.clone()
            };
            // raw mode: no implicit carriage return on newline
            queue!(self.out, Print(text), Print("\r\n"))?;
            self.drawn_rows = self
                .drawn_rows
                .saturating_add(rows_for(&line.text, self.size.columns));
        }
        self.out.flush()
    }

    /// Clears the last frame. Rows already scrolled off the top of the
    /// screen cannot be reached, so the move stops at the first visible row.
    fn erase(&mut self) -> io::Result<()> {
        if self.drawn_rows > 0 {
            let reachable = self.drawn_rows.min(self.size.rows.saturating_sub(1).max(1));
            queue!(
                self.out,
                MoveToPreviousLine(reachable),
                Clear(ClearType::FromCursorDown)
            )?;
            self.drawn_rows = 0;
        }
        self.out.flush()
    }
}

fn read_until_resolved<K, W>(
    prompt: &str,
    state: &mut SelectionState,
    keys: &mut K,
    frame: &mut FrameWriter<'_, W>,
) -> Result<Resolution>
where
    K: KeySource,
    W: Write,
{
    frame.draw(&frame_lines(prompt, state))?;
    loop {
        match keys.next_key()? {
            Key::Up => {
                state.move_up();
                frame.draw(&frame_lines(prompt, state))?;
            }
            Key::Down => {
                state.move_down();
                frame.draw(&frame_lines(prompt, state))?;
            }
            Key::Enter => return Ok(Resolution::Selected(state.selected().to_string())),
            Key::Interrupt => return Ok(Resolution::Interrupted),
            Key::Char(_) => {}
        }
    }
}

/// Runs one selection against the given terminal, key source and output.
///
/// Raw mode is held only between opening the session and returning. The menu
/// is erased and raw mode released on every exit, including errors from the
/// key source or the output. Interrupts are reported, not acted on.
pub fn run_selection<M, K, W>(
    prompt: &str,
    options: &[String],
    mode: M,
    keys: &mut K,
    out: &mut W,
    size: TerminalSize,
) -> Result<Resolution>
where
    M: TerminalMode,
    K: KeySource,
    W: Write,
{
    let mut state = SelectionState::new(options.to_vec())?;
    let mut session = RawSession::open(mode)?;

    let mut frame = FrameWriter::new(out, size);
    let outcome = read_until_resolved(prompt, &mut state, keys, &mut frame);
    let erased = frame.erase();
    let released = session.close();

    // the first failure wins
    let resolution = outcome?;
    erased?;
    released?;

    if let Resolution::Selected(choice) = &resolution {
        debug!("Selected option {} of {}: {choice}", state.cursor() + 1, options.len());
        writeln!(out, "{prompt} {}", format!("Selected: {choice}").cyan())?;
        out.flush()?;
    }

    Ok(resolution)
}

/// Shows a selection menu on the process terminal.
///
/// Ctrl+C restores the terminal and terminates the process.
pub fn select(prompt: &str, options: &[String]) -> Result<String> {
    let size = terminal::size().map_or_else(
        |_| TerminalSize::default(),
        |(columns, rows)| TerminalSize { columns, rows },
    );
    let mut stdout = io::stdout();

    match run_selection(
        prompt,
        options,
        CrosstermMode,
        &mut CrosstermKeys,
        &mut stdout,
        size,
    )? {
        Resolution::Selected(choice) => Ok(choice),
        Resolution::Interrupted => {
            ui::print_warning("Interrupted.");
            std::process::exit(INTERRUPT_EXIT_CODE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct CountingMode {
        enabled: Rc<Cell<usize>>,
        disabled: Rc<Cell<usize>>,
    }

    impl TerminalMode for CountingMode {
        fn enable(&mut self) -> io::Result<()> {
            self.enabled.set(self.enabled.get() + 1);
            Ok(())
        }

        fn disable(&mut self) -> io::Result<()> {
            self.disabled.set(self.disabled.get() + 1);
            Ok(())
        }
    }

    struct ScriptedKeys(VecDeque<Key>);

    impl ScriptedKeys {
        fn new(keys: impl IntoIterator<Item = Key>) -> Self {
            Self(keys.into_iter().collect())
        }
    }

    impl KeySource for ScriptedKeys {
        fn next_key(&mut self) -> Result<Key> {
            self.0
                .pop_front()
                .ok_or_else(|| anyhow!("script exhausted"))
        }
    }

    fn options(labels: &[&str]) -> Vec<String> {
        labels.iter().map(ToString::to_string).collect()
    }

    fn run(labels: &[&str], keys: Vec<Key>) -> (Result<Resolution>, CountingMode, String) {
        let mode = CountingMode::default();
        let mut source = ScriptedKeys::new(keys);
        let mut out = Vec::new();
        let result = run_selection(
            "Pick one:",
            &options(labels),
            mode.clone(),
            &mut source,
            &mut out,
            TerminalSize::default(),
        );
        (result, mode, String::from_utf8_lossy(&out).into_owned())
    }

    #[test]
    fn test_enter_selects_first_option_by_default() {
        let (result, _, _) = run(&["alpha", "beta"], vec![Key::Enter]);
        assert_eq!(
            result.expect("selection should succeed"),
            Resolution::Selected("alpha".to_string())
        );
    }

    #[test]
    fn test_arrows_move_cursor_and_clamp() {
        let (result, _, _) = run(
            &["alpha", "beta", "gamma"],
            vec![Key::Up, Key::Down, Key::Down, Key::Down, Key::Down, Key::Up, Key::Enter],
        );
        assert_eq!(
            result.expect("selection should succeed"),
            Resolution::Selected("beta".to_string())
        );
    }

    #[test]
    fn test_single_option_ignores_arrows() {
        let (result, _, _) = run(&["only"], vec![Key::Down, Key::Up, Key::Down, Key::Enter]);
        assert_eq!(
            result.expect("selection should succeed"),
            Resolution::Selected("only".to_string())
        );
    }

    #[test]
    fn test_characters_are_ignored() {
        let (result, _, _) = run(
            &["alpha", "beta"],
            vec![Key::Char("j".to_string()), Key::Down, Key::Char("k".to_string()), Key::Enter],
        );
        assert_eq!(
            result.expect("selection should succeed"),
            Resolution::Selected("beta".to_string())
        );
    }

    #[test]
    fn test_interrupt_releases_terminal_once() {
        let (result, mode, _) = run(&["alpha", "beta"], vec![Key::Down, Key::Interrupt]);
        assert_eq!(result.expect("selection should succeed"), Resolution::Interrupted);
        assert_eq!(mode.enabled.get(), 1);
        assert_eq!(mode.disabled.get(), 1);
    }

    #[test]
    fn test_enter_releases_terminal_once() {
        let (_, mode, _) = run(&["alpha"], vec![Key::Enter]);
        assert_eq!(mode.disabled.get(), 1);
    }

    #[test]
    fn test_key_source_error_still_releases_terminal() {
        let (result, mode, _) = run(&["alpha", "beta"], vec![Key::Down]);
        assert!(result.is_err());
        assert_eq!(mode.disabled.get(), 1);
    }

    #[test]
    fn test_key_source_error_erases_menu() {
        let (_, _, output) = run(&["alpha", "beta"], vec![Key::Down]);
        // erased before the redraw and again on the failed read
        assert_eq!(output.matches("\u{1b}[5F").count(), 2);
        assert!(!output.contains("Selected:"));
    }

    #[test]
    fn test_tall_frame_erase_stops_at_screen_top() {
        let labels: Vec<String> = (0..30).map(|i| format!("option-{i}")).collect();
        let mut source = ScriptedKeys::new(vec![Key::Enter]);
        let mut out = Vec::new();
        let size = TerminalSize {
            columns: 80,
            rows: 10,
        };
        let result = run_selection("Pick one:", &labels, CountingMode::default(), &mut source, &mut out, size);

        assert_eq!(
            result.expect("selection should succeed"),
            Resolution::Selected("option-0".to_string())
        );
        let output = String::from_utf8_lossy(&out);
        assert!(output.contains("\u{1b}[9F"));
        assert!(!output.contains("\u{1b}[33F"));
    }

    #[test]
    fn test_empty_options_never_touch_terminal() {
        let (result, mode, _) = run(&[], vec![Key::Enter]);
        assert!(result.is_err());
        assert_eq!(mode.enabled.get(), 0);
    }

    #[test]
    fn test_frame_highlights_cursor_option() {
        let (_, _, output) = run(&["alpha", "beta"], vec![Key::Down, Key::Enter]);
        assert!(output.contains("> beta <"));
        assert!(output.contains("  alpha"));
        assert!(output.contains(NAVIGATION_HINT));
        assert!(output.contains("Selected: beta"));
    }

    #[test]
    fn test_redraw_erases_previous_frame() {
        let (_, _, output) = run(&["alpha", "beta"], vec![Key::Down, Key::Enter]);
        // 3 header rows + 2 options; erased after the first frame and on exit
        assert_eq!(output.matches("\u{1b}[5F").count(), 2);
    }

    #[test]
    fn test_cursor_stays_in_bounds_for_every_short_sequence() {
        for len in 1..=4 {
            let labels: Vec<String> = (0..len).map(|i| format!("option-{i}")).collect();
            for pattern in 0u32..64 {
                let mut state =
                    SelectionState::new(labels.clone()).expect("non-empty options");
                for bit in 0..6 {
                    if pattern & (1 << bit) == 0 {
                        state.move_up();
                    } else {
                        state.move_down();
                    }
                    assert!(state.cursor() < len);
                }
                assert!(labels.iter().any(|label| label == state.selected()));
            }
        }
    }

    #[test]
    fn test_rows_for_wraps_long_lines() {
        assert_eq!(rows_for("", 80), 1);
        assert_eq!(rows_for("short", 80), 1);
        assert_eq!(rows_for(&"x".repeat(81), 80), 2);
        assert_eq!(rows_for(&"x".repeat(160), 80), 2);
    }
}
