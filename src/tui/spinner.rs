use crate::messages::{ColoredMessage, get_waiting_message};
use crate::ui;

use colored::Colorize;
use std::future::Future;
use std::io::{self, Write};
use std::time::Duration;
use tokio::time;
use unicode_width::UnicodeWidthStr;

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct SpinnerState {
    current_frame: usize,
    message: ColoredMessage,
}

impl Default for SpinnerState {
    fn default() -> Self {
        Self::new()
    }
}

impl SpinnerState {
    pub fn new() -> Self {
        Self {
            current_frame: 0,
            message: get_waiting_message().clone(),
        }
    }

    /// Advances one frame, returning the rendered line and its display width
    pub fn tick(&mut self) -> (String, usize) {
        let frame = FRAMES[self.current_frame];
        self.current_frame = (self.current_frame + 1) % FRAMES.len();

        let width = frame.width() + 1 + self.message.text.width();
        let line = format!(
            "{frame} {}",
            self.message.text.as_str().color(self.message.color)
        );
        (line, width)
    }
}

/// Runs `operation` while a spinner animates on stdout.
///
/// The spinner line is wiped before this returns, whatever the outcome.
pub async fn run_with_spinner<F, Fut, T>(mut spinner: SpinnerState, operation: F) -> T
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = T>,
{
    if ui::is_quiet_mode() {
        return operation().await;
    }

    let (tx, mut rx) = tokio::sync::mpsc::channel::<()>(1);

    let spinner_handle = tokio::spawn(async move {
        let mut stdout = io::stdout();
        let mut widest = 0;
        loop {
            tokio::select! {
                _ = rx.recv() => break,
                () = time::sleep(Duration::from_millis(100)) => {
                    let (line, width) = spinner.tick();
                    widest = widest.max(width);
                    let _ = write!(stdout, "\r{line}");
                    let _ = stdout.flush();
                }
            }
        }
        let _ = write!(stdout, "\r{}\r", " ".repeat(widest));
        let _ = stdout.flush();
    });

    let result = operation().await;

    let _ = tx.send(()).await;
    let _ = spinner_handle.await;

    result
}
