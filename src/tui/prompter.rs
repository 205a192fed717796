use super::{line, select};

use anyhow::Result;

/// The two kinds of question the workflows ask
pub trait Prompter {
    /// Free-text answer, newline stripped
    fn ask(&mut self, prompt: &str) -> Result<String>;

    /// One of `options`
    fn select(&mut self, prompt: &str, options: &[String]) -> Result<String>;

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        let answer = self.ask(prompt)?;
        Ok(line::parse_yes_no(&answer, default))
    }
}

/// Asks on the process terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        line::ask(prompt)
    }

    // Blocks the calling runtime thread on terminal input. The commit
    // workflow is the only task in flight while a question is open.
    fn select(&mut self, prompt: &str, options: &[String]) -> Result<String> {
        select::select(prompt, options)
    }
}
