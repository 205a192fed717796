//! Cooked-mode line prompt

use anyhow::{Context, Result, bail};
use std::io::{self, BufRead, Write};

/// Writes `prompt`, then reads one line from `input`.
///
/// The trailing line terminator is removed; everything else is returned as
/// typed.
pub fn ask_with<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> Result<String> {
    write!(out, "{prompt}")?;
    out.flush()?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("Failed to read from standard input")?;
    if read == 0 {
        bail!("Standard input closed before an answer was given");
    }

    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(line)
}

/// Prompts on stdout and reads the answer from stdin
pub fn ask(prompt: &str) -> Result<String> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    ask_with(&mut input, &mut io::stdout(), prompt)
}

/// Interprets a y/n answer, falling back to `default` for anything else
pub fn parse_yes_no(answer: &str, default: bool) -> bool {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => true,
        "n" | "no" => false,
        _ => default,
    }
}
