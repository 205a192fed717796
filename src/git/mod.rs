// Git module providing the version-control side of the commit workflow

mod hooks;
mod repository;

pub use repository::GitRepo;

use anyhow::Result;
use std::fmt::Write;

/// Summary of a commit that was just created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitResult {
    pub branch: String,
    pub commit_hash: String,
    pub files_changed: usize,
    pub insertions: usize,
    pub deletions: usize,
}

/// Operations the commit workflow needs from version control
pub trait VersionControl {
    /// Stage every working-tree change, including deletions
    fn stage_all(&self) -> Result<()>;

    /// Patch text of the staged changes; empty when nothing is staged
    fn diff_staged(&self) -> Result<String>;

    /// Create one commit from the index
    fn commit(&self, subject: &str, body: Option<&str>) -> Result<CommitResult>;
}

/// Joins subject and optional body the way `git commit -m subject -m body` does
pub fn compose_message(subject: &str, body: Option<&str>) -> String {
    match body {
        Some(body) => format!("{subject}\n\n{body}"),
        None => subject.to_string(),
    }
}

pub fn format_commit_result(result: &CommitResult, message: &str) -> String {
    let mut output = format!(
        "[{} {}] {}\n",
        result.branch,
        result.commit_hash,
        message.lines().next().unwrap_or("")
    );

    let _ = writeln!(
        &mut output,
        " {} file{} changed, {} insertion{}(+), {} deletion{}(-)",
        result.files_changed,
        if result.files_changed == 1 { "" } else { "s" },
        result.insertions,
        if result.insertions == 1 { "" } else { "s" },
        result.deletions,
        if result.deletions == 1 { "" } else { "s" }
    );

    output
}
