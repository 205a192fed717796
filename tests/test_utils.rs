#![allow(dead_code)]

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use commit_commander::{
    CommitResult, Config, Prompter, Suggester, SuggestionContext, VersionControl,
    config::Questions,
};
use git2::Repository;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

/// Builders for the data most tests need
pub struct MockDataBuilder;

impl MockDataBuilder {
    /// Configuration with a key, the given menus and both optional questions off
    pub fn config() -> Config {
        Config {
            api_key: Some("test-key".to_string()),
            questions: Questions {
                ask_for_details: false,
                confirm_before_commit: false,
                ..Questions::default()
            },
            ..Config::default()
        }
    }

    pub fn config_without_key() -> Config {
        Config {
            api_key: None,
            ..Self::config()
        }
    }

    pub fn menus(config: &mut Config, commit_types: &[&str], scope_types: &[&str]) {
        config.commit_types = commit_types.iter().map(ToString::to_string).collect();
        config.scope_types = scope_types.iter().map(ToString::to_string).collect();
    }
}

/// Answers prompts from a script and records what was asked
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    selections: VecDeque<String>,
    pub asked: Vec<String>,
    pub select_calls: Vec<(String, Vec<String>)>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[&str], selections: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(ToString::to_string).collect(),
            selections: selections.iter().map(ToString::to_string).collect(),
            ..Self::default()
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.answers.is_empty() && self.selections.is_empty()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        self.asked.push(prompt.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| anyhow!("No scripted answer for {prompt:?}"))
    }

    fn select(&mut self, prompt: &str, options: &[String]) -> Result<String> {
        self.select_calls.push((prompt.to_string(), options.to_vec()));
        let choice = self
            .selections
            .pop_front()
            .ok_or_else(|| anyhow!("No scripted selection for {prompt:?}"))?;
        if options.contains(&choice) {
            Ok(choice)
        } else {
            Err(anyhow!("{choice:?} is not one of {options:?}"))
        }
    }
}

/// Version control double that records every call
#[derive(Default)]
pub struct RecordingGit {
    pub diff: String,
    pub fail_stage: bool,
    pub fail_commit: bool,
    pub stage_calls: RefCell<usize>,
    pub diff_calls: RefCell<usize>,
    pub commits: RefCell<Vec<(String, Option<String>)>>,
}

impl RecordingGit {
    pub fn with_diff(diff: &str) -> Self {
        Self {
            diff: diff.to_string(),
            ..Self::default()
        }
    }

    pub fn commit_count(&self) -> usize {
        self.commits.borrow().len()
    }
}

impl VersionControl for RecordingGit {
    fn stage_all(&self) -> Result<()> {
        *self.stage_calls.borrow_mut() += 1;
        if self.fail_stage {
            return Err(anyhow!("index is locked"));
        }
        Ok(())
    }

    fn diff_staged(&self) -> Result<String> {
        *self.diff_calls.borrow_mut() += 1;
        Ok(self.diff.clone())
    }

    fn commit(&self, subject: &str, body: Option<&str>) -> Result<CommitResult> {
        self.commits
            .borrow_mut()
            .push((subject.to_string(), body.map(ToString::to_string)));
        if self.fail_commit {
            return Err(anyhow!("pre-commit hook failed"));
        }
        Ok(CommitResult {
            branch: "main".to_string(),
            commit_hash: "abc1234".to_string(),
            files_changed: 1,
            insertions: 2,
            deletions: 0,
        })
    }
}

/// Suggester returning a fixed reply
pub struct CannedSuggester {
    reply: std::result::Result<String, String>,
    calls: AtomicUsize,
}

impl CannedSuggester {
    pub fn ok(suggestion: &str) -> Self {
        Self {
            reply: Ok(suggestion.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Suggester for CannedSuggester {
    async fn suggest(&self, _diff: &str, _context: &SuggestionContext) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone().map_err(|e| anyhow!(e))
    }
}

/// Creates a repository in a temp directory with an identity configured
pub fn setup_git_repo() -> Result<(TempDir, Repository)> {
    let temp_dir = TempDir::new()?;
    let repo = Repository::init(temp_dir.path())?;
    {
        let mut config = repo.config()?;
        config.set_str("user.name", "Test User")?;
        config.set_str("user.email", "test@example.com")?;
    }
    Ok((temp_dir, repo))
}

pub fn write_file(root: &Path, name: &str, content: &str) -> Result<()> {
    let path = root.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}
