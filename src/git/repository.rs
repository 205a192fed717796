use super::hooks;
use super::{CommitResult, VersionControl, compose_message};

use anyhow::{Context as AnyhowContext, Result, anyhow};
use git2::{Commit, DiffFormat, IndexAddOption, Oid, Repository, Tree};
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// Represents a Git repository and provides methods for interacting with it.
pub struct GitRepo {
    repo_path: PathBuf,
}

impl GitRepo {
    /// Creates a new `GitRepo` for the working tree at `repo_path`.
    pub fn new(repo_path: &Path) -> Self {
        Self {
            repo_path: repo_path.to_path_buf(),
        }
    }

    /// Finds the repository containing the current directory.
    pub fn discover() -> Result<Self> {
        let repo = Repository::discover(".").map_err(|_| {
            anyhow!("Not in a Git repository. Please run this command from within a Git repository.")
        })?;
        let workdir = repo
            .workdir()
            .context("Repository has no working directory")?;
        Ok(Self::new(workdir))
    }

    /// Open the repository at the stored path
    pub fn open_repo(&self) -> Result<Repository, git2::Error> {
        Repository::open(&self.repo_path)
    }

    /// Retrieves the current branch name.
    pub fn get_current_branch(&self) -> Result<String> {
        let repo = self.open_repo()?;
        if let Ok(head) = repo.head() {
            let branch_name = head.shorthand().unwrap_or("HEAD detached").to_string();
            debug!("Current branch: {branch_name}");
            Ok(branch_name)
        } else {
            // Unborn HEAD: read the branch name it points at
            let name = repo
                .find_reference("HEAD")
                .ok()
                .and_then(|head| head.symbolic_target().map(ToString::to_string))
                .and_then(|target| target.strip_prefix("refs/heads/").map(ToString::to_string))
                .unwrap_or_else(|| "main".to_string());
            debug!("No commits yet, branch is {name}");
            Ok(name)
        }
    }

    fn head_commit(repo: &Repository) -> Result<Option<Commit<'_>>> {
        match repo.head() {
            Ok(head) => Ok(Some(head.peel_to_commit()?)),
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => Ok(None),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn head_tree(repo: &Repository) -> Result<Option<Tree<'_>>> {
        Ok(match Self::head_commit(repo)? {
            Some(commit) => Some(commit.tree()?),
            None => None,
        })
    }

    fn staged_delta_count(repo: &Repository) -> Result<usize> {
        let head_tree = Self::head_tree(repo)?;
        let index = repo.index()?;
        let diff = repo.diff_tree_to_index(head_tree.as_ref(), Some(&index), None)?;
        Ok(diff.deltas().len())
    }

    /// Describes a commit that already exists. Never fails: a value that
    /// cannot be read is logged and reported as zero or "HEAD".
    fn summarize(
        &self,
        repo: &Repository,
        parent: Option<&Commit<'_>>,
        tree: &Tree<'_>,
        oid: Oid,
    ) -> CommitResult {
        let stats = parent
            .map(Commit::tree)
            .transpose()
            .and_then(|parent_tree| repo.diff_tree_to_tree(parent_tree.as_ref(), Some(tree), None))
            .and_then(|diff| diff.stats());
        let (files_changed, insertions, deletions) = match stats {
            Ok(stats) => (stats.files_changed(), stats.insertions(), stats.deletions()),
            Err(e) => {
                warn!("Could not compute stats for commit {oid}: {e}");
                (0, 0, 0)
            }
        };

        let branch = self.get_current_branch().unwrap_or_else(|e| {
            warn!("Could not read branch name after commit {oid}: {e}");
            "HEAD".to_string()
        });

        CommitResult {
            branch,
            commit_hash: oid.to_string().chars().take(7).collect(),
            files_changed,
            insertions,
            deletions,
        }
    }
}

impl VersionControl for GitRepo {
    fn stage_all(&self) -> Result<()> {
        debug!("Staging all changes in {}", self.repo_path.display());
        let repo = self.open_repo()?;
        let mut index = repo.index().context("Failed to open the index")?;

        // Same effect as `git add -A`: new and modified files, then removals
        index
            .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
            .context("Failed to stage changes")?;
        index
            .update_all(["*"].iter(), None)
            .context("Failed to stage removed files")?;
        index.write().context("Failed to write the index")?;

        debug!("Index now holds {} entries", index.len());
        Ok(())
    }

    fn diff_staged(&self) -> Result<String> {
        let repo = self.open_repo()?;
        let head_tree = Self::head_tree(&repo)?;
        let index = repo.index()?;
        let diff = repo
            .diff_tree_to_index(head_tree.as_ref(), Some(&index), None)
            .context("Failed to diff the index against HEAD")?;

        let mut patch = String::new();
        diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
            if matches!(line.origin(), '+' | '-' | ' ') {
                patch.push(line.origin());
            }
            patch.push_str(&String::from_utf8_lossy(line.content()));
            true
        })?;

        debug!("Staged diff is {} bytes", patch.len());
        Ok(patch)
    }

    fn commit(&self, subject: &str, body: Option<&str>) -> Result<CommitResult> {
        let repo = self.open_repo()?;

        let parent = Self::head_commit(&repo)?;
        if Self::staged_delta_count(&repo)? == 0 {
            return Err(anyhow!("Nothing to commit: no changes are staged"));
        }

        hooks::execute_hook(&repo, "pre-commit")?;

        let signature = repo
            .signature()
            .context("No commit identity configured (set user.name and user.email)")?;
        let mut index = repo.index()?;
        // pick up anything the pre-commit hook staged
        index.read(false)?;
        let tree_id = index.write_tree()?;
        let tree = repo.find_tree(tree_id)?;

        let message = compose_message(subject, body);
        let parents: Vec<&Commit> = parent.iter().collect();
        let oid = repo
            .commit(Some("HEAD"), &signature, &signature, &message, &tree, &parents)
            .context("Failed to create commit")?;
        debug!("Created commit {oid}");

        if let Err(e) = hooks::execute_hook(&repo, "post-commit") {
            debug!("Post-commit hook failed: {e}");
        }

        Ok(self.summarize(&repo, parent.as_ref(), &tree, oid))
    }
}
