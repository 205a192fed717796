//! Commit hooks
//!
//! libgit2 never runs hooks, so the commit path invokes `pre-commit` and
//! `post-commit` itself. Like git, a hook file that is not executable is
//! skipped.

use anyhow::{Context as AnyhowContext, Result, bail};
use git2::Repository;
use log::debug;
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

/// Runs `hook_name` from the repository's hooks directory when present.
///
/// A missing or non-executable hook counts as success. A hook that exits
/// non-zero is an error naming the hook and its exit code.
pub fn execute_hook(repo: &Repository, hook_name: &str) -> Result<()> {
    let Some(hook_path) = runnable_hook(repo, hook_name) else {
        debug!("No runnable '{hook_name}' hook");
        return Ok(());
    };

    let workdir = repo
        .workdir()
        .context("Repository has no working directory")?;
    debug!("Running '{hook_name}' hook at {}", hook_path.display());

    let mut child = Command::new(&hook_path)
        .current_dir(workdir)
        .env("GIT_DIR", repo.path())
        .env("GIT_WORK_TREE", workdir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("Failed to start '{hook_name}' hook"))?;

    let stdout = child.stdout.take().map(|out| forward(out, io::stdout));
    let stderr = child.stderr.take().map(|err| forward(err, io::stderr));

    let status = child
        .wait()
        .with_context(|| format!("Failed to wait for '{hook_name}' hook"))?;
    for handle in [stdout, stderr].into_iter().flatten() {
        let _ = handle.join();
    }

    if !status.success() {
        match status.code() {
            Some(code) => bail!("'{hook_name}' hook failed with exit code {code}"),
            None => bail!("'{hook_name}' hook was terminated by a signal"),
        }
    }

    debug!("'{hook_name}' hook passed");
    Ok(())
}

fn runnable_hook(repo: &Repository, hook_name: &str) -> Option<PathBuf> {
    let path = repo.path().join("hooks").join(hook_name);
    is_executable(&path).then_some(path)
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .is_ok_and(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

// Copies hook output to the terminal as it arrives
fn forward<R, W, F>(source: R, sink: F) -> thread::JoinHandle<()>
where
    R: Read + Send + 'static,
    W: Write,
    F: FnOnce() -> W + Send + 'static,
{
    thread::spawn(move || {
        let _ = io::copy(&mut BufReader::new(source), &mut sink());
    })
}
