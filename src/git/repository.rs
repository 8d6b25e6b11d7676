use crate::error::{GitError, GitResult};
use crate::git::executor::GitExecutor;
use std::env;
use std::path::{Path, PathBuf};

/// The version-control queries the commit workflow needs
///
/// The synthesis loop only sees this trait, so tests can substitute a fake.
pub trait GitCollaborator {
    /// Whether the working directory is inside a git work tree
    fn is_repo(&self) -> bool;

    fn staged_diff(&self) -> GitResult<String>;

    /// `git diff --cached --name-status` output
    fn staged_name_status(&self) -> GitResult<String>;

    fn current_branch(&self) -> GitResult<String>;

    fn commit(&self, message: &str) -> GitResult<()>;
}

/// A git working directory queried through the git CLI
#[derive(Debug)]
pub struct Repository {
    path: PathBuf,
    executor: GitExecutor,
}

impl Repository {
    /// Repository rooted at the current working directory
    pub fn current() -> GitResult<Self> {
        let current_dir = env::current_dir().map_err(GitError::IoError)?;
        Ok(Self::new(current_dir))
    }

    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let executor = GitExecutor::new(&path);

        Self { path, executor }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn executor(&self) -> &GitExecutor {
        &self.executor
    }
}

impl GitCollaborator for Repository {
    fn is_repo(&self) -> bool {
        match self.executor.execute("rev-parse --is-inside-work-tree") {
            Ok(output) => output.stdout.trim() == "true",
            Err(_) => false,
        }
    }

    fn staged_diff(&self) -> GitResult<String> {
        Ok(self.executor.execute("diff --cached --unified=3")?.stdout)
    }

    fn staged_name_status(&self) -> GitResult<String> {
        Ok(self.executor.execute("diff --cached --name-status")?.stdout)
    }

    /// Empty in detached HEAD state
    fn current_branch(&self) -> GitResult<String> {
        let output = self.executor.execute("branch --show-current")?;
        Ok(output.stdout.trim().to_string())
    }

    fn commit(&self, message: &str) -> GitResult<()> {
        self.executor.execute_args(&["commit", "-m", message])?;
        Ok(())
    }
}
