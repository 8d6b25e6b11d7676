#![allow(dead_code)]

use async_trait::async_trait;
use shellmind::error::{GitError, GitResult};
use shellmind::exec::{ExecError, ProcessExecutor};
use shellmind::git::GitCollaborator;
use shellmind::llm::{LLMClient, LLMError};
use shellmind::shell::{LineReader, ReadError, ReadOutcome};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Mutex;
use tempfile::TempDir;

/// LLM client that replays scripted responses and records every prompt
pub struct ScriptedLLM {
    responses: Mutex<VecDeque<Result<String, LLMError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedLLM {
    pub fn new(responses: Vec<Result<String, LLMError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Every call answers successfully with these texts, in order
    pub fn replies(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|text| Ok(text.to_string())).collect())
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMClient for ScriptedLLM {
    async fn ask(&self, prompt: &str) -> Result<String, LLMError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LLMError::ApiError("no scripted response left".to_string())))
    }
}

/// Process executor that records commands instead of running them
#[derive(Default)]
pub struct RecordingExecutor {
    commands: RefCell<Vec<String>>,
    exit_code: Option<i32>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every command "exits" with this non-zero status
    pub fn failing(code: i32) -> Self {
        Self {
            commands: RefCell::new(Vec::new()),
            exit_code: Some(code),
        }
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.borrow().clone()
    }
}

impl ProcessExecutor for RecordingExecutor {
    fn execute(&self, command: &str) -> Result<(), ExecError> {
        self.commands.borrow_mut().push(command.to_string());
        match self.exit_code {
            Some(code) => Err(ExecError::ExitStatus(Some(code))),
            None => Ok(()),
        }
    }
}

/// Line reader fed from a fixed script
pub struct ScriptedReader {
    script: VecDeque<Result<ReadOutcome, ReadError>>,
    pub prompts: Vec<String>,
    pub recalled: Vec<String>,
}

impl ScriptedReader {
    pub fn new(script: Vec<Result<ReadOutcome, ReadError>>) -> Self {
        Self {
            script: script.into(),
            prompts: Vec::new(),
            recalled: Vec::new(),
        }
    }

    /// Plain lines followed by end of input
    pub fn lines(lines: &[&str]) -> Self {
        Self::new(
            lines
                .iter()
                .map(|line| Ok(ReadOutcome::Line(line.to_string())))
                .collect(),
        )
    }

    pub fn reads(&self) -> usize {
        self.prompts.len()
    }
}

impl LineReader for ScriptedReader {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome, ReadError> {
        self.prompts.push(prompt.to_string());
        self.script.pop_front().unwrap_or(Ok(ReadOutcome::Eof))
    }

    fn add_history(&mut self, line: &str) {
        self.recalled.push(line.to_string());
    }
}

/// In-memory git collaborator
#[derive(Clone)]
pub struct FakeGit {
    pub repo: bool,
    pub name_status: String,
    pub diff: String,
    pub branch: Option<String>,
    pub committed: RefCell<Vec<String>>,
}

impl FakeGit {
    pub fn staged() -> Self {
        Self {
            repo: true,
            name_status: "M\tsrc/login.rs\n".to_string(),
            diff: "diff --git a/src/login.rs b/src/login.rs\n+pub fn login() {}\n".to_string(),
            branch: Some("feature/login".to_string()),
            committed: RefCell::new(Vec::new()),
        }
    }

    pub fn not_a_repo() -> Self {
        Self {
            repo: false,
            ..Self::staged()
        }
    }

    pub fn nothing_staged() -> Self {
        Self {
            name_status: String::new(),
            diff: String::new(),
            ..Self::staged()
        }
    }
}

impl GitCollaborator for FakeGit {
    fn is_repo(&self) -> bool {
        self.repo
    }

    fn staged_diff(&self) -> GitResult<String> {
        Ok(self.diff.clone())
    }

    fn staged_name_status(&self) -> GitResult<String> {
        Ok(self.name_status.clone())
    }

    fn current_branch(&self) -> GitResult<String> {
        self.branch
            .clone()
            .ok_or_else(|| GitError::CommandFailed("fatal: not on a branch".to_string()))
    }

    fn commit(&self, message: &str) -> GitResult<()> {
        self.committed.borrow_mut().push(message.to_string());
        Ok(())
    }
}

/// Helper to create a test git repository
pub fn create_test_repo() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let repo_path = temp_dir.path().to_path_buf();

    git(&repo_path, &["init", "-b", "main"]);
    git(&repo_path, &["config", "user.name", "Test User"]);
    git(&repo_path, &["config", "user.email", "test@example.com"]);

    (temp_dir, repo_path)
}

/// Write a file and stage it
pub fn stage_file(repo_path: &Path, file: &str, content: &str) {
    fs::write(repo_path.join(file), content).expect("Failed to write file");
    git(repo_path, &["add", file]);
}

pub fn git(repo_path: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo_path)
        .output()
        .expect("Failed to run git");
    String::from_utf8_lossy(&output.stdout).to_string()
}
