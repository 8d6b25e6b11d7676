use crate::commit::message::{CommitCandidate, clean_commit_message, validate};
use crate::commit::prompt::{PromptVariant, build_prompt};
use crate::commit::repair::repair;
use crate::error::GitError;
use crate::git::GitCollaborator;
use crate::llm::client::{LLMClient, LLMError};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Default number of AI attempts before falling back to repair
pub const MAX_ATTEMPTS: usize = 3;

const UNKNOWN_BRANCH: &str = "unknown";

#[derive(Debug, Error)]
pub enum CommitError {
    #[error("Not a git repository")]
    NotARepository,

    #[error("No staged changes found. Use 'git add' to stage files first")]
    NoStagedChanges,

    #[error("Staged diff is empty")]
    EmptyDiff,

    #[error("Git error: {0}")]
    Git(#[from] GitError),

    #[error("AI backend unavailable: {0}")]
    Backend(#[from] LLMError),

    #[error("No valid commit message after {attempts} attempts and repair. Last candidate:\n{message}")]
    Invalid {
        attempts: usize,
        message: String,
        repaired: String,
    },
}

/// Repository state a commit message is written for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitContext {
    pub branch: String,
    pub name_status: String,
    pub diff: String,
}

impl GitContext {
    /// Collect branch, staged files and staged diff, checking preconditions
    /// in order: work tree, staged changes, non-empty diff
    pub fn gather(git: &dyn GitCollaborator) -> Result<Self, CommitError> {
        if !git.is_repo() {
            return Err(CommitError::NotARepository);
        }

        let name_status = git.staged_name_status()?;
        if name_status.trim().is_empty() {
            return Err(CommitError::NoStagedChanges);
        }

        let diff = git.staged_diff()?;
        if diff.trim().is_empty() {
            return Err(CommitError::EmptyDiff);
        }

        let branch = match git.current_branch() {
            Ok(branch) if !branch.trim().is_empty() => branch.trim().to_string(),
            Ok(_) => UNKNOWN_BRANCH.to_string(),
            Err(e) => {
                debug!("could not read current branch: {}", e);
                UNKNOWN_BRANCH.to_string()
            }
        };

        Ok(Self {
            branch,
            name_status,
            diff,
        })
    }
}

/// One round trip to the AI and its verdict
#[derive(Debug, Clone)]
pub struct SynthesisAttempt {
    pub attempt: usize,
    pub prompt: String,
    pub candidate: CommitCandidate,
    pub valid: bool,
}

/// A valid commit message plus the attempts that led to it
#[derive(Debug, Clone)]
pub struct SynthesisOutcome {
    pub message: String,
    pub attempts: Vec<SynthesisAttempt>,
    /// True when the message only became valid after repair
    pub repaired: bool,
}

/// Bounded retry loop that turns a git context into a conventional commit
pub struct CommitSynthesizer<'a> {
    client: &'a dyn LLMClient,
    max_attempts: usize,
}

impl<'a> CommitSynthesizer<'a> {
    pub fn new(client: &'a dyn LLMClient) -> Self {
        Self::with_max_attempts(client, MAX_ATTEMPTS)
    }

    /// `max_attempts` below 1 is raised to 1
    pub fn with_max_attempts(client: &'a dyn LLMClient, max_attempts: usize) -> Self {
        Self {
            client,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Run attempts until one validates, then repair the last candidate once
    ///
    /// Backend errors end the loop immediately and are never retried.
    pub async fn synthesize(&self, context: &GitContext) -> Result<SynthesisOutcome, CommitError> {
        let mut attempts: Vec<SynthesisAttempt> = Vec::with_capacity(self.max_attempts);
        let mut rejected: Option<String> = None;

        for attempt in 1..=self.max_attempts {
            let variant = PromptVariant::for_attempt(attempt);
            let prompt = build_prompt(variant, context, rejected.as_deref());

            debug!("commit attempt {} using {:?} prompt", attempt, variant);
            let raw = self.client.ask(&prompt).await?;

            let outcome = validate(&clean_commit_message(&raw));
            let message = outcome.candidate.render();
            info!("commit attempt {}: valid={}", attempt, outcome.valid);

            attempts.push(SynthesisAttempt {
                attempt,
                prompt,
                candidate: outcome.candidate,
                valid: outcome.valid,
            });

            if outcome.valid {
                return Ok(SynthesisOutcome {
                    message,
                    attempts,
                    repaired: false,
                });
            }

            rejected = Some(message);
        }

        let last = rejected.unwrap_or_default();
        let repaired = validate(&repair(&last));
        info!("repaired commit message: valid={}", repaired.valid);

        if repaired.valid {
            return Ok(SynthesisOutcome {
                message: repaired.candidate.render(),
                attempts,
                repaired: true,
            });
        }

        warn!("giving up on commit message after {} attempts", self.max_attempts);
        Err(CommitError::Invalid {
            attempts: self.max_attempts,
            message: last,
            repaired: repaired.candidate.render(),
        })
    }
}
