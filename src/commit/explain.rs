use crate::commit::prompt::diff_explanation_prompt;
use crate::error::GitResult;
use crate::git::GitCollaborator;
use crate::llm::client::{LLMClient, LLMError};

pub const NO_CHANGES: &str = "No changes to explain";

/// What `diff` prints
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffExplanation {
    NoChanges,
    Explained(String),
}

impl DiffExplanation {
    pub fn text(&self) -> &str {
        match self {
            DiffExplanation::NoChanges => NO_CHANGES,
            DiffExplanation::Explained(text) => text,
        }
    }
}

/// Read the staged diff; an empty diff short-circuits without calling the AI
pub fn staged_diff(git: &dyn GitCollaborator) -> GitResult<Option<String>> {
    let diff = git.staged_diff()?;
    Ok((!diff.trim().is_empty()).then_some(diff))
}

pub async fn explain_diff(client: &dyn LLMClient, diff: Option<&str>) -> Result<DiffExplanation, LLMError> {
    match diff {
        None => Ok(DiffExplanation::NoChanges),
        Some(diff) => {
            let response = client.ask(&diff_explanation_prompt(diff)).await?;
            Ok(DiffExplanation::Explained(response.trim().to_string()))
        }
    }
}
