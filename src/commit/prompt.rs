use super::message::{COMMIT_TYPES, MAX_BODY_LINE_LEN, MAX_HEADER_LEN, STRICT_HEADER_LEN};
use super::synthesizer::GitContext;

/// Which prompt an attempt uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptVariant {
    /// First attempt: branch, staged files and diff
    FullContext,
    /// Retries: a short reminder of the rules plus the diff
    Strict,
}

impl PromptVariant {
    pub fn for_attempt(attempt: usize) -> Self {
        if attempt <= 1 {
            PromptVariant::FullContext
        } else {
            PromptVariant::Strict
        }
    }
}

pub fn build_prompt(variant: PromptVariant, context: &GitContext, rejected: Option<&str>) -> String {
    match variant {
        PromptVariant::FullContext => full_context_prompt(context),
        PromptVariant::Strict => strict_prompt(context, rejected.unwrap_or("")),
    }
}

pub fn full_context_prompt(context: &GitContext) -> String {
    format!(
        "# Git Commit Message Generation

## Repository Context
- Branch: {branch}
- Staged Changes:
{files}

## Changes
{diff}

## Task
Generate a conventional commit message following these rules:
1. Start with a type: {types}
2. Optionally add a scope in parentheses after the type (e.g., feat(ui): )
3. Use the imperative mood (\"add\" not \"added\" or \"adds\")
4. Keep the subject line under {strict} characters, never more than {max}
5. Separate subject from body with a blank line
6. Wrap the body at {body} characters
7. Use the body to explain what and why, not how

## Output Format
Provide only the commit message, no additional text or code blocks.",
        branch = context.branch,
        files = context.name_status.trim(),
        diff = context.diff,
        types = COMMIT_TYPES.join(", "),
        strict = STRICT_HEADER_LEN,
        max = MAX_HEADER_LEN,
        body = MAX_BODY_LINE_LEN,
    )
}

pub fn strict_prompt(context: &GitContext, rejected: &str) -> String {
    format!(
        "Your previous commit message was rejected because it does not follow the conventional commit format:

{rejected}

Reply with ONLY a corrected commit message. The first line MUST be `type(scope): Description` \
or `type: Description`, where type is one of: {types}. The scope is lowercase letters, digits \
or dashes. The first line MUST be at most {strict} characters. No markdown, no code blocks, no commentary.

Changes:
{diff}",
        rejected = rejected.trim(),
        types = COMMIT_TYPES.join(", "),
        strict = STRICT_HEADER_LEN,
        diff = context.diff,
    )
}

pub fn diff_explanation_prompt(diff: &str) -> String {
    format!(
        "Explain these code changes in a clear and concise way. Focus on what was added, removed, or modified:

{}",
        diff
    )
}
