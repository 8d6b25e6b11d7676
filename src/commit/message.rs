use crate::llm::interpreter::FENCE;
use regex::Regex;
use std::fmt;

/// Conventional commit types accepted in a header
pub const COMMIT_TYPES: &[&str] = &[
    "build", "chore", "ci", "docs", "feat", "fix", "perf", "refactor", "revert", "style", "test",
];

/// Hard limit on header length enforced by validation
pub const MAX_HEADER_LEN: usize = 72;

/// Header length requested from the model, and the bound used by repair
pub const STRICT_HEADER_LEN: usize = 50;

pub const MAX_BODY_LINE_LEN: usize = 72;

pub const ELLIPSIS: &str = "...";

// Full header: type, optional scope, ": ", non-empty description
static HEADER_RE: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"^(build|chore|ci|docs|feat|fix|perf|refactor|revert|style|test)(\([a-z0-9-]+\))?: .+$")
        .expect("Should compile: HEADER_RE")
});
// Header prefix only, description may be missing
static HEADER_PREFIX_RE: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"^(build|chore|ci|docs|feat|fix|perf|refactor|revert|style|test)(\([a-z0-9-]+\))?: ")
        .expect("Should compile: HEADER_PREFIX_RE")
});

/// A commit message split into header and normalized body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitCandidate {
    pub header: String,
    pub body: Option<String>,
}

impl CommitCandidate {
    /// Render as `header`, or header, one blank line, body
    pub fn render(&self) -> String {
        match self.body {
            Some(ref body) => format!("{}\n\n{}", self.header, body),
            None => self.header.clone(),
        }
    }
}

impl fmt::Display for CommitCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Result of validating a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub candidate: CommitCandidate,
    pub valid: bool,
}

/// Validate a commit message, normalizing it along the way
///
/// Normalization always happens: the description gets its first letter
/// upper-cased, blank body lines are dropped and overlong body lines are
/// truncated. `valid` is true when the header matches the conventional commit
/// grammar and fits in [`MAX_HEADER_LEN`] characters.
pub fn validate(message: &str) -> ValidationOutcome {
    let mut lines = message.trim().lines();
    let header = capitalize_description(lines.next().unwrap_or("").trim());

    let body_lines: Vec<String> = lines
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| truncate_with_ellipsis(line, MAX_BODY_LINE_LEN))
        .collect();
    let body = (!body_lines.is_empty()).then(|| body_lines.join("\n"));

    let valid = is_valid_header(&header);

    ValidationOutcome {
        candidate: CommitCandidate { header, body },
        valid,
    }
}

/// Check a header against the grammar and the length limit
pub fn is_valid_header(header: &str) -> bool {
    HEADER_RE.is_match(header) && header.chars().count() <= MAX_HEADER_LEN
}

/// Whether a line starts with `type(scope): `
pub(crate) fn has_header_prefix(line: &str) -> bool {
    HEADER_PREFIX_RE.is_match(line)
}

/// Upper-case the first letter after the first `": "`
pub(crate) fn capitalize_description(header: &str) -> String {
    let Some((prefix, description)) = header.split_once(": ") else {
        return header.to_string();
    };

    let mut chars = description.chars();
    match chars.next() {
        Some(first) => format!("{}: {}{}", prefix, first.to_uppercase(), chars.as_str()),
        None => header.to_string(),
    }
}

/// Cut a line longer than `limit` characters down to exactly `limit`,
/// ending in [`ELLIPSIS`]
pub(crate) fn truncate_with_ellipsis(line: &str, limit: usize) -> String {
    if line.chars().count() <= limit {
        return line.to_string();
    }

    let keep = limit.saturating_sub(ELLIPSIS.len());
    let mut truncated: String = line.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Remove markdown fencing and blank lines from a raw model response
pub fn clean_commit_message(raw: &str) -> String {
    let lines: Vec<&str> = raw
        .lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            let fenced = trimmed.starts_with(FENCE);

            let unfenced = trimmed.strip_prefix(FENCE).unwrap_or(trimmed);
            let unfenced = unfenced.strip_suffix(FENCE).unwrap_or(unfenced).trim();

            // An opening fence may carry a language tag such as ```text
            let is_tag = fenced && !unfenced.contains(char::is_whitespace) && !unfenced.contains(':');
            if unfenced.is_empty() || is_tag {
                None
            } else {
                Some(unfenced)
            }
        })
        .collect();

    lines.join("\n")
}
