use tracing::debug;

/// Prefix that marks a response as a command to run
///
/// This module is the only place the sentinel and the fence are encoded.
pub const COMMAND_PREFIX: &str = "Command: ";

/// Markdown code fence
pub const FENCE: &str = "```";

/// One piece of a fenced response, in original order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub is_code: bool,
    pub text: String,
}

impl Segment {
    /// Language tag of a code segment (`rust` in "```rust\n...")
    ///
    /// The tag must sit on the fence line itself: a single word followed by a
    /// newline and more text. A block that opens with "```\n" has no tag, so a
    /// one-word first line of code is kept as code.
    pub fn language(&self) -> Option<&str> {
        if !self.is_code {
            return None;
        }
        let (first, rest) = self.text.split_once('\n')?;
        let tag = first.trim();
        let is_tag = !tag.is_empty()
            && !rest.is_empty()
            && tag
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '#' | '-' | '_'));
        is_tag.then_some(tag)
    }

    /// Code text without the language tag line
    pub fn code(&self) -> &str {
        match self.language() {
            Some(_) => self.text.split_once('\n').map_or("", |(_, rest)| rest),
            None => &self.text,
        }
    }
}

/// What an AI response asks the shell to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    PlainText(String),
    CommandDirective(String),
    CodeBlocks(Vec<Segment>),
}

/// Classify a raw response
///
/// Precedence: `Command: ` directive, then fenced code, then plain text.
pub fn interpret(raw: &str) -> Intent {
    let trimmed = raw.trim();

    if let Some(rest) = trimmed.strip_prefix(COMMAND_PREFIX) {
        // Only the directive line is a command; trailing lines never reach the shell
        let (line, trailing) = rest.split_once('\n').unwrap_or((rest, ""));
        if !trailing.trim().is_empty() {
            debug!("ignoring text after command directive");
        }
        return Intent::CommandDirective(line.trim().to_string());
    }

    if raw.contains(FENCE) {
        let segments = raw
            .split(FENCE)
            .enumerate()
            .map(|(index, text)| Segment {
                is_code: index % 2 == 1,
                text: text.to_string(),
            })
            .collect();
        return Intent::CodeBlocks(segments);
    }

    Intent::PlainText(trimmed.to_string())
}

/// Extract a single code string from a response, for writing to a file
///
/// A response wrapped in an opening and a closing fence loses its first and
/// last line when it has more than two lines. Anything else is only trimmed.
pub fn clean_code(raw: &str) -> String {
    let code = raw.trim();

    if code.starts_with(FENCE) && code.ends_with(FENCE) {
        let lines: Vec<&str> = code.lines().collect();
        if lines.len() > 2 {
            return lines[1..lines.len() - 1].join("\n");
        }
    }

    code.to_string()
}
