use super::message::{
    COMMIT_TYPES, STRICT_HEADER_LEN, capitalize_description, has_header_prefix,
    truncate_with_ellipsis,
};
use crate::llm::interpreter::FENCE;

// Upper bound on passes before the result is returned as-is
const MAX_PASSES: usize = 8;

/// Best-effort salvage of a commit message that failed validation
///
/// Only the first line is touched; body lines are carried over unchanged.
/// The result is not guaranteed to be valid and must be validated again.
/// `repair(&repair(m)) == repair(m)` for every input.
pub fn repair(message: &str) -> String {
    let mut current = repair_pass(message);

    for _ in 0..MAX_PASSES {
        let next = repair_pass(&current);
        if next == current {
            break;
        }
        current = next;
    }

    current
}

fn repair_pass(message: &str) -> String {
    let trimmed = message.trim();
    let (first, rest) = match trimmed.split_once('\n') {
        Some((first, rest)) => (first, Some(rest)),
        None => (trimmed, None),
    };

    let header = strip_fence(first);
    let header = fix_type_prefix(header);
    let header = capitalize_description(&header);
    let header = truncate_with_ellipsis(&header, STRICT_HEADER_LEN);

    match rest {
        Some(rest) => format!("{}\n{}", header, rest),
        None => header,
    }
}

/// Remove fence markers around the line, and backticks when the whole line
/// is wrapped in inline code
fn strip_fence(line: &str) -> &str {
    let mut line = line.trim();

    loop {
        let stripped = line
            .strip_prefix(FENCE)
            .or_else(|| line.strip_suffix(FENCE))
            .map(str::trim);
        match stripped {
            Some(next) => line = next,
            None => break,
        }
    }

    if line.starts_with('`') {
        line = line.trim_matches(|c: char| c == '`' || c.is_whitespace());
    }

    line
}

fn fix_type_prefix(line: &str) -> String {
    if has_header_prefix(line) {
        return line.to_string();
    }

    if let Some((before, description)) = line.split_once(':') {
        let before = before.trim().to_lowercase();
        if let Some(kind) = COMMIT_TYPES.iter().find(|kind| before.starts_with(*kind)) {
            return format!("{}: {}", kind, description.trim());
        }
    }

    format!("fix: {}", line)
}
