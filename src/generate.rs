use crate::llm::{LLMClient, LLMError, clean_code};
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_LANGUAGE: &str = "Python";

/// Display name for a `-l` value: known aliases, else title case
pub fn normalize_language(language: &str) -> String {
    let lower = language.trim().to_lowercase();
    match lower.as_str() {
        "" | "python" | "py" => DEFAULT_LANGUAGE.to_string(),
        "go" | "golang" => "Go".to_string(),
        "js" | "javascript" => "JavaScript".to_string(),
        _ => title_case(&lower),
    }
}

fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

pub fn generation_prompt(description: &str, language: &str) -> String {
    format!(
        "Generate clean, efficient, and well-documented code based on the following description:

\"{}\"

Requirements:
- Write in {}
- Include necessary imports and dependencies
- Add appropriate error handling
- Use clear and descriptive variable/function names
- Include basic documentation (docstrings/comments)
- Follow language-specific best practices
- Keep it simple and focused

Return only the code without any explanations.",
        description, language
    )
}

/// Ask for code and strip the surrounding fence
pub async fn generate_code(client: &dyn LLMClient, description: &str, language: &str) -> Result<String, LLMError> {
    let response = client.ask(&generation_prompt(description, language)).await?;
    Ok(clean_code(&response))
}

/// Write generated code, creating parent directories
pub fn write_output(path: &Path, code: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    debug!("writing {} bytes to {}", code.len(), path.display());
    fs::write(path, code)
}
