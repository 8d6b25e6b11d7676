use crate::shell::builtins::BuiltinTable;

const USAGE_WIDTH: usize = 12;

/// Rows of the interactive help: builtins, then `!command` and free-text queries
pub fn help_rows(table: &BuiltinTable) -> Vec<(String, String)> {
    let mut rows: Vec<(String, String)> = table
        .commands()
        .iter()
        .map(|command| (command.usage.to_string(), command.description.to_string()))
        .collect();

    rows.push((
        "!command".to_string(),
        "Run an allowed shell command directly".to_string(),
    ));
    rows.push(("query".to_string(), "Ask the AI anything".to_string()));
    rows
}

pub fn help_text(table: &BuiltinTable) -> String {
    let mut text = String::from("Available commands:\n");
    for (usage, description) in help_rows(table) {
        text.push_str(&format!("  {:<width$}{}\n", usage, description, width = USAGE_WIDTH));
    }
    text
}

/// Usage summary for the command-line front end
pub fn cli_help_text() -> &'static str {
    "Usage:
  shellmind <query>              Ask the AI (a leading ! runs an allowed command)
  shellmind ask <prompt>         Print the answer to a prompt
  shellmind gen [-l LANG] [-o FILE] <description>
                                 Generate code, optionally into a file
  shellmind diff                 Explain the staged changes
  shellmind commit [--commit]    Generate a conventional commit message
  shellmind shell                Start the interactive shell"
}
