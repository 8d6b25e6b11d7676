pub mod console;
pub mod help;

pub use console::Console;
pub use help::{cli_help_text, help_text};
