use crate::error::AppResult;
use std::env;
use std::path::PathBuf;

/// Whether the read loop keeps going after a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Commands handled by the shell itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Help,
    Exit,
    Clear,
    Cd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinCommand {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
    pub builtin: Builtin,
}

const DEFAULT_BUILTINS: &[BuiltinCommand] = &[
    BuiltinCommand {
        name: "help",
        usage: "help",
        description: "Show this help",
        builtin: Builtin::Help,
    },
    BuiltinCommand {
        name: "exit",
        usage: "exit",
        description: "Leave the shell",
        builtin: Builtin::Exit,
    },
    BuiltinCommand {
        name: "clear",
        usage: "clear",
        description: "Clear the screen",
        builtin: Builtin::Clear,
    },
    BuiltinCommand {
        name: "cd",
        usage: "cd [dir]",
        description: "Change directory (home when no dir is given)",
        builtin: Builtin::Cd,
    },
];

/// Built-in command table, fixed once the shell starts
#[derive(Debug, Clone)]
pub struct BuiltinTable {
    commands: Vec<BuiltinCommand>,
}

impl BuiltinTable {
    pub fn new() -> Self {
        Self {
            commands: DEFAULT_BUILTINS.to_vec(),
        }
    }

    /// Case-insensitive lookup by command name
    pub fn lookup(&self, name: &str) -> Option<&BuiltinCommand> {
        self.commands
            .iter()
            .find(|command| command.name.eq_ignore_ascii_case(name))
    }

    pub fn commands(&self) -> &[BuiltinCommand] {
        &self.commands
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.iter().map(|command| command.name)
    }
}

impl Default for BuiltinTable {
    fn default() -> Self {
        Self::new()
    }
}

/// `cd` target: the given directory, else the home directory
pub fn cd_target(args: &[&str]) -> Option<PathBuf> {
    match args.first() {
        Some(dir) => Some(PathBuf::from(dir)),
        None => dirs::home_dir(),
    }
}

pub fn change_dir(args: &[&str]) -> AppResult<PathBuf> {
    let target = cd_target(args).ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::NotFound, "home directory not found")
    })?;
    env::set_current_dir(&target)?;
    Ok(env::current_dir()?)
}
