use crate::security::ALLOWED_PROGRAMS;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SafetyError {
    #[error("Program not allowed: {0}")]
    DisallowedProgram(String),

    #[error("Empty command")]
    EmptyCommand,
}

/// Decides whether a literal shell command may run
///
/// Only the program name (the first whitespace token) is inspected, compared
/// case-sensitively. Arguments and flags are never looked at.
#[derive(Debug, Clone)]
pub struct CommandAllowlist {
    allowed_programs: HashSet<&'static str>,
}

impl CommandAllowlist {
    pub fn new() -> Self {
        let allowed_programs = ALLOWED_PROGRAMS.iter().copied().collect();

        Self { allowed_programs }
    }

    /// Check a command, reporting why it was rejected
    pub fn check(&self, command: &str) -> Result<(), SafetyError> {
        let program = command
            .split_whitespace()
            .next()
            .ok_or(SafetyError::EmptyCommand)?;

        if self.allowed_programs.contains(program) {
            Ok(())
        } else {
            Err(SafetyError::DisallowedProgram(program.to_string()))
        }
    }

    pub fn is_permitted(&self, command: &str) -> bool {
        self.check(command).is_ok()
    }

    /// Permitted program names, in allowlist order
    pub fn programs(&self) -> impl Iterator<Item = &'static str> + '_ {
        ALLOWED_PROGRAMS.iter().copied()
    }
}

impl Default for CommandAllowlist {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permits_simple_command() {
        let allowlist = CommandAllowlist::new();
        assert!(allowlist.is_permitted("ls -la"));
        assert!(allowlist.is_permitted("pwd"));
    }

    #[test]
    fn test_rejects_destructive_command() {
        let allowlist = CommandAllowlist::new();
        let result = allowlist.check("rm -rf /");
        assert_eq!(
            result.unwrap_err(),
            SafetyError::DisallowedProgram("rm".to_string())
        );
    }

    #[test]
    fn test_empty_command() {
        let allowlist = CommandAllowlist::new();
        assert_eq!(allowlist.check("").unwrap_err(), SafetyError::EmptyCommand);
        assert_eq!(allowlist.check("   ").unwrap_err(), SafetyError::EmptyCommand);
        assert!(!allowlist.is_permitted("\t\n"));
    }

    #[test]
    fn test_program_name_is_case_sensitive() {
        let allowlist = CommandAllowlist::new();
        assert!(!allowlist.is_permitted("LS"));
        assert!(!allowlist.is_permitted("Echo hello"));
    }

    #[test]
    fn test_leading_whitespace_is_ignored() {
        let allowlist = CommandAllowlist::new();
        assert!(allowlist.is_permitted("   echo hi"));
    }

    #[test]
    fn test_arguments_are_not_inspected() {
        let allowlist = CommandAllowlist::new();
        // The gate restricts the program only
        assert!(allowlist.is_permitted("cat /etc/hostname"));
        assert!(allowlist.is_permitted("find . -name '*.rs'"));
    }

    #[test]
    fn test_program_must_be_exact_token() {
        let allowlist = CommandAllowlist::new();
        assert!(!allowlist.is_permitted("ls; rm -rf /"));
        assert!(!allowlist.is_permitted("/bin/ls"));
        assert!(!allowlist.is_permitted("lsblk"));
    }

    #[test]
    fn test_networked_and_mutating_programs_rejected() {
        let allowlist = CommandAllowlist::new();
        for command in ["curl http://x", "wget x", "mv a b", "chmod 777 x", "sudo ls", "sh -c ls"] {
            assert!(!allowlist.is_permitted(command), "should reject: {}", command);
        }
    }

    #[test]
    fn test_programs_lists_every_entry() {
        let allowlist = CommandAllowlist::new();
        let programs: Vec<&str> = allowlist.programs().collect();
        assert_eq!(programs, ALLOWED_PROGRAMS);
    }
}
