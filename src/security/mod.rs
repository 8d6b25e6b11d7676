pub mod allowlist;

pub use allowlist::{CommandAllowlist, SafetyError};

/// Allowlist of programs that may be executed on behalf of the user or the AI
///
/// Only read-only, informational programs belong here. It is shared by the
/// `!command` path and the `Command:` directive path so both are gated by the
/// same set.
///
/// Adding a new program requires careful security review: nothing that
/// mutates the filesystem or talks to the network.
pub const ALLOWED_PROGRAMS: &[&str] = &[
    // Filesystem inspection
    "ls",
    "pwd",
    "cat",
    "find",
    "grep",
    // Output
    "echo",
    // Processes and resources
    "ps",
    "top",
    "df",
    "du",
    // System information
    "date",
    "whoami",
    "uname",
];
