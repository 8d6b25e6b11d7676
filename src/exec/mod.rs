pub mod shell;

pub use shell::{ExecError, ProcessExecutor, ShellExecutor};
