pub mod builtins;
pub mod dispatcher;
pub mod history;
pub mod reader;

pub use builtins::{Builtin, BuiltinTable, Flow};
pub use dispatcher::{DispatcherConfig, LineKind, ShellDispatcher, ShellSession, classify};
pub use history::HistoryLog;
pub use reader::{LineReader, ReadError, ReadOutcome, RustylineReader, ShellHelper};
