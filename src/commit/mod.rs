pub mod explain;
pub mod message;
pub mod prompt;
pub mod repair;
pub mod synthesizer;

pub use explain::{DiffExplanation, explain_diff};
pub use message::{CommitCandidate, ValidationOutcome, clean_commit_message, validate};
pub use repair::repair;
pub use synthesizer::{CommitError, CommitSynthesizer, GitContext, SynthesisAttempt, SynthesisOutcome};
