pub mod chat;
pub mod client;
pub mod interpreter;

pub use chat::ChatClient;
pub use client::{LLMClient, LLMError};
pub use interpreter::{Intent, Segment, clean_code, interpret};
