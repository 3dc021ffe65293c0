pub mod client;
pub mod errors;
pub mod generator;
pub mod types;

pub use client::{ClaudeClient, ClaudeClientConfig};
pub use errors::ClaudeApiError;
pub use generator::ClaudeTextGenerator;
pub use types::{ContentBlock, Message, MessageRequest, MessageResponse, Usage};
