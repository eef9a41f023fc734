//! echo-chat
//!
//! The chat/extraction backend: sends the user's free text to a Bedrock
//! model, parses the structured patient/exam details out of the reply,
//! suggests a report template, and persists the conversation.

pub mod error;
pub mod extract;
pub mod model;
pub mod prompt;
pub mod session;
pub mod turn;
