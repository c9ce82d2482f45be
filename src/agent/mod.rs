//! Session state: conversation history and the session context.

pub mod conversation;
pub mod session;

pub use conversation::ConversationHistory;
pub use session::ChatSession;
