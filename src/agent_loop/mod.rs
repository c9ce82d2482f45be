//! Interactive conversation loop (read input, ask the model, run tools).

pub mod runner;
pub mod state;

pub use runner::ConversationLoop;
pub use state::LoopState;
