//! States of the conversation loop.

use crate::types::ToolInvocationRequest;

/// Where the conversation loop is between two steps.
#[derive(Debug, Clone, PartialEq)]
pub enum LoopState {
    /// Waiting for the user to type something.
    AwaitingInput,
    /// History is ready; the next step asks the model.
    AwaitingModel,
    /// The model asked for this tool; the next step runs it.
    ExecutingTool(ToolInvocationRequest),
}
