//! Session context passed to every loop operation.

use crate::tools::ToolCatalog;

use super::conversation::ConversationHistory;

/// State owned by one chat session: its history and the tool catalog
/// fetched at startup.
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    history: ConversationHistory,
    catalog: ToolCatalog,
}

impl ChatSession {
    pub fn new(catalog: ToolCatalog) -> Self {
        Self {
            history: ConversationHistory::new(),
            catalog,
        }
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut ConversationHistory {
        &mut self.history
    }

    /// The catalog never changes after the session starts.
    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }
}
