//! Conversation loop driver.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::agent::ChatSession;
use crate::cli::console::Console;
use crate::error::{Result, XpostError};
use crate::provider::ModelProvider;
use crate::tools::{validate_arguments, ToolTransport};
use crate::types::{ModelReply, ToolExecutionResult, ToolInvocationRequest, Turn};

use super::state::LoopState;

const PROMPT: &str = "You: ";

/// Drives one chat session: user input, model calls, and tool execution,
/// one step at a time.
pub struct ConversationLoop {
    provider: Box<dyn ModelProvider>,
    transport: Arc<dyn ToolTransport>,
    console: Box<dyn Console>,
    session: ChatSession,
}

impl ConversationLoop {
    pub fn new(
        provider: Box<dyn ModelProvider>,
        transport: Arc<dyn ToolTransport>,
        console: Box<dyn Console>,
        session: ChatSession,
    ) -> Self {
        Self {
            provider,
            transport,
            console,
            session,
        }
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn into_session(self) -> ChatSession {
        self.session
    }

    /// Run until the console reports end of input.
    ///
    /// Only console failures end the session with an error; model and tool
    /// failures are reported and the loop keeps going.
    pub async fn run(&mut self) -> Result<()> {
        info!(
            model = self.provider.model_id(),
            tools = self.session.catalog().len(),
            "chat session started"
        );

        let mut state = LoopState::AwaitingInput;
        while let Some(next) = self.step(state).await? {
            state = next;
        }

        info!(turns = self.session.history().len(), "chat session ended");
        Ok(())
    }

    /// Perform one state transition. `None` means the input is exhausted.
    pub async fn step(&mut self, state: LoopState) -> Result<Option<LoopState>> {
        match state {
            LoopState::AwaitingInput => self.read_input().await,
            LoopState::AwaitingModel => self.query_model().await.map(Some),
            LoopState::ExecutingTool(request) => {
                self.execute_tool(request).await?;
                Ok(Some(LoopState::AwaitingModel))
            }
        }
    }

    /// One model round. Without `pending` a line of user input is read
    /// first; with it, the tool is executed. Then exactly one model call is
    /// made. Returns the tool the model asked for next, or `None` when the
    /// loop should wait for user input again or input is exhausted.
    pub async fn advance(
        &mut self,
        pending: Option<ToolInvocationRequest>,
    ) -> Result<Option<ToolInvocationRequest>> {
        match pending {
            Some(request) => self.execute_tool(request).await?,
            None => {
                if self.read_input().await?.is_none() {
                    return Ok(None);
                }
            }
        }
        match self.query_model().await? {
            LoopState::ExecutingTool(request) => Ok(Some(request)),
            _ => Ok(None),
        }
    }

    async fn read_input(&mut self) -> Result<Option<LoopState>> {
        loop {
            let Some(line) = self.console.read_line(PROMPT).await? else {
                debug!("end of input");
                return Ok(None);
            };
            if line.trim().is_empty() {
                continue;
            }
            self.session.history_mut().append(Turn::user(line));
            return Ok(Some(LoopState::AwaitingModel));
        }
    }

    async fn query_model(&mut self) -> Result<LoopState> {
        let response = match self
            .provider
            .generate(
                self.session.history().turns(),
                self.session.catalog().descriptors(),
            )
            .await
        {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, provider = self.provider.provider_name(), "model request failed");
                self.console.show_notice(&format!("Error: {err}")).await?;
                return Ok(LoopState::AwaitingInput);
            }
        };

        match response.interpret() {
            Err(err) => {
                warn!(error = %err, "model returned nothing usable");
                self.console.show_notice(&err.to_string()).await?;
                Ok(LoopState::AwaitingInput)
            }
            Ok(ModelReply::Text(text)) => {
                self.console.show_reply(&text).await?;
                self.session.history_mut().append(Turn::model(text));
                Ok(LoopState::AwaitingInput)
            }
            Ok(ModelReply::ToolCall(request)) => Ok(LoopState::ExecutingTool(request)),
            Ok(ModelReply::MultipleToolCalls(requests)) => {
                let mut requests = requests.into_iter();
                let Some(first) = requests.next() else {
                    return Ok(LoopState::AwaitingInput);
                };
                let dropped: Vec<String> = requests.map(|request| request.name).collect();
                warn!(
                    tool = %first.name,
                    ?dropped,
                    "model requested several tools; only the first is executed"
                );
                Ok(LoopState::ExecutingTool(first))
            }
        }
    }

    async fn execute_tool(&mut self, request: ToolInvocationRequest) -> Result<()> {
        self.session
            .history_mut()
            .append(Turn::tool_announcement(&request));
        self.console
            .show_notice(&format!("calling tool {}", request.name))
            .await?;
        info!(tool = %request.name, "calling tool");

        match self.invoke(&request).await {
            Ok(result) => match result.first_text() {
                Some(text) => self.session.history_mut().append(Turn::tool_result(text)),
                None => debug!(tool = %request.name, "tool returned no text"),
            },
            Err(message) => {
                warn!(tool = %request.name, error = %message, "tool call failed");
                self.session.history_mut().append(Turn::tool_result(&format!(
                    "Error calling tool {}: {message}",
                    request.name
                )));
            }
        }
        Ok(())
    }

    async fn invoke(
        &self,
        request: &ToolInvocationRequest,
    ) -> std::result::Result<ToolExecutionResult, String> {
        let descriptor = self
            .session
            .catalog()
            .get(&request.name)
            .ok_or_else(|| format!("Tool {} is not available", request.name))?;
        validate_arguments(&request.arguments, &descriptor.parameters)?;

        self.transport
            .call_tool(request)
            .await
            .map_err(|err| match err {
                XpostError::ToolExecution { message, .. } => message,
                other => other.to_string(),
            })
    }
}
