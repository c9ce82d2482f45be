//! Shared fakes for integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::net::TcpListener;

use xpost::cli::Console;
use xpost::error::Result;
use xpost::server::{PostError, PostOutcome, PostPublisher};

/// Publisher that records every text and answers from a script.
#[derive(Default)]
pub struct RecordingPublisher {
    pub published: Mutex<Vec<String>>,
    failures: Mutex<VecDeque<PostError>>,
}

impl RecordingPublisher {
    pub fn failing_with(error: PostError) -> Self {
        Self {
            published: Mutex::default(),
            failures: Mutex::new(VecDeque::from([error])),
        }
    }

    pub fn published(&self) -> Vec<String> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl PostPublisher for RecordingPublisher {
    async fn publish(&self, text: &str) -> std::result::Result<PostOutcome, PostError> {
        self.published.lock().unwrap().push(text.to_string());
        if let Some(err) = self.failures.lock().unwrap().pop_front() {
            return Err(err);
        }
        Ok(PostOutcome {
            id: Some("1850000000000000000".into()),
            text: text.to_string(),
        })
    }
}

/// Start the MCP tool server on an ephemeral port and return its endpoint URL.
pub async fn start_tool_server(publisher: Arc<RecordingPublisher>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(xpost::server::serve_on(listener, publisher));
    format!("http://{addr}/mcp")
}

/// Console fed from a fixed list of lines, recording everything shown.
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    pub output: Arc<Mutex<Vec<String>>>,
}

impl ScriptedConsole {
    pub fn new(inputs: &[&str]) -> Self {
        Self {
            inputs: inputs.iter().map(|line| line.to_string()).collect(),
            output: Arc::default(),
        }
    }
}

#[async_trait]
impl Console for ScriptedConsole {
    async fn read_line(&mut self, _prompt: &str) -> Result<Option<String>> {
        Ok(self.inputs.pop_front())
    }

    async fn show_reply(&mut self, text: &str) -> Result<()> {
        self.output.lock().unwrap().push(format!("AI: {text}"));
        Ok(())
    }

    async fn show_notice(&mut self, text: &str) -> Result<()> {
        self.output.lock().unwrap().push(text.to_string());
        Ok(())
    }
}
