//! Terminal I/O for the chat loop.

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};

use crate::error::Result;

/// Where the chat loop reads user input and shows output.
#[async_trait]
pub trait Console: Send {
    /// Show `prompt` and read one line. `None` at end of input.
    async fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;

    /// Show a final model answer.
    async fn show_reply(&mut self, text: &str) -> Result<()>;

    /// Show a status line (tool activity, recoverable errors).
    async fn show_notice(&mut self, text: &str) -> Result<()>;
}

/// Line-oriented console over any async reader and writer.
pub struct LineConsole<R, W> {
    reader: R,
    writer: W,
}

/// Console bound to the process stdin and stdout.
pub type StdioConsole = LineConsole<BufReader<Stdin>, Stdout>;

impl StdioConsole {
    pub fn stdio() -> Self {
        LineConsole::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> LineConsole<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R, W> LineConsole<R, W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn write_line(&mut self, line: &str) -> Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl<R, W> Console for LineConsole<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        self.writer.write_all(prompt.as_bytes()).await?;
        self.writer.flush().await?;

        let mut line = String::new();
        if self.reader.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    async fn show_reply(&mut self, text: &str) -> Result<()> {
        self.write_line(&format!("AI: {text}")).await
    }

    async fn show_notice(&mut self, text: &str) -> Result<()> {
        self.write_line(text).await
    }
}
