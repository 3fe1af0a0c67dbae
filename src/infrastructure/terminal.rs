use crate::domain::ports::{BarcodeReader, CameraPermissions, ScanOptions};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Lines};
use tokio::sync::Mutex;

/// Line-oriented "camera" for terminals.
///
/// Keyboard-wedge barcode scanners type the decoded text followed by Enter, so
/// each input line is one scan. Prompts go to the output stream; end of input
/// reads as a cancelled scan.
pub struct TerminalCamera<I, O> {
    lines: Mutex<Lines<I>>,
    output: Mutex<O>,
    granted: AtomicBool,
}

impl TerminalCamera<BufReader<tokio::io::Stdin>, tokio::io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stderr())
    }
}

impl<I, O> TerminalCamera<I, O>
where
    I: AsyncBufRead + Unpin + Send,
    O: AsyncWrite + Unpin + Send,
{
    pub fn new(input: I, output: O) -> Self {
        Self {
            lines: Mutex::new(input.lines()),
            output: Mutex::new(output),
            granted: Default::default(),
        }
    }

    async fn prompt(&self, text: &str) -> Result<Option<String>> {
        {
            let mut output = self.output.lock().await;
            output.write_all(text.as_bytes()).await?;
            output.write_all(b"\n").await?;
            output.flush().await?;
        }
        let line = self.lines.lock().await.next_line().await?;
        Ok(line.map(|line| line.trim().to_string()))
    }
}

#[async_trait]
impl<I, O> CameraPermissions for TerminalCamera<I, O>
where
    I: AsyncBufRead + Unpin + Send,
    O: AsyncWrite + Unpin + Send,
{
    async fn has_permission(&self) -> bool {
        self.granted.load(Ordering::SeqCst)
    }

    async fn request_permission(&self) -> bool {
        let answer = match self.prompt("Allow camera access? [y/N]").await {
            Ok(answer) => answer.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "camera permission prompt failed");
                return false;
            }
        };
        let granted = matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes");
        self.granted.store(granted, Ordering::SeqCst);
        granted
    }
}

#[async_trait]
impl<I, O> BarcodeReader for TerminalCamera<I, O>
where
    I: AsyncBufRead + Unpin + Send,
    O: AsyncWrite + Unpin + Send,
{
    async fn read(&self, options: &ScanOptions) -> Result<Option<String>> {
        self.prompt(&options.message).await
    }
}
