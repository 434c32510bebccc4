//! Newline-delimited JSON-RPC sessions over stdio (or any byte stream).
//!
//! Each incoming line is handled on its own Tokio task so a slow provider
//! call does not hold up `ping` or `tools/list`. At most
//! [`MAX_IN_FLIGHT`] lines are handled at once per session; further input is
//! not read until a slot frees up. Replies funnel through a single writer
//! task, one line per reply.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::{Semaphore, mpsc};

use crate::error::Result;
use crate::server::McpServer;

/// Replies buffered between handler tasks and the writer.
pub(crate) const REPLY_BUFFER: usize = 64;

/// Requests handled concurrently within one session.
pub const MAX_IN_FLIGHT: usize = 8;

/// Serve one session until `reader` reaches EOF and every pending reply has
/// been written.
///
/// Lines are read as raw bytes; a line that is not UTF-8 gets a parse-error
/// reply and the session carries on.
pub async fn serve_stream<R, W>(server: Arc<McpServer>, reader: R, writer: W) -> Result<()>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, mut rx) = mpsc::channel::<String>(REPLY_BUFFER);
    let slots = Arc::new(Semaphore::new(MAX_IN_FLIGHT));

    let writer_task = tokio::spawn(async move {
        let mut writer = writer;
        while let Some(reply) = rx.recv().await {
            writer.write_all(reply.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
        Ok::<_, std::io::Error>(())
    });

    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        if buf.trim_ascii().is_empty() {
            continue;
        }

        let permit = Arc::clone(&slots)
            .acquire_owned()
            .await
            .map_err(std::io::Error::other)?;
        let line = buf.trim_ascii().to_vec();
        let server = Arc::clone(&server);
        let tx = tx.clone();
        tokio::spawn(async move {
            if let Some(reply) = server.handle_bytes(&line).await {
                if tx.send(reply).await.is_err() {
                    tracing::warn!("session writer closed before reply was sent");
                }
            }
            drop(permit);
        });
    }
    drop(tx);

    writer_task.await.map_err(std::io::Error::other)??;
    Ok(())
}

/// Serve a single session over the process's stdin/stdout.
pub async fn serve_stdio(server: Arc<McpServer>) -> Result<()> {
    tracing::info!("serving MCP over stdio");
    serve_stream(server, tokio::io::stdin(), tokio::io::stdout()).await?;
    tracing::info!("stdin closed, stdio session finished");
    Ok(())
}
