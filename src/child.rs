use crate::reader::spawn_reader;
use anyhow::{Context, Result};
use std::io;
use std::process::Stdio;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::process::{Child, Command};
use tokio::sync::mpsc::UnboundedReceiver;

/// Manages the interpreter process the script is typed into.
///
/// The child is never killed or joined: it stays alive for the whole playback
/// and exits on its own once its stdin closes when this program exits.
pub struct ChildSession {
    child: Option<Child>,
    writer: Box<dyn AsyncWrite + Send + Unpin>,
}

impl ChildSession {
    /// Spawn `program` with stdout and stderr merged into a single pipe,
    /// returning the session and a receiver for the merged output.
    pub fn spawn(program: &str, args: &[&str]) -> Result<(Self, UnboundedReceiver<Vec<u8>>)> {
        let (reader, writer) = io::pipe().context("Failed to create output pipe")?;
        let stderr = writer
            .try_clone()
            .context("Failed to duplicate output pipe")?;

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::piped())
            .stdout(writer)
            .stderr(stderr);

        let mut child = cmd
            .spawn()
            .with_context(|| format!("Failed to spawn interpreter: {}", program))?;
        // The command still holds the write ends; release them so the reader
        // sees EOF when the child exits.
        drop(cmd);

        let stdin = child
            .stdin
            .take()
            .context("Failed to get interpreter stdin")?;
        tracing::info!(program, pid = ?child.id(), "spawned interpreter");

        let output_rx = spawn_reader("interpreter", reader);
        let session = ChildSession {
            child: Some(child),
            writer: Box::new(stdin),
        };

        Ok((session, output_rx))
    }

    /// Wrap an arbitrary writer as the interpreter input, without a process.
    pub fn from_writer(writer: impl AsyncWrite + Send + Unpin + 'static) -> Self {
        ChildSession {
            child: None,
            writer: Box::new(writer),
        }
    }

    /// Write data to the interpreter's stdin in one go
    pub async fn write(&mut self, data: &[u8]) -> Result<()> {
        self.writer
            .write_all(data)
            .await
            .context("Failed to write to interpreter")?;
        self.writer
            .flush()
            .await
            .context("Failed to flush interpreter input")?;
        Ok(())
    }

    /// Process id of the interpreter, if one was spawned and is still known
    pub fn id(&self) -> Option<u32> {
        self.child.as_ref().and_then(Child::id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_spawn_merges_stdout_and_stderr() {
        let (mut session, mut output_rx) =
            ChildSession::spawn("sh", &["-c", "read line; echo out:$line; echo err >&2"])
                .unwrap();
        assert!(session.id().is_some());
        session.write(b"hi\n").await.unwrap();

        let mut output = Vec::new();
        while let Some(chunk) = output_rx.recv().await {
            output.extend(chunk);
        }
        assert_eq!(String::from_utf8_lossy(&output), "out:hi\nerr\n");
    }

    #[tokio::test]
    async fn test_spawn_missing_program() {
        let err = ChildSession::spawn("/nonexistent/python", &["-i"])
            .err()
            .unwrap();
        assert!(err.to_string().contains("Failed to spawn interpreter"));
    }

    #[tokio::test]
    async fn test_from_writer() {
        let (client, mut server) = tokio::io::duplex(64);
        let mut session = ChildSession::from_writer(client);
        assert_eq!(session.id(), None);
        session.write(b"x = 1\n").await.unwrap();

        let mut buf = [0u8; 6];
        tokio::io::AsyncReadExt::read_exact(&mut server, &mut buf)
            .await
            .unwrap();
        assert_eq!(&buf, b"x = 1\n");
    }
}
