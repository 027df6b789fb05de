use std::io::Read;
use std::thread;
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

/// Spawns a background thread that forwards everything read from `reader`
/// as byte chunks. The receiver reports `None` once the source hits EOF.
pub fn spawn_reader<R: Read + Send + 'static>(
    name: &str,
    mut reader: R,
) -> UnboundedReceiver<Vec<u8>> {
    let (tx, rx) = unbounded_channel();
    let name = name.to_string();

    thread::spawn(move || {
        let mut buffer = [0u8; 4096];
        loop {
            match reader.read(&mut buffer) {
                Ok(0) => break, // EOF
                Ok(n) => {
                    if tx.send(buffer[..n].to_vec()).is_err() {
                        break; // Receiver dropped
                    }
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    tracing::warn!(source = %name, "read failed: {}", e);
                    break;
                }
            }
        }
        tracing::debug!(source = %name, "reader finished");
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[tokio::test]
    async fn test_forwards_until_eof() {
        let mut rx = spawn_reader("test", Cursor::new(b">>> ".to_vec()));
        let mut received = Vec::new();
        while let Some(chunk) = rx.recv().await {
            received.extend(chunk);
        }
        assert_eq!(received, b">>> ");
    }
}
