use std::io::{self, Write};
use std::sync::Arc;

/// Sink for everything the viewer sees: typed characters and interpreter output.
pub type OutputHandler = Arc<dyn Fn(&[u8]) + Send + Sync>;

/// Handler writing straight to stdout, flushing after every call so each
/// byte shows up as soon as it is produced.
pub fn stdout_handler() -> OutputHandler {
    Arc::new(|data: &[u8]| {
        let mut stdout = io::stdout().lock();
        if let Err(e) = stdout.write_all(data).and_then(|_| stdout.flush()) {
            tracing::warn!("Failed to write to stdout: {}", e);
        }
    })
}
