//! Live pause/resume from the keyboard.

use std::collections::VecDeque;
use tokio::sync::mpsc::UnboundedReceiver;

/// Polls terminal keystrokes between typed characters.
///
/// Any of the configured keys pauses playback; the next one resumes it. Other
/// keys are read and discarded.
pub struct PauseController {
    keys: UnboundedReceiver<Vec<u8>>,
    pending: VecDeque<u8>,
    pause_keys: Vec<u8>,
}

impl PauseController {
    pub fn new(keys: UnboundedReceiver<Vec<u8>>, pause_keys: Vec<u8>) -> Self {
        PauseController {
            keys,
            pending: VecDeque::new(),
            pause_keys,
        }
    }

    /// Return immediately unless a pause key is waiting; otherwise block until
    /// a second pause key arrives. Returns whether playback was paused.
    ///
    /// If the key stream closes while paused, playback resumes since nothing
    /// could ever resume it otherwise.
    pub async fn maybe_pause(&mut self) -> bool {
        let Some(key) = self.try_next_key() else {
            return false;
        };
        if !self.is_pause_key(key) {
            return false;
        }

        tracing::info!("playback paused");
        loop {
            match self.next_key().await {
                Some(key) if self.is_pause_key(key) => break,
                Some(_) => continue,
                None => {
                    tracing::warn!("terminal input closed while paused, resuming");
                    break;
                }
            }
        }
        tracing::info!("playback resumed");
        true
    }

    fn is_pause_key(&self, key: u8) -> bool {
        self.pause_keys.contains(&key)
    }

    fn try_next_key(&mut self) -> Option<u8> {
        if self.pending.is_empty() {
            if let Ok(chunk) = self.keys.try_recv() {
                self.pending.extend(chunk);
            }
        }
        self.pending.pop_front()
    }

    async fn next_key(&mut self) -> Option<u8> {
        loop {
            if let Some(key) = self.pending.pop_front() {
                return Some(key);
            }
            let chunk = self.keys.recv().await?;
            self.pending.extend(chunk);
        }
    }
}
