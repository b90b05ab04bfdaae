//! Text status display.
//!
//! A single line of short text ("DRY: 19%").  The panel itself is a
//! character sink: every accepted message is mirrored to the log under the
//! `DISPLAY` tag so a headless board still shows its status on the console.
//!
//! Once shut down the display rejects further text until power-cycled.

use log::{info, warn};

use crate::error::TransportError;
use crate::fsm::context::DisplayText;

#[derive(Debug, Default)]
pub struct TextDisplay {
    current: Option<DisplayText>,
    updates: u32,
    shut_down: bool,
}

impl TextDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the shown text.  Text longer than the panel is rejected
    /// and the previous line stays up.
    pub fn show(&mut self, text: &str) -> Result<(), TransportError> {
        if self.shut_down {
            return Err(TransportError::DisplayFailed);
        }
        let mut line = DisplayText::new();
        if line.push_str(text).is_err() {
            warn!("DISPLAY | {} bytes do not fit the panel", text.len());
            return Err(TransportError::DisplayFailed);
        }
        info!("DISPLAY | {}", line);
        self.current = Some(line);
        self.updates = self.updates.wrapping_add(1);
        Ok(())
    }

    /// Blank the panel.  Idempotent.
    pub fn shutdown(&mut self) {
        if !self.shut_down {
            info!("DISPLAY | (off)");
        }
        self.current = None;
        self.shut_down = true;
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn updates(&self) -> u32 {
        self.updates
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }
}
