//! Quote delivery with a fallback chain.
//!
//! A message is offered to each [`QuoteChannel`] in turn. The first channel
//! that accepts it wins; if every channel fails the caller gets a plain
//! instruction to email the shop directly. Dispatch itself never fails.
//!
//! ```text
//! MailClient (mailto: via opener) -> DraftFile (clipboard stand-in) -> advisory text
//! ```

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::{debug, info, warn};

use crate::error::{ForgeError, Result};
use crate::quote::QuoteMessage;

/// Something that can hand a quote message to the outside world.
///
/// # Contract
///
/// - `deliver` returns once the hand-off has started; it does not wait for
///   the visitor to actually send anything.
/// - An `Err` means "try the next channel", never "abort".
pub trait QuoteChannel {
    /// Short name used in logs and notices
    fn name(&self) -> &'static str;

    fn deliver(&self, message: &QuoteMessage) -> Result<()>;
}

/// Opens the visitor's mail client with a pre-filled draft.
///
/// The opener is spawned and left running; its exit status is not awaited.
#[derive(Debug, Clone)]
pub struct MailClient {
    opener: String,
}

impl MailClient {
    pub fn new(opener: impl Into<String>) -> Self {
        Self {
            opener: opener.into(),
        }
    }
}

impl QuoteChannel for MailClient {
    fn name(&self) -> &'static str {
        "mail client"
    }

    fn deliver(&self, message: &QuoteMessage) -> Result<()> {
        let url = message.mailto_url();
        debug!("Spawning '{}' for {} ({} bytes)", self.opener, message.kind, url.len());

        Command::new(&self.opener)
            .arg(&url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| ForgeError::dispatch(format!("cannot run '{}': {}", self.opener, e)))?;

        Ok(())
    }
}

/// Writes the draft to a file the visitor can paste from
#[derive(Debug, Clone)]
pub struct DraftFile {
    path: PathBuf,
}

impl DraftFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl QuoteChannel for DraftFile {
    fn name(&self) -> &'static str {
        "draft file"
    }

    fn deliver(&self, message: &QuoteMessage) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, message.draft_text())?;
        Ok(())
    }
}

/// How a dispatch ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A channel accepted the message
    Delivered { channel: &'static str },
    /// Every channel failed; show this to the visitor
    Advisory(String),
}

/// Offer `message` to each channel in order.
pub fn dispatch(channels: &[&dyn QuoteChannel], message: &QuoteMessage) -> DispatchOutcome {
    for channel in channels {
        match channel.deliver(message) {
            Ok(()) => {
                info!("Sent {} via {}", message.kind, channel.name());
                return DispatchOutcome::Delivered {
                    channel: channel.name(),
                };
            }
            Err(e) => warn!("{} failed, trying next channel: {}", channel.name(), e),
        }
    }

    warn!("No channel could deliver the {}", message.kind);
    DispatchOutcome::Advisory(message.advisory())
}
