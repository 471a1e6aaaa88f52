//! Publishers - deliver a finished distribution outside the terminal
//!
//! Both built-in publishers drive macOS apps through `osascript`:
//!
//! - [`MessageSender`]: one iMessage per person with a contact
//! - [`NoteWriter`]: prepends the dated list to an Apple Note
//!
//! In dry-run mode a publisher prints what it would do and never touches
//! osascript, so dry runs work on any platform. Either publisher can render
//! people through a user-supplied [`MessageTemplate`] instead of its
//! built-in format.

pub mod messages;
pub mod notes;
pub mod template;

use std::process::Command;

use tracing::debug;

use crate::error::NotifyError;
use crate::models::Person;

pub use messages::MessageSender;
pub use notes::NoteWriter;
pub use template::{ChoreData, MessageTemplate, PersonData};

/// Something that can deliver the final assignments.
pub trait Publisher {
    /// Banner printed before publishing
    fn heading(&self) -> String;

    /// Whether this publisher can run on the current platform
    fn ensure_supported(&self) -> Result<(), NotifyError>;

    fn publish(&self, people: &[Person]) -> Result<(), NotifyError>;
}

/// Whether osascript integrations are available on this platform.
pub fn is_supported() -> bool {
    cfg!(target_os = "macos")
}

/// Escape text for use inside an AppleScript string literal.
pub fn escape_applescript(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Run an AppleScript program, failing with its output if it errors.
pub(crate) fn run_osascript(script: &str) -> Result<(), NotifyError> {
    debug!(bytes = script.len(), "Running osascript");

    let output = Command::new("osascript").args(["-e", script]).output()?;

    if output.status.success() {
        Ok(())
    } else {
        let mut detail = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if detail.is_empty() {
            detail = String::from_utf8_lossy(&output.stdout).trim().to_string();
        }
        Err(NotifyError::Script(format!("{}, output: {}", output.status, detail)))
    }
}
