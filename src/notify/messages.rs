//! iMessage delivery, one message per person

use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use super::template::{MessageTemplate, PersonData};
use super::{escape_applescript, is_supported, run_osascript, Publisher};
use crate::error::NotifyError;
use crate::models::Person;

/// Sends each person their chores through the Messages app.
#[derive(Debug, Clone)]
pub struct MessageSender {
    dry_run: bool,
    verbose: bool,
    template: Option<MessageTemplate>,
}

impl MessageSender {
    pub fn new(dry_run: bool, verbose: bool) -> Self {
        Self {
            dry_run,
            verbose,
            template: None,
        }
    }

    /// Render messages with `template` instead of the built-in format.
    pub fn with_template(mut self, template: MessageTemplate) -> Self {
        self.template = Some(template);
        self
    }

    fn message_for(&self, person: &Person, date: NaiveDate) -> Result<String, NotifyError> {
        match &self.template {
            Some(template) => template.render(&PersonData::build(person, self.verbose, date)),
            None => Ok(format_message(person, self.verbose)),
        }
    }
}

impl Publisher for MessageSender {
    fn heading(&self) -> String {
        "--- Sending iMessage Notifications ---".to_string()
    }

    fn ensure_supported(&self) -> Result<(), NotifyError> {
        if self.dry_run || is_supported() {
            Ok(())
        } else {
            Err(NotifyError::Unsupported("iMessage"))
        }
    }

    fn publish(&self, people: &[Person]) -> Result<(), NotifyError> {
        self.ensure_supported()?;

        let today = Local::now().date_naive();
        let mut failures = Vec::new();
        for person in people {
            let Some(contact) = person.contact.as_deref().filter(|c| !c.is_empty()) else {
                println!("Skipping {}: no contact configured", person.name);
                continue;
            };

            let message = match self.message_for(person, today) {
                Ok(message) => message,
                Err(e) => {
                    warn!(person = %person.name, error = %e, "Failed to render message");
                    failures.push(format!("{}: {}", person.name, e));
                    continue;
                }
            };

            if self.dry_run {
                println!("\n--- Would send to {} ({}) ---\n{}", person.name, contact, message);
                continue;
            }

            match run_osascript(&send_script(contact, &message)) {
                Ok(()) => {
                    info!(person = %person.name, "Sent chore list");
                    println!("✓ Sent chores to {} ({})", person.name, contact);
                }
                Err(e) => {
                    warn!(person = %person.name, error = %e, "Failed to send chore list");
                    failures.push(format!("{}: {}", person.name, e));
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(NotifyError::Partial(failures))
        }
    }
}

/// The text message a person receives.
pub fn format_message(person: &Person, verbose: bool) -> String {
    let mut message = format!("Hi {}! Here are your chores:\n\n", person.name);

    for chore in person.all_chores() {
        if verbose {
            message.push_str(&format!(
                "• {} (Difficulty: {}, Earns: ${})\n",
                chore.name, chore.effort, chore.reward
            ));
        } else {
            message.push_str(&format!("• {} (Earns: ${})\n", chore.name, chore.reward));
        }
        if let Some(description) = chore.description.as_deref().filter(|d| !d.is_empty()) {
            message.push_str(&format!("  {}\n", description));
        }
    }

    message.push_str(&format!("\nTotal: ${}", person.total_reward));
    if verbose && person.has_capacity_limit() {
        message.push_str(&format!(
            "\nEffort: {} / {}",
            person.total_effort, person.capacity
        ));
    }

    message
}

fn send_script(contact: &str, message: &str) -> String {
    format!(
        r#"
tell application "Messages"
	set targetService to 1st service whose service type = iMessage
	set targetBuddy to buddy "{}" of targetService
	send "{}" to targetBuddy
end tell
"#,
        escape_applescript(contact),
        escape_applescript(message)
    )
}
