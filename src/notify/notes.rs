//! Apple Notes history
//!
//! Each run is prepended to a named note, newest first, so the note doubles
//! as a record of past weeks. The note is created if it does not exist.

use chrono::{Local, NaiveDate};
use tracing::info;

use super::template::{MessageTemplate, PersonData};
use super::{escape_applescript, is_supported, run_osascript, Publisher};
use crate::error::NotifyError;
use crate::models::{Chore, Person};

/// Date format used in note headers, e.g. "Monday, January 2, 2006"
const DATE_FORMAT: &str = "%A, %B %-d, %Y";

/// Writes the chore list into an Apple Note.
#[derive(Debug, Clone)]
pub struct NoteWriter {
    note_name: String,
    dry_run: bool,
    verbose: bool,
    template: Option<MessageTemplate>,
}

impl NoteWriter {
    pub fn new(note_name: impl Into<String>, dry_run: bool, verbose: bool) -> Self {
        Self {
            note_name: note_name.into(),
            dry_run,
            verbose,
            template: None,
        }
    }

    /// Render each person with `template` instead of the built-in format.
    pub fn with_template(mut self, template: MessageTemplate) -> Self {
        self.template = Some(template);
        self
    }

    /// Note body as (HTML, plain text). A template's output is used for both.
    fn note_content(
        &self,
        people: &[Person],
        date: NaiveDate,
    ) -> Result<(String, String), NotifyError> {
        let Some(template) = &self.template else {
            return Ok((
                format_note_html(people, self.verbose, date),
                format_note_plain(people, self.verbose, date),
            ));
        };

        let mut content = String::new();
        for person in people {
            content.push_str(&template.render(&PersonData::build(person, self.verbose, date))?);
        }
        Ok((content.clone(), content))
    }
}

impl Publisher for NoteWriter {
    fn heading(&self) -> String {
        "--- Saving to Apple Notes ---".to_string()
    }

    fn ensure_supported(&self) -> Result<(), NotifyError> {
        if self.dry_run || is_supported() {
            Ok(())
        } else {
            Err(NotifyError::Unsupported("Apple Notes"))
        }
    }

    fn publish(&self, people: &[Person]) -> Result<(), NotifyError> {
        self.ensure_supported()?;

        let (html, plain) = self.note_content(people, Local::now().date_naive())?;

        if self.dry_run {
            println!("\n--- Would insert into note '{}' ---\n{}", self.note_name, plain);
            return Ok(());
        }

        run_osascript(&prepend_script(&self.note_name, &html))?;

        info!(note = %self.note_name, "Prepended chore list to note");
        println!("✓ Added chore list to note '{}'", self.note_name);
        Ok(())
    }
}

/// HTML body inserted at the top of the note.
pub fn format_note_html(people: &[Person], verbose: bool, date: NaiveDate) -> String {
    let mut html = format!("<div><b>{}</b></div>", date.format(DATE_FORMAT));
    html.push_str("<div><br></div>");

    for person in people {
        if verbose && person.has_capacity_limit() {
            html.push_str(&format!(
                "<div><b>{}</b> (Capacity: {})</div>",
                person.name, person.capacity
            ));
        } else {
            html.push_str(&format!("<div><b>{}</b></div>", person.name));
        }

        for chore in person.all_chores() {
            html.push_str(&format!("<div>• {}</div>", chore_summary(chore, verbose)));
            if let Some(description) = description(chore) {
                html.push_str(&format!(
                    "<div style=\"padding-left: 20px; color: #666;\">{}</div>",
                    description
                ));
            }
        }

        html.push_str(&format!("<div>{}</div>", totals(person, verbose)));
        html.push_str("<div><br></div>");
    }

    html.push_str("<div>─────────────────────</div>");
    html.push_str("<div><br></div>");
    html
}

/// Plain-text rendering of the note body, used for dry-run previews.
pub fn format_note_plain(people: &[Person], verbose: bool, date: NaiveDate) -> String {
    let mut text = format!("═══ {} ═══\n\n", date.format(DATE_FORMAT));

    for person in people {
        if verbose && person.has_capacity_limit() {
            text.push_str(&format!("{} (Capacity: {})\n", person.name, person.capacity));
        } else {
            text.push_str(&format!("{}\n", person.name));
        }

        for chore in person.all_chores() {
            text.push_str(&format!("  • {}\n", chore_summary(chore, verbose)));
            if let Some(description) = description(chore) {
                text.push_str(&format!("    {}\n", description));
            }
        }

        text.push_str(&format!("  {}\n\n", totals(person, verbose)));
    }

    text.push_str("────────────────────────\n");
    text
}

fn chore_summary(chore: &Chore, verbose: bool) -> String {
    if verbose {
        format!(
            "{} (Difficulty: {}, Earns: ${})",
            chore.name, chore.effort, chore.reward
        )
    } else {
        format!("{} — ${}", chore.name, chore.reward)
    }
}

fn description(chore: &Chore) -> Option<&str> {
    chore.description.as_deref().filter(|d| !d.is_empty())
}

fn totals(person: &Person, verbose: bool) -> String {
    if verbose && person.has_capacity_limit() {
        format!(
            "Total: ${} | Effort: {} / {}",
            person.total_reward, person.total_effort, person.capacity
        )
    } else {
        format!("Total: ${}", person.total_reward)
    }
}

/// AppleScript that puts `content` right below the note title, or creates
/// the note when missing.
fn prepend_script(note_name: &str, content: &str) -> String {
    format!(
        r#"
tell application "Notes"
	set noteName to "{name}"
	set newContent to "{content}"
	set titleHTML to "<div>" & noteName & "</div>"

	set noteExists to false
	try
		set targetNote to note noteName of default account
		set noteExists to true
	end try

	if noteExists then
		set currentBody to body of targetNote
		set oldContent to ""
		try
			set divEnd to offset of "</div>" in currentBody
			if divEnd > 0 then
				set oldContent to text (divEnd + 6) thru -1 of currentBody
			end if
		end try
		set body of targetNote to titleHTML & newContent & oldContent
	else
		tell default account
			make new note with properties {{body:(titleHTML & newContent)}}
		end tell
	end if
end tell
"#,
        name = escape_applescript(note_name),
        content = escape_applescript(content)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn week_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2006, 1, 2).unwrap()
    }

    fn household() -> Vec<Person> {
        let mut alice = Person::new("Alice")
            .with_capacity(10)
            .with_pre_assigned(Chore::new("Feed cat", 1, 1).with_description("Morning and night"));
        alice.assign(Chore::new("Kitchen", 6, 5));
        let mut bob = Person::new("Bob");
        bob.assign(Chore::new("Bathroom", 5, 4));
        vec![alice, bob]
    }

    #[test]
    fn test_plain_note() {
        let text = format_note_plain(&household(), false, week_of());

        assert_eq!(
            text,
            "═══ Monday, January 2, 2006 ═══\n\n\
             Alice\n\
             \x20 • Feed cat — $1\n\
             \x20   Morning and night\n\
             \x20 • Kitchen — $5\n\
             \x20 Total: $6\n\n\
             Bob\n\
             \x20 • Bathroom — $4\n\
             \x20 Total: $4\n\n\
             ────────────────────────\n"
        );
    }

    #[test]
    fn test_plain_note_verbose() {
        let text = format_note_plain(&household(), true, week_of());

        assert!(text.contains("Alice (Capacity: 10)\n"));
        assert!(text.contains("  • Kitchen (Difficulty: 6, Earns: $5)\n"));
        assert!(text.contains("  Total: $6 | Effort: 7 / 10\n"));
        // Bob has no limit
        assert!(text.contains("Bob\n"));
        assert!(text.contains("  Total: $4\n"));
    }

    #[test]
    fn test_html_note() {
        let html = format_note_html(&household(), false, week_of());

        assert!(html.starts_with("<div><b>Monday, January 2, 2006</b></div><div><br></div>"));
        assert!(html.contains("<div><b>Alice</b></div><div>• Feed cat — $1</div>"));
        assert!(html.contains(
            "<div style=\"padding-left: 20px; color: #666;\">Morning and night</div>"
        ));
        assert!(html.contains("<div>Total: $6</div>"));
        assert!(html.ends_with("<div>─────────────────────</div><div><br></div>"));
    }

    #[test]
    fn test_prepend_script_escapes() {
        let script = prepend_script(r#"Chore "History""#, "<div>x</div>");
        assert!(script.contains(r#"set noteName to "Chore \"History\"""#));
        assert!(script.contains("make new note with properties {body:(titleHTML & newContent)}"));
    }

    #[test]
    fn test_dry_run_publishes_anywhere() {
        let writer = NoteWriter::new("Chore History", true, true);
        assert!(writer.publish(&household()).is_ok());
    }

    #[test]
    fn test_builtin_content_without_template() {
        let writer = NoteWriter::new("Chore History", true, false);

        let (html, plain) = writer.note_content(&household(), week_of()).unwrap();

        assert_eq!(html, format_note_html(&household(), false, week_of()));
        assert_eq!(plain, format_note_plain(&household(), false, week_of()));
    }

    #[test]
    fn test_template_renders_each_person() {
        let template = MessageTemplate::from_source(
            "<div>{{ date(\"%b %-d\", Date) }} {{ PersonName }}: {{ TotalEarned|currency }}</div>",
        )
        .unwrap();
        let writer = NoteWriter::new("Chore History", true, false).with_template(template);

        let (html, plain) = writer.note_content(&household(), week_of()).unwrap();

        assert_eq!(
            html,
            "<div>Jan 2 Alice: $6.00</div><div>Jan 2 Bob: $4.00</div>"
        );
        assert_eq!(plain, html);
    }

    #[test]
    fn test_template_error_stops_publish() {
        let template = MessageTemplate::from_source("{{ date(\"%Y\", PersonName) }}").unwrap();
        let writer = NoteWriter::new("Chore History", true, false).with_template(template);

        let err = writer.publish(&household()).unwrap_err();
        assert!(matches!(err, NotifyError::Template(_)));
    }
}
