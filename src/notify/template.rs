//! User-supplied message templates
//!
//! A template is rendered once per person against [`PersonData`]. Field names
//! follow the household config style, so a template reads `{{ PersonName }}`
//! or `{% for chore in AllChores %}`.
//!
//! Helpers available to every template:
//!
//! - `currency`: `{{ TotalEarned | currency }}` renders `$12.00`
//! - `date(format, value)`: strftime formatting, e.g. `{{ date("%B %-d", Date) }}`
//! - `pluralize(count, singular, plural)`

use std::fmt::Write;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use minijinja::{
    Environment, Error as RenderError, ErrorKind as RenderErrorKind, UndefinedBehavior,
};
use serde::Serialize;
use tracing::debug;

use crate::error::NotifyError;
use crate::models::{Chore, Person};

const TEMPLATE_NAME: &str = "message";

/// How `PersonData::date` is serialized
const DATE_VALUE_FORMAT: &str = "%Y-%m-%d";

/// A chore as seen by templates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChoreData {
    pub name: String,
    pub difficulty: u32,
    pub earned: f64,
    /// Empty when the chore has no description
    pub description: String,
}

impl From<&Chore> for ChoreData {
    fn from(chore: &Chore) -> Self {
        Self {
            name: chore.name.clone(),
            difficulty: chore.effort,
            earned: f64::from(chore.reward),
            description: chore.description.clone().unwrap_or_default(),
        }
    }
}

/// Everything a template can show about one person's assignments.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PersonData {
    pub person_name: String,
    pub contact: String,
    /// `YYYY-MM-DD`; format it with the `date` helper
    pub date: String,
    pub pre_assigned_chores: Vec<ChoreData>,
    pub distributed_chores: Vec<ChoreData>,
    /// Pre-assigned chores followed by distributed ones
    pub all_chores: Vec<ChoreData>,
    pub total_earned: f64,
    pub total_difficulty: u64,
    /// 0 means no limit
    pub capacity: u32,
    pub verbose: bool,
}

impl PersonData {
    pub fn build(person: &Person, verbose: bool, date: NaiveDate) -> Self {
        let pre_assigned_chores: Vec<ChoreData> =
            person.pre_assigned.iter().map(ChoreData::from).collect();
        let distributed_chores: Vec<ChoreData> =
            person.chores.iter().map(ChoreData::from).collect();
        let all_chores = pre_assigned_chores
            .iter()
            .chain(distributed_chores.iter())
            .cloned()
            .collect();

        Self {
            person_name: person.name.clone(),
            contact: person.contact.clone().unwrap_or_default(),
            date: date.format(DATE_VALUE_FORMAT).to_string(),
            pre_assigned_chores,
            distributed_chores,
            all_chores,
            total_earned: person.total_reward as f64,
            total_difficulty: person.total_effort,
            capacity: person.capacity,
            verbose,
        }
    }
}

/// A parsed template plus its helper functions.
#[derive(Debug, Clone)]
pub struct MessageTemplate {
    env: Arc<Environment<'static>>,
}

impl MessageTemplate {
    /// Read and parse a template file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, NotifyError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => NotifyError::TemplateNotFound(path.to_path_buf()),
            _ => NotifyError::Template(format!(
                "failed to read template file {}: {}",
                path.display(),
                e
            )),
        })?;

        debug!(path = %path.display(), bytes = source.len(), "Loaded message template");
        Self::from_source(source)
    }

    pub fn from_source(source: impl Into<String>) -> Result<Self, NotifyError> {
        let mut env = helper_environment();
        env.add_template_owned(TEMPLATE_NAME, source.into())
            .map_err(|e| NotifyError::Template(format!("failed to parse template: {e}")))?;

        Ok(Self { env: Arc::new(env) })
    }

    pub fn render(&self, data: &PersonData) -> Result<String, NotifyError> {
        self.env
            .get_template(TEMPLATE_NAME)
            .and_then(|template| template.render(data))
            .map_err(|e| NotifyError::Template(format!("failed to execute template: {e}")))
    }
}

fn helper_environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.set_undefined_behavior(UndefinedBehavior::Strict);

    env.add_filter("currency", currency);
    env.add_function("currency", currency);
    env.add_function("date", date);
    env.add_filter("date", |value: String, format: String| date(format, value));
    env.add_function("pluralize", pluralize);
    env
}

fn currency(amount: f64) -> String {
    format!("${:.2}", amount)
}

fn date(format: String, value: String) -> Result<String, RenderError> {
    let parsed = NaiveDate::parse_from_str(&value, DATE_VALUE_FORMAT).map_err(|e| {
        RenderError::new(
            RenderErrorKind::InvalidOperation,
            format!("invalid date '{value}': {e}"),
        )
    })?;

    // chrono reports a bad format string through fmt::Error
    let mut output = String::new();
    write!(output, "{}", parsed.format(&format)).map_err(|_| {
        RenderError::new(
            RenderErrorKind::InvalidOperation,
            format!("invalid date format '{format}'"),
        )
    })?;
    Ok(output)
}

fn pluralize(count: i64, singular: String, plural: String) -> String {
    if count == 1 {
        singular
    } else {
        plural
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn week_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2006, 1, 2).unwrap()
    }

    fn alice() -> Person {
        let mut alice = Person::new("Alice")
            .with_capacity(10)
            .with_contact("+15555550100")
            .with_pre_assigned(Chore::new("Feed cat", 1, 1).with_description("Morning and night"));
        alice.assign(Chore::new("Kitchen", 6, 5));
        alice
    }

    #[test]
    fn test_person_data() {
        let data = PersonData::build(&alice(), true, week_of());

        assert_eq!(data.person_name, "Alice");
        assert_eq!(data.contact, "+15555550100");
        assert_eq!(data.date, "2006-01-02");
        assert_eq!(data.pre_assigned_chores.len(), 1);
        assert_eq!(data.distributed_chores[0].name, "Kitchen");
        let names: Vec<&str> = data.all_chores.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Feed cat", "Kitchen"]);
        assert_eq!(data.total_earned, 6.0);
        assert_eq!(data.total_difficulty, 7);
        assert_eq!(data.capacity, 10);
        assert!(data.verbose);
    }

    #[test]
    fn test_render_with_helpers() {
        let template = MessageTemplate::from_source(
            "{{ date(\"%A, %B %-d\", Date) }}: {{ PersonName }} has {{ AllChores|length }} \
             {{ pluralize(AllChores|length, \"chore\", \"chores\") }}\n\
             {% for chore in AllChores %}- {{ chore.Name }} {{ chore.Earned|currency }}\
             {% if chore.Description %} ({{ chore.Description }}){% endif %}\n{% endfor %}\
             Total: {{ TotalEarned|currency }}\n",
        )
        .unwrap();

        let message = template
            .render(&PersonData::build(&alice(), false, week_of()))
            .unwrap();

        assert_eq!(
            message,
            "Monday, January 2: Alice has 2 chores\n\
             - Feed cat $1.00 (Morning and night)\n\
             - Kitchen $5.00\n\
             Total: $6.00\n"
        );
    }

    #[test]
    fn test_pluralize_singular() {
        let template = MessageTemplate::from_source(
            "{{ pluralize(DistributedChores|length, \"chore\", \"chores\") }}",
        )
        .unwrap();

        let message = template
            .render(&PersonData::build(&alice(), false, week_of()))
            .unwrap();
        assert_eq!(message, "chore");
    }

    #[test]
    fn test_date_filter_form() {
        let template = MessageTemplate::from_source("{{ Date|date(\"%d/%m/%Y\") }}").unwrap();

        let message = template
            .render(&PersonData::build(&alice(), false, week_of()))
            .unwrap();
        assert_eq!(message, "02/01/2006");
    }

    #[test]
    fn test_unknown_field_is_an_error() {
        let template = MessageTemplate::from_source("{{ Nickname }}").unwrap();

        let err = template
            .render(&PersonData::build(&alice(), false, week_of()))
            .unwrap_err();
        assert!(err.to_string().contains("failed to execute template"));
    }

    #[test]
    fn test_syntax_error_on_load() {
        let err = MessageTemplate::from_source("{% for chore in AllChores %}").unwrap_err();
        assert!(err.to_string().contains("failed to parse template"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".tmpl")
            .tempfile()
            .unwrap();
        file.write_all(b"Hi {{ PersonName }}!\n").unwrap();

        let template = MessageTemplate::load(file.path()).unwrap();
        let message = template
            .render(&PersonData::build(&alice(), false, week_of()))
            .unwrap();
        assert_eq!(message, "Hi Alice!\n");
    }

    #[test]
    fn test_missing_template_file() {
        let err = MessageTemplate::load("/nonexistent/message.tmpl").unwrap_err();

        assert!(matches!(err, NotifyError::TemplateNotFound(_)));
        assert_eq!(
            err.to_string(),
            "template file not found: /nonexistent/message.tmpl"
        );
    }
}
