//! CLI - command-line interface for running distributions
//!
//! `distribute` loads the household config, balances the chores, prints the
//! result and optionally publishes it. With `--confirm` the user can re-roll
//! the random assignment before anything is sent.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};

use crate::config::{Config, DEFAULT_CONFIG_FILE};
use crate::distributor::report::{format_distribution, PrintOptions};
use crate::distributor::distribute;
use crate::models::Person;
use crate::error::NotifyError;
use crate::notify::{MessageSender, MessageTemplate, NoteWriter, Publisher};

/// Package version baked in at compile time
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Short git commit the binary was built from
pub const COMMIT_SHA: &str = env!("GIT_COMMIT_SHORT");
/// UTC build timestamp
pub const BUILD_DATE: &str = env!("BUILD_TIMESTAMP");

#[derive(Debug, Parser)]
#[command(name = "chore-distributor")]
#[command(about = "A fair chore distribution tool for families")]
#[command(long_about = "Fairly distributes household chores among family members based on \
earning potential, with optional effort capacity limits. Assignments are shuffled each run.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Distribute chores among family members
    Distribute(DistributeArgs),

    /// Print the version information
    Version,
}

#[derive(Debug, Clone, Args)]
pub struct DistributeArgs {
    /// Path to the configuration file (JSON, TOML or YAML)
    #[arg(short, long, env = "CHORES_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Show difficulty and capacity information
    #[arg(short, long)]
    pub verbose: bool,

    /// Send iMessage notifications (macOS only)
    #[arg(short, long)]
    pub sms: bool,

    /// Save the chore list to an Apple Note with this name (macOS only)
    #[arg(short = 'o', long)]
    pub note: Option<String>,

    /// Prompt for confirmation before sending messages and saving to notes
    #[arg(short = 'i', long)]
    pub confirm: bool,

    /// Preview actions without sending messages or saving to notes
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Template file for messages and notes, rendered once per person
    #[arg(short, long)]
    pub template: Option<PathBuf>,
}

impl DistributeArgs {
    /// Publishers selected by the flags, notes first.
    ///
    /// The template is only loaded when a publisher is selected.
    pub fn publishers(&self) -> Result<Vec<Box<dyn Publisher>>, NotifyError> {
        let note = self.note.as_deref().filter(|n| !n.is_empty());
        if note.is_none() && !self.sms {
            return Ok(Vec::new());
        }

        let template = self
            .template
            .as_deref()
            .map(MessageTemplate::load)
            .transpose()?;

        let mut publishers: Vec<Box<dyn Publisher>> = Vec::new();
        if let Some(note) = note {
            let mut writer = NoteWriter::new(note, self.dry_run, self.verbose);
            if let Some(template) = &template {
                writer = writer.with_template(template.clone());
            }
            publishers.push(Box::new(writer));
        }
        if self.sms {
            let mut sender = MessageSender::new(self.dry_run, self.verbose);
            if let Some(template) = template {
                sender = sender.with_template(template);
            }
            publishers.push(Box::new(sender));
        }
        Ok(publishers)
    }
}

/// Answer to the confirm/retry/abort prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirm,
    Retry,
    Abort,
}

impl Confirmation {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "c" | "confirm" => Some(Confirmation::Confirm),
            "r" | "retry" => Some(Confirmation::Retry),
            "a" | "abort" | "cancel" => Some(Confirmation::Abort),
            _ => None,
        }
    }
}

/// Ask until a recognised answer is given. End of input counts as abort.
pub fn prompt_confirmation<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
) -> io::Result<Confirmation> {
    loop {
        write!(writer, "\n[C]onfirm, [R]etry, or [A]bort? ")?;
        writer.flush()?;

        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Ok(Confirmation::Abort);
        }

        match Confirmation::parse(&line) {
            Some(answer) => return Ok(answer),
            None => writeln!(writer, "Please enter C (confirm), R (retry), or A (abort)")?,
        }
    }
}

/// Execute a parsed command line
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Distribute(args) => run_distribute(&args),
        Commands::Version => {
            print!("{}", format_version());
            Ok(())
        }
    }
}

pub fn format_version() -> String {
    format!(
        "chore-distributor {}\n  Commit: {}\n  Built:  {}\n",
        VERSION, COMMIT_SHA, BUILD_DATE
    )
}

/// Load, distribute, print, optionally confirm, then publish.
pub fn run_distribute(args: &DistributeArgs) -> anyhow::Result<()> {
    let config = Config::load(&args.config)
        .with_context(|| format!("Error loading config {}", args.config.display()))?;

    let publishers = args.publishers()?;
    for publisher in &publishers {
        publisher.ensure_supported()?;
    }

    let opts = PrintOptions {
        verbose: args.verbose,
    };
    let wants_confirmation = args.confirm && !publishers.is_empty() && !args.dry_run;

    let stdin = io::stdin();
    let mut attempt = 0u32;
    let people: Vec<Person> = loop {
        attempt += 1;
        info!(attempt, "Distributing chores");

        let result = distribute(&config.chores, config.baseline_people());
        if !result.is_complete() {
            warn!(
                unassigned = result.unassigned.len(),
                "Some chores could not be assigned"
            );
        }
        print!("{}", format_distribution(&result.people, opts));

        if wants_confirmation {
            let answer = prompt_confirmation(&mut stdin.lock(), &mut io::stdout())
                .context("Error reading input")?;
            match answer {
                Confirmation::Retry => {
                    println!("--- Retrying distribution ---");
                    continue;
                }
                Confirmation::Abort => {
                    println!("Cancelled.");
                    return Ok(());
                }
                Confirmation::Confirm => {}
            }
        }

        break result.people;
    };

    for publisher in &publishers {
        println!("\n{}", publisher.heading());
        publisher.publish(&people)?;
    }

    Ok(())
}
