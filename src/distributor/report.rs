//! Terminal report for a finished distribution

use crate::models::{Chore, Person};

/// Controls what the report shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrintOptions {
    /// Show difficulty and capacity figures alongside rewards
    pub verbose: bool,
}

/// Render the distribution as plain text.
///
/// Pre-assigned chores are listed before distributed ones. Capacity is only
/// shown in verbose mode and only for people who have a limit.
pub fn format_distribution(people: &[Person], opts: PrintOptions) -> String {
    let mut output = String::new();
    output.push_str("\n=== Chore Distribution ===\n\n");

    for person in people {
        output.push_str(&person.name);
        if opts.verbose && person.has_capacity_limit() {
            output.push_str(&format!(" (Effort Capacity: {})", person.capacity));
        }
        output.push_str(":\n");

        output.push_str("  Chores:\n");
        for chore in person.all_chores() {
            push_chore_line(&mut output, chore, opts);
        }

        if opts.verbose {
            output.push_str(&format!("  Total Difficulty: {}", person.total_effort));
            if person.has_capacity_limit() {
                output.push_str(&format!(" / {}", person.capacity));
            }
            output.push('\n');
        }
        output.push_str(&format!("  Total Earned: ${}\n", person.total_reward));
        output.push('\n');
    }

    output
}

fn push_chore_line(output: &mut String, chore: &Chore, opts: PrintOptions) {
    if opts.verbose {
        output.push_str(&format!(
            "    - {} (Difficulty: {}, Earns: ${})\n",
            chore.name, chore.effort, chore.reward
        ));
    } else {
        output.push_str(&format!("    - {} (Earns: ${})\n", chore.name, chore.reward));
    }

    if let Some(description) = chore.description.as_deref().filter(|d| !d.is_empty()) {
        output.push_str(&format!("      {}\n", description));
    }
}
