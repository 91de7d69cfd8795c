//! Pure formatting functions for UI output.
//!
//! Colors come from `console`, which drops them when the stream is not a terminal.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::process::Invocation;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Text of the version change line, without styling.
pub fn version_change_line(old_tag: Option<&str>, new_tag: &str) -> String {
    match old_tag {
        Some(old) => format!("{} -> {}", old, new_tag),
        None => format!("(no previous tag) -> {}", new_tag),
    }
}

/// Display the proposed tag change (or initial tag).
///
/// # Arguments
/// * `old_tag` - Previous tag (None if this is the first release)
/// * `new_tag` - The new tag being released
pub fn display_proposed_tag(old_tag: Option<&str>, new_tag: &str) {
    match old_tag {
        Some(old) => {
            println!("\n{}", style("Proposed Release:").bold());
            println!("  From: {}", style(old).red());
            println!("  To:   {}", style(new_tag).green());
        }
        None => {
            println!("\n{}", style("Initial Release:").bold());
            println!("  New tag: {}", style(new_tag).green());
        }
    }
}

/// Lines describing what a dry run would do, numbered from 1.
pub fn plan_lines(steps: &[String]) -> Vec<String> {
    steps
        .iter()
        .enumerate()
        .map(|(i, step)| format!("  Step {}: {}", i + 1, step))
        .collect()
}

/// Display the steps a dry run skipped.
pub fn display_release_plan(steps: &[String]) {
    display_status("Dry run, nothing will be changed. The release would:");
    for line in plan_lines(steps) {
        println!("{}", style(line).dim());
    }
}

/// Display an external command before it runs.
pub fn display_command(invocation: &Invocation) {
    println!("  {}", style(invocation).cyan());
}
