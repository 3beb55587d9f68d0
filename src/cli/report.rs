//! GitHub Actions workflow commands, step outputs and the console summary

use crate::models::{Report, SectionLabels, SectionStatus};
use crate::Result;
use anyhow::Context;
use colored::Colorize;
use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

const OUTPUT_DELIMITER: &str = "ghadelimiter_pullcheck";

/// Escape a workflow command message
pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escape a workflow command property
pub fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

/// Set a step output, via `$GITHUB_OUTPUT` when the runner provides it
pub fn set_output(name: &str, value: &str) -> Result<()> {
    let path = env::var_os("GITHUB_OUTPUT")
        .filter(|p| !p.is_empty())
        .map(PathBuf::from);
    write_output(path.as_deref(), name, value)
}

/// Append `name=value` to the output file, or fall back to the legacy command
pub fn write_output(path: Option<&Path>, name: &str, value: &str) -> Result<()> {
    let Some(path) = path else {
        println!("::set-output name={}::{}", escape_property(name), escape_data(value));
        return Ok(());
    };

    let entry = if value.contains('\n') {
        format!("{name}<<{OUTPUT_DELIMITER}\n{value}\n{OUTPUT_DELIMITER}\n")
    } else {
        format!("{name}={value}\n")
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open output file {}", path.display()))?;
    file.write_all(entry.as_bytes())
        .with_context(|| format!("Failed to write output file {}", path.display()))?;

    Ok(())
}

/// Mark the step as failed with an error annotation
pub fn set_failed(message: &str) {
    println!("::error::{}", escape_data(message));
}

pub fn start_group(title: &str) {
    println!("::group::{}", escape_data(title));
}

pub fn end_group() {
    println!("::endgroup::");
}

fn describe(status: SectionStatus) -> &'static str {
    match status {
        SectionStatus::Found(true) => "valid",
        SectionStatus::Found(false) => "invalid",
        SectionStatus::NotFound => "not found",
    }
}

/// Print the per-section summary
pub fn print_report(report: &Report, labels: &SectionLabels) {
    println!();
    println!("{}", "📋 Pull request description".cyan().bold());
    for (status, label) in [
        (report.outcome.issue, &labels.issue),
        (report.outcome.content, &labels.content),
    ] {
        println!("   {} {} ({})", status.symbol(), label.bold(), describe(status));
    }
    println!();

    if report.passed {
        println!("{}", "✅ Pull request description is valid".green().bold());
    } else {
        println!("{}", "❌ Pull request description is invalid".red().bold());
        if let Some(message) = &report.message {
            println!("   {}", message.yellow());
        }
    }
}
