// Terminal UI utilities: header boxes, status lines, progress bars and run summaries

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::template;
use crate::domain::{DeploymentReport, GenerationReport};

pub fn print_header(title: &str) {
    println!();
    println!(
        "{}",
        "╔════════════════════════════════════════════════════════════╗".bright_blue()
    );
    println!("{}", format!("║  {:<58}║", title).bright_blue());
    println!(
        "{}",
        "╚════════════════════════════════════════════════════════════╝".bright_blue()
    );
    println!();
}

pub fn print_success(message: &str) {
    println!("{}", format!("✅ {}", message).bright_green().bold());
}

pub fn print_error(message: &str) {
    eprintln!("{}", format!("❌ {}", message).bright_red().bold());
}

/// Failure line on stdout, for run summaries
fn print_failure(message: &str) {
    println!("{}", format!("❌ {}", message).bright_red().bold());
}

pub fn print_warning(message: &str) {
    println!("{}", format!("⚠️  {}", message).bright_yellow());
}

/// Create a standard progress bar
pub fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    if let Ok(style) =
        ProgressStyle::default_bar().template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}

fn print_rule() {
    println!();
    println!(
        "{}",
        "════════════════════════════════════════════════════════════".bright_blue()
    );
}

pub fn print_generation_summary(report: &GenerationReport) {
    print_rule();

    for outcome in &report.outcomes {
        match (&outcome.status, &outcome.error) {
            (Some(status), _) => {
                println!("   {} {:<30} {}", "•".bright_cyan(), outcome.service, status.label().dimmed());
                if !outcome.unresolved_tokens.is_empty() {
                    println!(
                        "     {} {}",
                        "unresolved:".yellow(),
                        outcome
                            .unresolved_tokens
                            .iter()
                            .map(|t| template::token(t))
                            .collect::<Vec<_>>()
                            .join(", ")
                            .yellow()
                    );
                }
            }
            (None, error) => {
                println!(
                    "   {} {:<30} {}",
                    "•".red(),
                    outcome.service,
                    error.as_deref().unwrap_or("failed").red()
                );
            }
        }
    }

    println!();
    let line = format!(
        "Generated: {}  Skipped: {}  Failed: {}",
        report.success_count(),
        report.skipped_count(),
        report.fail_count()
    );
    if report.is_success() {
        print_success(&line);
    } else {
        print_failure(&line);
    }
    println!();
}

pub fn print_deployment_summary(report: &DeploymentReport) {
    print_rule();

    for outcome in &report.outcomes {
        match &outcome.error {
            None => println!(
                "   {} {:<30} {}",
                "•".bright_cyan(),
                outcome.service,
                format!("{} resource(s) applied", outcome.applied.len()).dimmed()
            ),
            Some(error) => println!(
                "   {} {:<30} {}",
                "•".red(),
                outcome.service,
                format!(
                    "failed at {}: {}",
                    outcome
                        .failed_resource
                        .map(|k| k.name())
                        .unwrap_or("unknown"),
                    error
                )
                .red()
            ),
        }
    }

    println!();
    let line = format!(
        "Deployed: {}  Failed: {}",
        report.success_count(),
        report.fail_count()
    );
    if report.is_success() {
        print_success(&line);
    } else {
        print_failure(&line);
        print_warning("Partially applied services keep their earlier resources; re-run deploy to converge.");
    }
    println!();
}
