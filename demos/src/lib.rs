//! Phase Estimation Demo Suite
//!
//! Terminal presentation helpers and the small circuits used by the
//! `demo-qpe` binary:
//!
//! - **Reference circuits**: a hand-written 3-qubit QFT, the phase gate
//!   `P(θ)` and its `|1⟩` eigenstate preparation
//! - **Output**: headers, sections, result lines and a bar chart of the
//!   most common measurement outcomes

pub mod circuits;

use std::fmt::Display;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use qpe_hal::Counts;

pub use circuits::{excited_state, phase_unitary, qft3_reference};

/// Widest bar drawn by [`print_histogram`].
pub const HISTOGRAM_WIDTH: usize = 40;

/// Create a spinner for a step of unknown length.
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Print a demo header.
pub fn print_header(title: &str) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
    println!();
}

/// Print a demo section.
pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(40)).dim());
}

/// Print a result line.
pub fn print_result(label: &str, value: impl Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("ℹ").blue(), message);
}

/// Bar chart rows for the `top` most common outcomes.
///
/// Each row is `bitstring │ bar count`, bars scaled so the most common
/// outcome spans `width` cells.
pub fn histogram_rows(counts: &Counts, top: usize, width: usize) -> Vec<String> {
    let rows = counts.most_common();
    let Some(&(_, max)) = rows.first() else {
        return vec![];
    };
    rows.into_iter()
        .take(top)
        .map(|(bitstring, count)| {
            let len = bar_len(count, max, width);
            format!("{bitstring} │ {:<width$} {count}", "█".repeat(len))
        })
        .collect()
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn bar_len(count: u64, max: u64, width: usize) -> usize {
    if max == 0 {
        return 0;
    }
    ((count as f64 / max as f64) * width as f64).round() as usize
}

/// Print the `top` most common outcomes as a bar chart.
pub fn print_histogram(counts: &Counts, top: usize) {
    for row in histogram_rows(counts, top, HISTOGRAM_WIDTH) {
        println!("  {}", style(row).yellow());
    }
    let shown: usize = counts.len().min(top);
    if counts.len() > shown {
        println!(
            "  {}",
            style(format!("… {} more outcomes", counts.len() - shown)).dim()
        );
    }
}
