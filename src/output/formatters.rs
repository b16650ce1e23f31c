//! Formatting utilities for terminal output

use crate::core::LetterTile;
use colored::{ColoredString, Colorize};

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64).round().max(0.0) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Letter tiles as a row of bracketed letters
#[must_use]
pub fn format_tiles(tiles: &[LetterTile]) -> String {
    tiles
        .iter()
        .map(|tile| format!("[{tile}]"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Numbered answer options, starting at 1
#[must_use]
pub fn numbered_options(options: &[String]) -> Vec<String> {
    options
        .iter()
        .enumerate()
        .map(|(i, option)| format!("{}. {option}", i + 1))
        .collect()
}

/// Percentage colored by how good it is
#[must_use]
pub fn colored_percent(percent: u32) -> ColoredString {
    let text = format!("{percent}%");
    match percent {
        80.. => text.green().bold(),
        50..80 => text.yellow().bold(),
        _ => text.red().bold(),
    }
}
