//! Display functions for command results

use super::formatters::{colored_percent, create_progress_bar};
use crate::commands::stats::{Overview, WordRow};
use crate::session::SessionSummary;
use crate::store::library::{ImportReport, ReloadReport, SetSummary};
use colored::Colorize;
use std::io::{self, Write};

fn banner(title: &str) -> String {
    let rule = "═".repeat(60).cyan();
    format!("\n{rule}\n {} \n{rule}", title.bright_cyan().bold())
}

/// Write the results of a finished or abandoned session
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_session_summary(out: &mut impl Write, summary: &SessionSummary) -> io::Result<()> {
    writeln!(out, "{}", banner("SESSION RESULTS"))?;
    writeln!(
        out,
        "\n   Correct:    {}",
        summary.correct.to_string().green().bold()
    )?;
    writeln!(
        out,
        "   Incorrect:  {}",
        summary.incorrect.to_string().red().bold()
    )?;
    writeln!(out, "   Accuracy:   {}", colored_percent(summary.accuracy))?;
    writeln!(out)
}

pub fn print_import_report(set: &str, report: &ImportReport) {
    if report.added == 0 {
        println!(
            "{} Set '{}' imported; every word was already in the collection",
            "✓".green(),
            set.bright_white().bold()
        );
    } else {
        println!(
            "{} Imported {} words into '{}'",
            "✓".green(),
            report.added.to_string().bright_yellow().bold(),
            set.bright_white().bold()
        );
    }
}

pub fn print_reload_report(set: &str, report: &ReloadReport) {
    println!("{} Reloaded '{}'", "✓".green(), set.bright_white().bold());
    println!("   Added:    {}", report.added.to_string().green());
    println!("   Kept:     {}", report.kept);
    println!("   Removed:  {}", report.removed.to_string().red());
}

pub fn print_delete_report(set: &str, removed: usize) {
    println!(
        "{} Deleted '{}' ({removed} words)",
        "✓".green(),
        set.bright_white().bold()
    );
}

pub fn print_word_deleted(cs: &str, ru: &str, removed: bool) {
    if removed {
        println!(
            "{} Deleted '{} - {ru}'",
            "✓".green(),
            cs.bright_white().bold()
        );
    } else {
        println!("{} No word '{cs} - {ru}' in the collection", "✗".red());
    }
}

pub fn print_set_summaries(sets: &[SetSummary]) {
    println!("{}", banner("WORD SETS"));

    if sets.is_empty() {
        println!("\n   No sets imported yet. Use 'import <FILE>' to add one.");
        return;
    }

    println!();
    for set in sets {
        let bar = create_progress_bar(set.learned as f64, set.words as f64, 20);
        println!(
            "   {:<24} [{}] {}/{}",
            set.name.bright_white().bold(),
            bar.green(),
            set.learned,
            set.words
        );
    }
}

pub fn print_overview(overview: &Overview) {
    println!("{}", banner("STATISTICS"));
    println!("\n   Total words:    {}", overview.total.to_string().bold());
    println!(
        "   Learned words:  {}",
        overview.learned.to_string().green().bold()
    );
}

pub fn print_word_report(rows: &[WordRow<'_>]) {
    if rows.is_empty() {
        println!("\n   No words match.");
        return;
    }

    println!();
    for row in rows {
        let word = row.word;
        let transcription = word
            .transcription()
            .map(|tr| format!(" {tr}"))
            .unwrap_or_default();
        println!(
            "   {:>5}  {}{} - {}  {}",
            colored_percent(row.percent()),
            word.cs.bright_white().bold(),
            transcription.bright_black(),
            word.ru,
            format!("(+{} / -{})", word.correct, word.incorrect).bright_black()
        );
    }
}

pub fn print_reset(count: usize) {
    println!("{} Cleared statistics for {count} words", "✓".green());
}

pub fn print_export(path: &std::path::Path, count: usize) {
    println!(
        "{} Exported {count} words to {}",
        "✓".green(),
        path.display().to_string().bright_white()
    );
}
