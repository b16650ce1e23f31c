//! Simple interactive CLI mode
//!
//! Line-based drill without TUI

use crate::core::{Answer, Question};
use crate::output::display::write_session_summary;
use crate::output::formatters::{create_progress_bar, format_tiles, numbered_options};
use crate::session::{Feedback, SessionController, SessionRequest, Step};
use crate::store::WordStore;
use anyhow::Result;
use colored::Colorize;
use rand::Rng;
use std::io::{BufRead, Write};

/// Run a text-mode session over stdin/stdout
///
/// # Errors
///
/// Returns an error on I/O failure or if the word store cannot be read.
pub fn run_simple<S: WordStore, R: Rng>(
    controller: &mut SessionController<S, R>,
    request: &SessionRequest,
) -> Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    drill(controller, request, &mut stdin.lock(), &mut stdout)
}

/// Run a text-mode session over any input and output
///
/// # Errors
///
/// Returns an error on I/O failure or if the word store cannot be read.
pub fn drill<S: WordStore, R: Rng>(
    controller: &mut SessionController<S, R>,
    request: &SessionRequest,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    writeln!(out, "\n╔══════════════════════════════════════════════════════════════╗")?;
    writeln!(out, "║                Vocabulary Drill - Text Mode                  ║")?;
    writeln!(out, "╚══════════════════════════════════════════════════════════════╝\n")?;
    writeln!(out, "Pick a translation by number, or type the word for letter questions.")?;
    writeln!(out, "Commands: 'quit' to end the session\n")?;

    let mut step = match controller.start(request) {
        Ok(step) => step,
        Err(e) if e.is_empty_pool() => {
            writeln!(out, "{} {e}", "✗".red())?;
            writeln!(out, "Import a word set or choose another mode.\n")?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    loop {
        let question = match step {
            Step::Question(question) => question,
            Step::Complete(summary) => {
                writeln!(out, "\n{}", "🎉 All words answered!".bright_green().bold())?;
                write_session_summary(out, &summary)?;
                return Ok(());
            }
        };

        let progress = controller.progress();
        writeln!(out, "────────────────────────────────────────────────────────────")?;
        writeln!(
            out,
            "[{}] {}/{} learned",
            create_progress_bar(progress.answered as f64, progress.total as f64, 20),
            progress.answered,
            progress.total
        )?;
        writeln!(out, "────────────────────────────────────────────────────────────")?;

        let Some(answer) = ask(&question, input, out)? else {
            if let Some(summary) = controller.abandon() {
                writeln!(out, "\nSession ended early.")?;
                write_session_summary(out, &summary)?;
            }
            return Ok(());
        };

        let feedback = controller.submit(&answer)?;
        write_feedback(out, &feedback)?;
        step = feedback.next;
    }
}

/// Ask one question until a usable answer arrives; `None` means quit
fn ask(
    question: &Question,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<Option<Answer>> {
    match question {
        Question::Translate(q) => {
            let transcription = q
                .transcription
                .as_deref()
                .map(|tr| format!(" {tr}"))
                .unwrap_or_default();
            writeln!(
                out,
                "\nTranslate: {}{}",
                q.prompt.bright_yellow().bold(),
                transcription.bright_black()
            )?;
            for line in numbered_options(&q.options) {
                writeln!(out, "  {line}")?;
            }

            loop {
                let Some(reply) = get_user_input(input, out, "Your choice")? else {
                    return Ok(None);
                };
                if let Ok(n) = reply.parse::<usize>()
                    && let Some(option) = n.checked_sub(1).and_then(|i| q.options.get(i))
                {
                    return Ok(Some(Answer::Choice(option.clone())));
                }
                if let Some(option) = q.options.iter().find(|o| **o == reply) {
                    return Ok(Some(Answer::Choice(option.clone())));
                }
                writeln!(out, "❌ Pick a number from 1 to {}", q.options.len())?;
            }
        }
        Question::Construct(q) => {
            writeln!(
                out,
                "\nBuild the word for: {}  ({} letters)",
                q.prompt.bright_yellow().bold(),
                q.letter_count()
            )?;
            writeln!(out, "  {}", format_tiles(&q.letter_pool))?;

            loop {
                let Some(reply) = get_user_input(input, out, "Your word")? else {
                    return Ok(None);
                };
                let letters: Vec<char> = reply.chars().filter(|&c| c != ' ').collect();
                if q.letters_available(&letters) {
                    return Ok(Some(Answer::Letters(letters)));
                }
                writeln!(out, "❌ Use only the letters shown")?;
            }
        }
    }
}

fn write_feedback(out: &mut impl Write, feedback: &Feedback) -> Result<()> {
    if feedback.is_correct {
        writeln!(out, "{}\n", "✓ Correct!".green().bold())?;
    } else {
        writeln!(
            out,
            "{} The answer is {}\n",
            "✗ Wrong.".red().bold(),
            feedback.expected.bright_white().bold()
        )?;
    }
    Ok(())
}

/// Get user input with a prompt; `None` on quit or end of input
fn get_user_input(
    input: &mut impl BufRead,
    out: &mut impl Write,
    prompt: &str,
) -> Result<Option<String>> {
    write!(out, "{prompt}: ")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    let line = line.trim();
    match line.to_lowercase().as_str() {
        "quit" | "q" | "exit" => Ok(None),
        _ => Ok(Some(line.to_string())),
    }
}
