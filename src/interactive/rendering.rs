//! TUI rendering with ratatui

use super::app::{App, InputMode, MessageStyle};
use crate::core::{ConstructQuestion, Question, TranslateQuestion};
use crate::store::WordStore;
use rand::Rng;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, Paragraph, Wrap},
};

/// Main UI rendering function
pub fn ui<S: WordStore, R: Rng>(f: &mut Frame, app: &App<S, R>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Progress
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_header(f, chunks[0]);
    render_progress(f, app, chunks[1]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[2]);

    match app.input_mode {
        InputMode::Answering => render_question(f, app, main_chunks[0]),
        InputMode::Feedback => render_feedback(f, app, main_chunks[0]),
        InputMode::Results => render_results(f, app, main_chunks[0]),
    }
    render_messages(f, app, main_chunks[1]);

    render_status(f, app, chunks[3]);
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("📚 VOCABULARY DRILL")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(panel("").style(Style::default().fg(Color::Cyan)));
    f.render_widget(header, area);
}

fn render_progress<S: WordStore, R: Rng>(f: &mut Frame, app: &App<S, R>, area: Rect) {
    let progress = app.progress();
    let gauge = Gauge::default()
        .block(panel(" Progress "))
        .gauge_style(Style::default().fg(Color::Green))
        .percent(progress.percent().min(100))
        .label(format!(
            "{}/{} learned | {} remaining",
            progress.answered, progress.total, progress.remaining
        ));
    f.render_widget(gauge, area);
}

fn render_question<S: WordStore, R: Rng>(f: &mut Frame, app: &App<S, R>, area: Rect) {
    match app.question() {
        Some(Question::Translate(q)) => render_translate(f, app, q, area),
        Some(Question::Construct(q)) => render_construct(f, app, q, area),
        None => f.render_widget(Paragraph::new("No question").block(panel(" Question ")), area),
    }
}

fn render_translate<S: WordStore, R: Rng>(
    f: &mut Frame,
    app: &App<S, R>,
    q: &TranslateQuestion,
    area: Rect,
) {
    let mut lines = vec![
        Line::from(vec![
            Span::raw("Translate: "),
            Span::styled(
                q.prompt.clone(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            q.transcription.clone().unwrap_or_default(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    for (i, option) in q.options.iter().enumerate() {
        let style = if i == app.selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(format!(" {}. {option} ", i + 1), style)));
    }

    let paragraph = Paragraph::new(lines)
        .block(panel(" Choose the translation "))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn render_construct<S: WordStore, R: Rng>(
    f: &mut Frame,
    app: &App<S, R>,
    q: &ConstructQuestion,
    area: Rect,
) {
    let tiles: Vec<Span> = q
        .letter_pool
        .iter()
        .enumerate()
        .flat_map(|(i, tile)| {
            let style = if app.picked.contains(&i) {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            };
            [Span::styled(format!("[{tile}]"), style), Span::raw(" ")]
        })
        .collect();

    let lines = vec![
        Line::from(vec![
            Span::raw("Build the word for: "),
            Span::styled(
                q.prompt.clone(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            q.render_progress(&app.placed_letters()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(tiles),
    ];

    let paragraph = Paragraph::new(lines)
        .block(panel(" Build the word "))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn render_feedback<S: WordStore, R: Rng>(f: &mut Frame, app: &App<S, R>, area: Rect) {
    let Some((question, feedback)) = &app.graded else {
        return;
    };

    let (verdict, color) = if feedback.is_correct {
        ("✓ Correct!", Color::Green)
    } else {
        ("✗ Wrong", Color::Red)
    };

    let mut lines = vec![
        Line::from(Span::styled(
            verdict,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("{}  →  {}", question.prompt(), feedback.expected)),
    ];
    if !feedback.is_correct {
        lines.push(Line::from(Span::styled(
            "This word will come back in a few questions.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(panel(" Result ").style(Style::default().fg(color)))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn render_results<S: WordStore, R: Rng>(f: &mut Frame, app: &App<S, R>, area: Rect) {
    let lines = match app.results {
        Some(results) => {
            let title = if results.finished {
                "🎉 Session complete!"
            } else {
                "Session ended early"
            };
            vec![
                Line::from(Span::styled(
                    title,
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    format!("Correct:    {}", results.summary.correct),
                    Style::default().fg(Color::Green),
                )),
                Line::from(Span::styled(
                    format!("Incorrect:  {}", results.summary.incorrect),
                    Style::default().fg(Color::Red),
                )),
                Line::from(format!("Accuracy:   {}%", results.summary.accuracy)),
            ]
        }
        None => vec![Line::from("No session running.")],
    };

    f.render_widget(Paragraph::new(lines).block(panel(" Results ")), area);
}

fn render_messages<S: WordStore, R: Rng>(f: &mut Frame, app: &App<S, R>, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_status<S: WordStore, R: Rng>(f: &mut Frame, app: &App<S, R>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(50),
        ])
        .split(area);

    let stats = app.controller.stats();
    let score = Paragraph::new(Line::from(vec![
        Span::styled(format!("✓ {}", stats.correct), Style::default().fg(Color::Green)),
        Span::raw("  "),
        Span::styled(format!("✗ {}", stats.incorrect), Style::default().fg(Color::Red)),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(score, chunks[0]);

    let mode = Paragraph::new(format!("Mode: {}", app.request.mode)).alignment(Alignment::Center);
    f.render_widget(mode, chunks[1]);

    let help_text = match (app.input_mode.clone(), app.question()) {
        (InputMode::Answering, Some(Question::Translate(_))) => {
            "1-9: Pick | ↑↓ Enter: Select | Esc: End session"
        }
        (InputMode::Answering, _) => "Type letters | Backspace: Undo | Enter: Check | Esc: End",
        (InputMode::Feedback, _) => "Enter: Continue | Esc: End session",
        (InputMode::Results, _) => "n: New session | q: Quit",
    };

    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[2]);
}
