//! TUI application state and logic

use crate::core::{Answer, Question, fold_letter};
use crate::session::{Feedback, Progress, SessionController, SessionRequest, SessionSummary, Step};
use crate::store::WordStore;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::Rng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;

/// Application state
pub struct App<S: WordStore, R: Rng> {
    pub controller: SessionController<S, R>,
    pub request: SessionRequest,
    pub input_mode: InputMode,
    /// Highlighted option of a translate question
    pub selected: usize,
    /// Indices into the letter pool, in the order they were placed
    pub picked: Vec<usize>,
    /// The question just graded and its feedback
    pub graded: Option<(Question, Feedback)>,
    /// Results of the last finished or abandoned session
    pub results: Option<SessionResults>,
    pub messages: Vec<Message>,
    pub should_quit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Answering,
    Feedback,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionResults {
    pub summary: SessionSummary,
    pub finished: bool,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

impl<S: WordStore, R: Rng> App<S, R> {
    #[must_use]
    pub fn new(controller: SessionController<S, R>, request: SessionRequest) -> Self {
        Self {
            controller,
            request,
            input_mode: InputMode::Results,
            selected: 0,
            picked: Vec::new(),
            graded: None,
            results: None,
            messages: Vec::new(),
            should_quit: false,
        }
    }

    /// Start a session with the app's request
    pub fn start_session(&mut self) {
        self.graded = None;
        self.results = None;
        self.reset_input();

        match self.controller.start(&self.request) {
            Ok(step) => {
                self.add_message(
                    &format!(
                        "Session started: {} words ({}, {})",
                        self.controller.words().len(),
                        self.request.set,
                        self.request.mode
                    ),
                    MessageStyle::Info,
                );
                self.show(step);
            }
            Err(e) => {
                self.input_mode = InputMode::Results;
                self.add_message(&format!("Cannot start: {e}"), MessageStyle::Error);
            }
        }
    }

    fn show(&mut self, step: Step) {
        match step {
            Step::Question(_) => self.input_mode = InputMode::Answering,
            Step::Complete(summary) => {
                self.results = Some(SessionResults {
                    summary,
                    finished: true,
                });
                self.input_mode = InputMode::Results;
                self.add_message("🎉 Session complete!", MessageStyle::Success);
            }
        }
    }

    fn reset_input(&mut self) {
        self.selected = 0;
        self.picked.clear();
    }

    #[must_use]
    pub fn question(&self) -> Option<&Question> {
        self.controller.current_question()
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        self.controller.progress()
    }

    /// Letters placed so far for a construct question
    #[must_use]
    pub fn placed_letters(&self) -> Vec<char> {
        match self.question() {
            Some(Question::Construct(q)) => self
                .picked
                .iter()
                .filter_map(|&i| q.letter_pool.get(i).map(|tile| tile.letter))
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.input_mode {
            InputMode::Answering => self.handle_answer_key(key.code),
            InputMode::Feedback => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => self.continue_session(),
                KeyCode::Esc => self.abandon(),
                _ => {}
            },
            InputMode::Results => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                KeyCode::Char('n') | KeyCode::Enter => self.start_session(),
                _ => {}
            },
        }
    }

    fn handle_answer_key(&mut self, code: KeyCode) {
        if code == KeyCode::Esc {
            self.abandon();
            return;
        }

        match self.question().cloned() {
            Some(Question::Translate(q)) => match code {
                KeyCode::Up => self.selected = self.selected.saturating_sub(1),
                KeyCode::Down => {
                    self.selected = (self.selected + 1).min(q.options.len().saturating_sub(1));
                }
                KeyCode::Char(c) => {
                    if let Some(option) = c
                        .to_digit(10)
                        .and_then(|n| (n as usize).checked_sub(1))
                        .and_then(|i| q.options.get(i))
                    {
                        self.submit(&Answer::Choice(option.clone()));
                    }
                }
                KeyCode::Enter => {
                    if let Some(option) = q.options.get(self.selected) {
                        self.submit(&Answer::Choice(option.clone()));
                    }
                }
                _ => {}
            },
            Some(Question::Construct(q)) => match code {
                KeyCode::Char(' ') => {}
                KeyCode::Char(c) => {
                    if self.picked.len() >= q.letter_count() {
                        return;
                    }
                    let wanted = fold_letter(c);
                    let tile = q.letter_pool.iter().enumerate().position(|(i, tile)| {
                        !self.picked.contains(&i) && tile.letter == wanted
                    });
                    match tile {
                        Some(i) => self.picked.push(i),
                        None => self.add_message(
                            &format!("No '{c}' tile left"),
                            MessageStyle::Error,
                        ),
                    }
                }
                KeyCode::Backspace => {
                    self.picked.pop();
                }
                KeyCode::Enter => {
                    if self.picked.len() < q.letter_count() {
                        self.add_message(
                            &format!("Place all {} letters first", q.letter_count()),
                            MessageStyle::Error,
                        );
                    } else {
                        self.submit(&Answer::Letters(self.placed_letters()));
                    }
                }
                _ => {}
            },
            None => self.input_mode = InputMode::Results,
        }
    }

    fn submit(&mut self, answer: &Answer) {
        let Some(question) = self.question().cloned() else {
            return;
        };

        match self.controller.submit(answer) {
            Ok(feedback) => {
                if feedback.is_correct {
                    self.add_message("✓ Correct!", MessageStyle::Success);
                } else {
                    self.add_message(
                        &format!("✗ Wrong, it is {}", feedback.expected),
                        MessageStyle::Error,
                    );
                }
                self.graded = Some((question, feedback));
                self.input_mode = InputMode::Feedback;
            }
            Err(e) => self.add_message(&e.to_string(), MessageStyle::Error),
        }
        self.reset_input();
    }

    fn continue_session(&mut self) {
        if let Some((_, feedback)) = self.graded.take() {
            self.show(feedback.next);
        }
    }

    fn abandon(&mut self) {
        self.reset_input();
        if let Some((_, feedback)) = self.graded.take()
            && let Step::Complete(_) = feedback.next
        {
            self.show(feedback.next);
            return;
        }
        if let Some(summary) = self.controller.abandon() {
            self.results = Some(SessionResults {
                summary,
                finished: false,
            });
            self.add_message("Session ended early", MessageStyle::Info);
        }
        self.input_mode = InputMode::Results;
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 5 messages
        if self.messages.len() > 5 {
            self.messages.remove(0);
        }
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui<S: WordStore, R: Rng>(app: App<S, R>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: ratatui::backend::Backend, S: WordStore, R: Rng>(
    terminal: &mut Terminal<B>,
    mut app: App<S, R>,
) -> Result<()> {
    app.start_session();

    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            // Only process key press events (fixes Windows double-input bug)
            if key.kind != KeyEventKind::Press {
                continue;
            }
            app.handle_key(key);
        }

        if app.should_quit {
            break;
        }
    }

    app.controller.abandon();
    Ok(())
}
