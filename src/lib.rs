//! Vocabulary Drill
//!
//! A Czech-Russian vocabulary drill engine: adaptive word selection, two
//! question formats and in-session retries of missed words.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use vocab_drill::core::WordEntry;
//! use vocab_drill::session::{SessionController, SessionRequest, Step};
//! use vocab_drill::store::MemoryStore;
//!
//! let store = MemoryStore::new(vec![WordEntry::new("ahoj", "привет")]);
//! let mut session = SessionController::new(store);
//!
//! if let Ok(Step::Question(question)) = session.start(&SessionRequest::default()) {
//!     println!("{}", question.prompt());
//! }
//! ```

// Core domain types
pub mod core;

// Error types
pub mod error;

// Word selection strategies
pub mod selection;

// Session engine
pub mod session;

// Word storage and set management
pub mod store;

// Runtime configuration
pub mod config;

// Tracing setup
pub mod logging;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
