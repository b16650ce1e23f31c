//! Word selection for practice sessions
//!
//! Turns the learner's word pool into an ordered list of session candidates.

pub mod strategy;

pub use strategy::{
    NewWordsStrategy, ProblematicStrategy, RandomStrategy, SelectionMode, SmartStrategy, Strategy,
};
