//! Answer grading and its side effects
//!
//! A graded answer updates the session word, the session counters and the
//! persisted pool, and moves missed words a few places further down the
//! session.

use super::stats::SessionStats;
use crate::core::{Answer, Question, SessionWord, WordEntry};
use crate::error::DrillError;
use crate::store::WordStore;
use chrono::Utc;
use rand::Rng;
use std::ops::RangeInclusive;

/// How many places further a missed word moves
pub const REQUEUE_OFFSET: RangeInclusive<usize> = 3..=5;

/// Outcome of one evaluated answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub is_correct: bool,
    /// New position of a missed word in the session
    pub requeued_to: Option<usize>,
    /// Whether the updated pool reached the store
    pub persisted: bool,
}

/// Check an answer against a question without side effects
///
/// Translate questions compare the chosen option exactly. Construct questions
/// compare the letters slot by slot, ignoring case.
///
/// # Errors
///
/// Returns `DrillError::AnswerMismatch` when the answer kind does not fit the
/// question.
pub fn grade(question: &Question, answer: &Answer) -> Result<bool, DrillError> {
    match (question, answer) {
        (Question::Translate(q), Answer::Choice(choice)) => Ok(*choice == q.correct_answer),
        (Question::Construct(q), Answer::Letters(letters)) => {
            Ok(q.is_spelled_by(letters))
        }
        (question, _) => Err(DrillError::AnswerMismatch {
            expected: question.variant(),
        }),
    }
}

/// Move the word at `index` `offset` places later, clamped to the end
///
/// Returns the word's new index.
pub fn requeue(words: &mut Vec<SessionWord>, index: usize, offset: usize) -> usize {
    let word = words.remove(index);
    let target = (index + offset).min(words.len());
    words.insert(target, word);
    target
}

/// Applies graded answers to the session and the persisted pool
pub struct AnswerEvaluator<'a, S: WordStore + ?Sized> {
    pool: &'a mut [WordEntry],
    store: &'a S,
}

impl<'a, S: WordStore + ?Sized> AnswerEvaluator<'a, S> {
    pub fn new(pool: &'a mut [WordEntry], store: &'a S) -> Self {
        Self { pool, store }
    }

    /// Grade `answer` for the session word at `index` and apply the results
    ///
    /// Nothing is touched when grading fails. A failed save is logged and
    /// reported through `Evaluation::persisted`; the session carries on.
    ///
    /// # Errors
    ///
    /// Returns `DrillError::AnswerMismatch` when the answer kind does not fit
    /// the question.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds for `words`.
    pub fn evaluate<R: Rng + ?Sized>(
        &mut self,
        words: &mut Vec<SessionWord>,
        index: usize,
        question: &Question,
        answer: &Answer,
        stats: &mut SessionStats,
        rng: &mut R,
    ) -> Result<Evaluation, DrillError> {
        let is_correct = grade(question, answer)?;

        let word = &mut words[index];
        word.attempts += 1;
        word.entry.record(is_correct);
        if is_correct {
            word.answered = true;
        }
        stats.record(is_correct);
        let (cs, ru) = (word.entry.cs.clone(), word.entry.ru.clone());

        let requeued_to = (!is_correct).then(|| {
            let offset = rng.random_range(REQUEUE_OFFSET);
            requeue(words, index, offset)
        });

        let persisted = self.persist(&cs, &ru, is_correct);

        tracing::debug!(word = %cs, is_correct, ?requeued_to, persisted, "answer evaluated");

        Ok(Evaluation {
            is_correct,
            requeued_to,
            persisted,
        })
    }

    fn persist(&mut self, cs: &str, ru: &str, is_correct: bool) -> bool {
        match self.pool.iter_mut().find(|w| w.matches(cs, ru)) {
            Some(entry) => {
                entry.record(is_correct);
                entry.last_review = Some(Utc::now());
            }
            None => tracing::warn!(word = %cs, "answered word is missing from the pool"),
        }

        match self.store.save_words(&*self.pool) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, "failed to save word statistics");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ConstructQuestion, LetterTile, TranslateQuestion, fold_letter};
    use crate::store::MemoryStore;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn translate(prompt: &str, correct: &str) -> Question {
        Question::Translate(TranslateQuestion {
            prompt: prompt.to_string(),
            transcription: None,
            correct_answer: correct.to_string(),
            options: vec![correct.to_string(), "кошка".to_string(), "лес".to_string()],
        })
    }

    fn construct(target: &str) -> Question {
        Question::Construct(ConstructQuestion {
            prompt: "перевод".to_string(),
            target_word: target.to_string(),
            letter_pool: target
                .chars()
                .filter(|&c| c != ' ')
                .map(fold_letter)
                .map(LetterTile::new)
                .collect(),
        })
    }

    fn session(n: usize) -> (Vec<WordEntry>, Vec<SessionWord>) {
        let pool: Vec<WordEntry> = (0..n)
            .map(|i| WordEntry::new(format!("slovo{i}"), format!("слово{i}")))
            .collect();
        let words = pool.iter().map(SessionWord::from).collect();
        (pool, words)
    }

    #[test]
    fn translate_is_exact_match() {
        let q = translate("ahoj", "привет");
        assert!(grade(&q, &Answer::Choice("привет".into())).unwrap());
        assert!(!grade(&q, &Answer::Choice("Привет".into())).unwrap());
    }

    #[test]
    fn construct_ignores_case_and_keeps_spaces() {
        let q = construct("Dobrý den");
        assert!(grade(&q, &Answer::typed("dobrýden")).unwrap());
        assert!(grade(&q, &Answer::typed("DOBRÝ DEN")).unwrap());
        assert!(!grade(&q, &Answer::typed("dobrýde")).unwrap());
        assert!(!grade(&q, &Answer::typed("denobrýd")).unwrap());
    }

    #[test]
    fn construct_accepts_target_regardless_of_case() {
        for target in ["Praha", "pes", "Nový Rok", "ČAJ"] {
            let q = construct(target);
            assert!(grade(&q, &Answer::typed(target)).unwrap());
            assert!(grade(&q, &Answer::typed(&target.to_lowercase())).unwrap());
            assert!(grade(&q, &Answer::typed(&target.to_uppercase())).unwrap());
        }
    }

    #[test]
    fn extra_letters_are_truncated() {
        let q = construct("pes");
        assert!(grade(&q, &Answer::typed("pesxyz")).unwrap());
    }

    #[test]
    fn mismatched_answer_kind_is_rejected() {
        let result = grade(&translate("ahoj", "привет"), &Answer::typed("ahoj"));
        assert!(matches!(result, Err(DrillError::AnswerMismatch { .. })));

        let result = grade(&construct("pes"), &Answer::Choice("pes".into()));
        assert!(matches!(result, Err(DrillError::AnswerMismatch { .. })));
    }

    #[test]
    fn requeue_moves_word_later_and_clamps() {
        let (_, mut words) = session(10);
        let moved = words[2].entry.clone();

        let target = requeue(&mut words, 2, 4);
        assert_eq!(target, 6);
        assert_eq!(words[6].entry, moved);
        assert_eq!(words.len(), 10);

        let moved = words[8].entry.clone();
        let target = requeue(&mut words, 8, 5);
        assert_eq!(target, 9);
        assert_eq!(words[9].entry, moved);
    }

    #[test]
    fn correct_answer_updates_everything() {
        let (mut pool, mut words) = session(3);
        let store = MemoryStore::default();
        let mut stats = SessionStats::default();
        let mut rng = StdRng::seed_from_u64(1);

        let evaluation = AnswerEvaluator::new(&mut pool, &store)
            .evaluate(
                &mut words,
                0,
                &translate("slovo0", "слово0"),
                &Answer::Choice("слово0".into()),
                &mut stats,
                &mut rng,
            )
            .unwrap();

        assert!(evaluation.is_correct);
        assert!(evaluation.persisted);
        assert_eq!(evaluation.requeued_to, None);
        assert!(words[0].answered);
        assert_eq!(words[0].attempts, 1);
        assert_eq!(words[0].entry.correct, 1);
        assert_eq!(stats.correct, 1);
        assert_eq!(pool[0].correct, 1);
        assert!(pool[0].last_review.is_some());
        assert_eq!(store.words(), pool);
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn incorrect_answer_requeues_within_bounds() {
        for seed in 0..50 {
            let (mut pool, mut words) = session(10);
            let store = MemoryStore::default();
            let mut stats = SessionStats::default();
            let mut rng = StdRng::seed_from_u64(seed);
            let index = 1;
            let missed = words[index].entry.cs.clone();

            let evaluation = AnswerEvaluator::new(&mut pool, &store)
                .evaluate(
                    &mut words,
                    index,
                    &translate(&missed, "слово1"),
                    &Answer::Choice("лес".into()),
                    &mut stats,
                    &mut rng,
                )
                .unwrap();

            let j = evaluation.requeued_to.unwrap();
            assert!((index + 3..=index + 5).contains(&j), "moved to {j}");
            assert_eq!(words[j].entry.cs, missed);
            assert!(!words[j].answered);
            assert_eq!(words[j].attempts, 1);
            assert_eq!(words[j].entry.incorrect, 1);
            assert_eq!(stats.incorrect, 1);
            assert_eq!(pool[index].incorrect, 1);
        }
    }

    #[test]
    fn save_failure_is_not_fatal() {
        let (mut pool, mut words) = session(2);
        let store = MemoryStore::default();
        store.set_fail_saves(true);
        let mut stats = SessionStats::default();

        let evaluation = AnswerEvaluator::new(&mut pool, &store)
            .evaluate(
                &mut words,
                0,
                &construct("slovo0"),
                &Answer::typed("slovo0"),
                &mut stats,
                &mut StdRng::seed_from_u64(1),
            )
            .unwrap();

        assert!(evaluation.is_correct);
        assert!(!evaluation.persisted);
        assert_eq!(stats.correct, 1);
        assert_eq!(pool[0].correct, 1);
    }

    #[test]
    fn grading_error_leaves_state_untouched() {
        let (mut pool, mut words) = session(2);
        let store = MemoryStore::default();
        let mut stats = SessionStats::default();
        let before = words.clone();

        let result = AnswerEvaluator::new(&mut pool, &store).evaluate(
            &mut words,
            0,
            &construct("slovo0"),
            &Answer::Choice("slovo0".into()),
            &mut stats,
            &mut StdRng::seed_from_u64(1),
        );

        assert!(result.is_err());
        assert_eq!(words, before);
        assert_eq!(stats, SessionStats::default());
        assert_eq!(store.save_count(), 0);
    }
}
