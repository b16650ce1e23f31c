//! Learner statistics
//!
//! Totals for the whole collection and a per-word success report.

use crate::core::WordEntry;

/// Collection totals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overview {
    pub total: usize,
    /// Words answered correctly at least once
    pub learned: usize,
}

#[must_use]
pub fn overview(words: &[WordEntry]) -> Overview {
    Overview {
        total: words.len(),
        learned: words.iter().filter(|w| w.correct > 0).count(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Best known words first
    #[default]
    Descending,
    /// Weakest words first
    Ascending,
}

/// Which words a report covers and how they are ordered
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    pub set: Option<String>,
    /// Case-insensitive substring of the word, translation or transcription
    pub search: Option<String>,
    pub order: SortOrder,
}

impl ReportFilter {
    fn matches(&self, word: &WordEntry, needle: Option<&str>) -> bool {
        if let Some(set) = &self.set
            && word.set_name.as_deref() != Some(set.as_str())
        {
            return false;
        }

        needle.is_none_or(|needle| {
            [Some(word.cs.as_str()), Some(word.ru.as_str()), word.transcription()]
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(needle))
        })
    }
}

/// One line of the word report
#[derive(Debug, Clone, PartialEq)]
pub struct WordRow<'a> {
    pub word: &'a WordEntry,
    /// Success rate, 0.0 for words never answered
    pub rate: f64,
}

impl WordRow<'_> {
    /// Rounded success percentage
    #[must_use]
    pub fn percent(&self) -> u32 {
        (self.rate * 100.0).round() as u32
    }
}

/// Per-word success report
#[must_use]
pub fn word_report<'a>(words: &'a [WordEntry], filter: &ReportFilter) -> Vec<WordRow<'a>> {
    let needle = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut rows: Vec<WordRow<'a>> = words
        .iter()
        .filter(|w| filter.matches(w, needle.as_deref()))
        .map(|word| WordRow {
            word,
            rate: word.success_rate().unwrap_or(0.0),
        })
        .collect();

    match filter.order {
        SortOrder::Descending => rows.sort_by(|a, b| b.rate.total_cmp(&a.rate)),
        SortOrder::Ascending => rows.sort_by(|a, b| a.rate.total_cmp(&b.rate)),
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words() -> Vec<WordEntry> {
        vec![
            WordEntry::new("ahoj", "привет")
                .with_transcription("[ahoj]")
                .in_set("Základy")
                .with_history(1, 1),
            WordEntry::new("pes", "собака").in_set("Zvířata").with_history(3, 0),
            WordEntry::new("kočka", "кошка").in_set("Zvířata"),
            WordEntry::new("děkuji", "спасибо").in_set("Základy").with_history(1, 2),
        ]
    }

    #[test]
    fn overview_counts_learned_words() {
        assert_eq!(
            overview(&words()),
            Overview {
                total: 4,
                learned: 3
            }
        );
        assert_eq!(overview(&[]), Overview { total: 0, learned: 0 });
    }

    #[test]
    fn report_sorts_descending_by_default() {
        let words = words();
        let rows = word_report(&words, &ReportFilter::default());
        let order: Vec<&str> = rows.iter().map(|r| r.word.cs.as_str()).collect();

        assert_eq!(order, vec!["pes", "ahoj", "děkuji", "kočka"]);
        assert_eq!(rows[0].percent(), 100);
        assert_eq!(rows[1].percent(), 50);
        assert_eq!(rows[2].percent(), 33);
        assert_eq!(rows[3].percent(), 0);
    }

    #[test]
    fn report_ascending_puts_weakest_first() {
        let words = words();
        let filter = ReportFilter {
            order: SortOrder::Ascending,
            ..ReportFilter::default()
        };
        let rows = word_report(&words, &filter);

        assert_eq!(rows[0].word.cs, "kočka");
        assert_eq!(rows[3].word.cs, "pes");
    }

    #[test]
    fn report_filters_by_set() {
        let words = words();
        let filter = ReportFilter {
            set: Some("Zvířata".to_string()),
            ..ReportFilter::default()
        };
        let rows = word_report(&words, &filter);

        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.word.set_name.as_deref() == Some("Zvířata")));
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let words = words();
        let search = |needle: &str| {
            let filter = ReportFilter {
                search: Some(needle.to_string()),
                ..ReportFilter::default()
            };
            word_report(&words, &filter)
                .into_iter()
                .map(|r| r.word.cs.clone())
                .collect::<Vec<_>>()
        };

        assert_eq!(search("KOČ"), vec!["kočka".to_string()]);
        assert_eq!(search("Собака"), vec!["pes".to_string()]);
        assert_eq!(search("[ahoj"), vec!["ahoj".to_string()]);
        assert_eq!(search("  ").len(), 4);
        assert!(search("xyz").is_empty());
    }
}
