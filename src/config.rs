//! Runtime configuration
//!
//! Command-line flags win over environment variables, which win over
//! built-in defaults.

use std::path::PathBuf;

/// Environment variable naming the data directory
pub const HOME_ENV: &str = "VOCAB_DRILL_HOME";
/// Log filter used when neither a flag nor `RUST_LOG` sets one
pub const DEFAULT_LOG_LEVEL: &str = "warn";
/// Log file written inside the data directory while the TUI runs
pub const LOG_FILE: &str = "vocab_drill.log";

const DEFAULT_DIR_NAME: &str = ".vocab_drill";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrillConfig {
    /// Directory holding `words.json` and `loaded_sets.json`
    pub data_dir: PathBuf,
    /// `tracing` filter directive, e.g. "info" or "vocab_drill=debug"
    pub log_level: String,
}

impl DrillConfig {
    /// Resolve configuration from flags and the process environment
    #[must_use]
    pub fn resolve(data_dir: Option<PathBuf>, log_level: Option<String>) -> Self {
        Self::resolve_with(data_dir, log_level, |key| std::env::var(key).ok())
    }

    /// Resolve configuration with a custom environment lookup
    pub fn resolve_with(
        data_dir: Option<PathBuf>,
        log_level: Option<String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let data_dir = data_dir
            .or_else(|| env(HOME_ENV).filter(|v| !v.trim().is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| {
                env("HOME")
                    .map_or_else(|| PathBuf::from("."), PathBuf::from)
                    .join(DEFAULT_DIR_NAME)
            });

        let log_level = log_level
            .or_else(|| env("RUST_LOG").filter(|v| !v.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Self {
            data_dir,
            log_level,
        }
    }

    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }
}
