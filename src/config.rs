//! Runtime configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app::DEFAULT_FEEDBACK_DELAY;
use crate::progress::DEFAULT_QUESTIONS_AMOUNT;

const APP_DIR: &str = "movie-quiz";
const STATS_FILE: &str = "statistics.json";
const LOG_FILE: &str = "movie-quiz.log";

/// Where questions come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionSource {
    /// The catalogue compiled into the binary.
    BundledMovies,
    /// A movie catalogue JSON file.
    Movies(PathBuf),
    /// A fixed list of questions, served in order.
    Questions(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub source: QuestionSource,
    pub stats_path: PathBuf,
    pub questions_amount: usize,
    pub feedback_delay: Duration,
    pub log_file: PathBuf,
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` takes precedence.
    pub log_filter: String,
}

impl Config {
    /// `<data dir>/movie-quiz/statistics.json`, or the working directory when
    /// the platform has no data directory.
    pub fn default_stats_path() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .unwrap_or_default()
            .join(STATS_FILE)
    }

    /// Log file placed next to the statistics file.
    pub fn log_file_beside(stats_path: &Path) -> PathBuf {
        stats_path
            .parent()
            .map(|dir| dir.join(LOG_FILE))
            .unwrap_or_else(|| PathBuf::from(LOG_FILE))
    }
}

impl Default for Config {
    fn default() -> Self {
        let stats_path = Self::default_stats_path();
        Self {
            source: QuestionSource::BundledMovies,
            log_file: Self::log_file_beside(&stats_path),
            stats_path,
            questions_amount: DEFAULT_QUESTIONS_AMOUNT,
            feedback_delay: DEFAULT_FEEDBACK_DELAY,
            log_filter: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.source, QuestionSource::BundledMovies);
        assert_eq!(config.questions_amount, 10);
        assert_eq!(config.feedback_delay, Duration::from_secs(1));
        assert!(config.stats_path.ends_with("statistics.json"));
        assert_eq!(config.log_file.parent(), config.stats_path.parent());
    }

    #[test]
    fn test_log_file_beside_bare_file_name() {
        assert_eq!(
            Config::log_file_beside(Path::new("stats.json")),
            PathBuf::from("movie-quiz.log")
        );
        assert_eq!(
            Config::log_file_beside(Path::new("/tmp/quiz/stats.json")),
            PathBuf::from("/tmp/quiz/movie-quiz.log")
        );
    }
}
