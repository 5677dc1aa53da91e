use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::store::{KeyValueStore, StorageError, StoredValue};
use crate::models::GameResult;

/// Keys owned by the statistics service.
#[derive(Debug, Clone, Copy)]
enum StatisticKey {
    BestGameCorrect,
    BestGameTotal,
    BestGameDate,
    GamesCount,
    TotalCorrectAnswers,
    TotalAnswers,
    TotalAccuracy,
}

impl StatisticKey {
    fn as_str(self) -> &'static str {
        match self {
            StatisticKey::BestGameCorrect => "bestGameCorrect",
            StatisticKey::BestGameTotal => "bestGameTotal",
            StatisticKey::BestGameDate => "bestGameDate",
            StatisticKey::GamesCount => "gamesCount",
            StatisticKey::TotalCorrectAnswers => "totalCorrectAnswers",
            StatisticKey::TotalAnswers => "totalAnswers",
            StatisticKey::TotalAccuracy => "totalAccuracy",
        }
    }
}

/// Notified after [`StatisticService::store`] has finished writing.
pub trait StatisticsObserver: Send {
    fn did_receive_stored_data(&self);
}

/// Snapshot of everything the service tracks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CumulativeStatistics {
    pub games_count: usize,
    pub best_game: GameResult,
    pub total_correct_answers: usize,
    pub total_answers: usize,
    pub total_accuracy: f64,
}

/// Records finished rounds and derives cumulative statistics.
///
/// Nothing is cached: every accessor reads the store. When the store cannot
/// be reached the accessors fall back to zero values.
pub struct StatisticService<S> {
    storage: S,
    observer: Option<Box<dyn StatisticsObserver>>,
}

impl<S: KeyValueStore> StatisticService<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            observer: None,
        }
    }

    pub fn set_observer(&mut self, observer: Option<Box<dyn StatisticsObserver>>) {
        self.observer = observer;
    }

    pub fn games_count(&self) -> usize {
        self.read_count(StatisticKey::GamesCount)
    }

    pub fn best_game(&self) -> GameResult {
        match self.try_best_game() {
            Ok(best) => best,
            Err(e) => {
                warn!(error = %e, "best game unavailable, using default");
                GameResult::default()
            }
        }
    }

    /// Percentage of correct answers over every round played.
    pub fn total_accuracy(&self) -> f64 {
        let games = self.games_count();
        let answers = self.read_count(StatisticKey::TotalAnswers);
        if games == 0 || answers == 0 {
            return 0.0;
        }

        let correct = self.read_count(StatisticKey::TotalCorrectAnswers);
        correct as f64 / answers as f64 * 100.0
    }

    pub fn statistics(&self) -> CumulativeStatistics {
        CumulativeStatistics {
            games_count: self.games_count(),
            best_game: self.best_game(),
            total_correct_answers: self.read_count(StatisticKey::TotalCorrectAnswers),
            total_answers: self.read_count(StatisticKey::TotalAnswers),
            total_accuracy: self.total_accuracy(),
        }
    }

    /// Record a finished round stamped with the current time.
    pub fn store(&mut self, correct: usize, total: usize) {
        self.store_result(GameResult::new(correct, total, Utc::now()));
    }

    /// Record a finished round, then notify the observer.
    ///
    /// A read or write failure is logged and leaves the stored statistics
    /// as they were; the observer is notified either way.
    pub fn store_result(&mut self, result: GameResult) {
        if let Err(e) = self.try_store(&result) {
            warn!(error = %e, correct = result.correct, total = result.total, "failed to store game result");
        } else {
            info!(correct = result.correct, total = result.total, "game result stored");
        }

        if let Some(observer) = &self.observer {
            observer.did_receive_stored_data();
        }
    }

    /// All reads happen before the single batched write; any read error
    /// aborts the store with nothing written.
    fn try_store(&mut self, result: &GameResult) -> Result<(), StorageError> {
        let games_count = self.try_read_count(StatisticKey::GamesCount)? + 1;
        let total_correct = self.try_read_count(StatisticKey::TotalCorrectAnswers)? + result.correct;
        let total_answers = self.try_read_count(StatisticKey::TotalAnswers)? + result.total;
        let best = self.try_best_game()?;

        let accuracy = if total_answers == 0 {
            0.0
        } else {
            total_correct as f64 / total_answers as f64 * 100.0
        };

        let mut entries = vec![
            (StatisticKey::GamesCount, count_value(games_count)),
            (StatisticKey::TotalCorrectAnswers, count_value(total_correct)),
            (StatisticKey::TotalAnswers, count_value(total_answers)),
            (StatisticKey::TotalAccuracy, StoredValue::Float(accuracy)),
        ];
        if result.is_better_than(&best) {
            entries.push((StatisticKey::BestGameCorrect, count_value(result.correct)));
            entries.push((StatisticKey::BestGameTotal, count_value(result.total)));
            entries.push((StatisticKey::BestGameDate, StoredValue::Date(result.date)));
        }

        let entries: Vec<(&str, StoredValue)> = entries
            .into_iter()
            .map(|(key, value)| (key.as_str(), value))
            .collect();
        self.storage.set_all(&entries)
    }

    fn try_best_game(&self) -> Result<GameResult, StorageError> {
        let correct = self.try_read_count(StatisticKey::BestGameCorrect)?;
        let total = self.try_read_count(StatisticKey::BestGameTotal)?;
        let date = self
            .storage
            .get(StatisticKey::BestGameDate.as_str())?
            .and_then(|value| value.as_date())
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

        Ok(GameResult::new(correct, total, date))
    }

    fn read_count(&self, key: StatisticKey) -> usize {
        self.try_read_count(key).unwrap_or_else(|e| {
            warn!(key = key.as_str(), error = %e, "statistic unavailable, using 0");
            0
        })
    }

    fn try_read_count(&self, key: StatisticKey) -> Result<usize, StorageError> {
        let value = self
            .storage
            .get(key.as_str())?
            .and_then(|value| value.as_integer())
            .unwrap_or(0);
        Ok(usize::try_from(value).unwrap_or(0))
    }
}

fn count_value(value: usize) -> StoredValue {
    StoredValue::Integer(i64::try_from(value).unwrap_or(i64::MAX))
}
