//! Persisted game statistics.

mod service;
mod store;

pub use service::{CumulativeStatistics, StatisticService, StatisticsObserver};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore, StorageError, StoredValue};
