//! SQLite persistence: split reader/writer pool and the history store.

pub mod history;
pub mod pool;

pub use history::SqliteHistoryStore;
pub use pool::DatabasePool;
