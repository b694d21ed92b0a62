//! Persistence for per-mode progress, settings and best scores.
//!
//! Records are stored whole, as JSON, under fixed keys of a string key-value
//! backend. The browser build uses `localStorage`; tests and degraded play use
//! an in-process map.

mod backend;
mod error;
mod gateway;
mod records;

pub use backend::LocalStorageBackend;
pub use error::StorageError;
pub use gateway::GameStorage;
pub use records::{HighScore, ModeProgress, Settings};

#[cfg(test)]
pub use backend::{KeyValueBackend, MemoryBackend};
#[cfg(test)]
pub use error::Result;
#[cfg(test)]
pub use records::TimerPreferences;
