//! Cache layer for the character dataset.
//!
//! A [`KeyValueStore`] is the raw persistent medium (the browser's local
//! storage on the site; SQLite or memory here). [`CacheStore`] adds the
//! payload/timestamp companion entries, expiry checks and the "errors are
//! absorbed" policy on top of it.

mod memory;
mod sqlite;
mod store;
mod traits;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use store::CacheStore;
pub use traits::{CacheEntry, CacheKey, CacheStatus, KeyValueStore};
