//! UmaGuide Core - Headless data core for the Uma Musume character guide.
//!
//! This crate loads the character dataset through a persistent cache with
//! stale fallback, holds the browse/select state of the comparison page and
//! computes side-by-side comparisons. Rendering is left to the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use umaguide_core::{GuideContext, LoaderConfig, SqliteStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> umaguide_core::Result<()> {
//!     let config = LoaderConfig::new("https://example.com/assets/data/characters.json");
//!     let mut guide = GuideContext::builder(config)
//!         .store(Arc::new(SqliteStore::new("cache.sqlite")?))
//!         .build()?;
//!
//!     let outcome = guide.load().await?;
//!     println!("Loaded {} characters", outcome.dataset.len());
//!
//!     if let Some(selection) = guide.selection_mut() {
//!         selection.select("special-week");
//!         selection.select("silence-suzuka");
//!     }
//!     if let Some(result) = guide.compare_selected() {
//!         println!("Best overall: {}", result.overall_best.name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod clock;
pub mod comparison;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod network;
pub mod selection;

mod context;

// Re-export commonly used types
pub use cache::{CacheStatus, CacheStore, KeyValueStore, MemoryStore, SqliteStore};
pub use clock::{Clock, ManualClock, SystemClock};
pub use comparison::{compare, CharacterCard, ComparisonResult, ComparisonTable};
pub use config::{CacheDefaults, LoaderConfig, SelectionConfig};
pub use error::{GuideError, Result};
pub use loader::{DataLoader, DataOrigin, LoadOutcome};
pub use models::{Character, CharacterFilter, CharacterType, Dataset, StatName};
pub use network::{source_for_location, DatasetSource, DynDatasetSource, RetryConfig};
pub use selection::{SelectOutcome, SelectionModel, SubscriptionId};

pub use context::{GuideContext, GuideContextBuilder};
