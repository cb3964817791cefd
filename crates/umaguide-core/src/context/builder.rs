//! Builder for configuring a [`GuideContext`].

use super::GuideContext;
use crate::cache::{KeyValueStore, MemoryStore};
use crate::clock::{Clock, SystemClock};
use crate::config::LoaderConfig;
use crate::error::Result;
use crate::loader::DataLoader;
use crate::network::{source_for_location, DynDatasetSource};
use std::sync::Arc;

/// Builder for [`GuideContext`].
///
/// # Example
///
/// ```rust,ignore
/// use umaguide_core::{GuideContext, LoaderConfig, SqliteStore};
/// use std::sync::Arc;
///
/// let mut guide = GuideContext::builder(LoaderConfig::new("https://example.com/characters.json"))
///     .store(Arc::new(SqliteStore::new("cache.sqlite")?))
///     .build()?;
/// guide.load().await?;
/// ```
pub struct GuideContextBuilder {
    config: LoaderConfig,
    store: Option<Arc<dyn KeyValueStore>>,
    source: Option<DynDatasetSource>,
    clock: Option<Arc<dyn Clock>>,
}

impl GuideContextBuilder {
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            config,
            store: None,
            source: None,
            clock: None,
        }
    }

    /// Persistent medium for the cache.
    ///
    /// Default: an in-memory store (nothing survives the process).
    pub fn store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Where fresh data is fetched from.
    ///
    /// Default: derived from the config's `data_location`.
    pub fn source(mut self, source: DynDatasetSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Build the context. Fails only when no source was given and the
    /// configured location cannot be turned into one.
    pub fn build(self) -> Result<GuideContext> {
        let source = match self.source {
            Some(source) => source,
            None => source_for_location(&self.config.data_location, self.config.request_timeout)?,
        };
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryStore::new()));
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));

        let loader = DataLoader::new(self.config, store, source).with_clock(clock);
        Ok(GuideContext::from_loader(loader))
    }
}
