//! Application-level facade tying the loader, selection and comparison
//! together the way the guide page uses them.
//!
//! A [`GuideContext`] starts empty. [`GuideContext::load`] resolves the
//! dataset and (re)builds the [`SelectionModel`]; the query and comparison
//! helpers work on whatever was loaded last.

mod builder;

pub use builder::GuideContextBuilder;

use crate::cache::CacheStatus;
use crate::comparison::{compare, CharacterCard, ComparisonResult, ComparisonTable};
use crate::config::LoaderConfig;
use crate::error::Result;
use crate::loader::{DataLoader, LoadOutcome};
use crate::models::{Character, CharacterFilter, CharacterType, Dataset};
use crate::selection::SelectionModel;
use tracing::info;

pub struct GuideContext {
    loader: DataLoader,
    loaded: Option<LoadOutcome>,
    selection: Option<SelectionModel>,
}

impl GuideContext {
    /// Start configuring a context.
    pub fn builder(config: LoaderConfig) -> GuideContextBuilder {
        GuideContextBuilder::new(config)
    }

    pub(crate) fn from_loader(loader: DataLoader) -> Self {
        Self {
            loader,
            loaded: None,
            selection: None,
        }
    }

    pub fn loader(&self) -> &DataLoader {
        &self.loader
    }

    /// Load the dataset and refresh the selection model.
    ///
    /// On reload, filters and observers are kept and selected characters
    /// missing from the new dataset are dropped. On failure the previously
    /// loaded data, if any, stays in place.
    pub async fn load(&mut self) -> Result<&LoadOutcome> {
        let outcome = self.loader.load().await?;
        info!(
            "Guide ready with {} characters ({:?})",
            outcome.dataset.len(),
            outcome.origin
        );

        let characters = outcome.dataset.characters.iter().cloned();
        match &mut self.selection {
            Some(selection) => selection.set_characters(characters),
            slot @ None => *slot = Some(SelectionModel::new(characters)),
        }
        Ok(&*self.loaded.insert(outcome))
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    /// The last successful load.
    pub fn last_load(&self) -> Option<&LoadOutcome> {
        self.loaded.as_ref()
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.loaded.as_ref().map(|o| &o.dataset)
    }

    pub fn selection(&self) -> Option<&SelectionModel> {
        self.selection.as_ref()
    }

    pub fn selection_mut(&mut self) -> Option<&mut SelectionModel> {
        self.selection.as_mut()
    }

    // Comparison

    /// Compare the current selection. `None` before loading or when nothing
    /// is selected.
    pub fn compare_selected(&self) -> Option<ComparisonResult> {
        compare(self.selection.as_ref()?.selected())
    }

    pub fn comparison_table(&self) -> Option<ComparisonTable> {
        ComparisonTable::build(self.selection.as_ref()?.selected())
    }

    /// Grid cards for the current selection, in selection order.
    pub fn comparison_cards(&self) -> Vec<CharacterCard> {
        self.selection
            .as_ref()
            .map(|s| {
                s.selected()
                    .iter()
                    .map(|c| CharacterCard::from_character(c))
                    .collect()
            })
            .unwrap_or_default()
    }

    // Queries

    pub fn character_by_id(&self, id: &str) -> Option<&Character> {
        self.dataset()?.find(id)
    }

    pub fn characters_by_type(&self, character_type: CharacterType) -> Vec<&Character> {
        self.dataset()
            .map(|d| d.by_type(character_type))
            .unwrap_or_default()
    }

    pub fn characters_by_rarity(&self, rarity: u8) -> Vec<&Character> {
        self.dataset()
            .map(|d| d.by_rarity(rarity))
            .unwrap_or_default()
    }

    pub fn search_characters(&self, query: &str) -> Vec<&Character> {
        self.dataset().map(|d| d.search(query)).unwrap_or_default()
    }

    pub fn filter_characters(&self, filter: &CharacterFilter) -> Vec<&Character> {
        self.dataset().map(|d| d.filter(filter)).unwrap_or_default()
    }

    // Cache

    /// Drop the cached dataset. Data already loaded stays usable.
    pub fn clear_data_cache(&self) {
        self.loader.clear_cache();
    }

    pub fn cache_status(&self) -> CacheStatus {
        self.loader.cache_status()
    }
}
