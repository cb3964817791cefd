//! Browsing and selection state of the comparison page.
//!
//! [`SelectionModel`] owns the full character list, the active search and
//! filter criteria, the derived filtered list and an ordered selection of at
//! most [`SelectionConfig::MAX_SELECTED`] characters. None of its operations
//! fail: unknown ids and a full selection are no-ops.
//!
//! Every mutating call notifies subscribed observers with the current
//! selection, whether or not it changed.

use crate::config::SelectionConfig;
use crate::models::{Character, CharacterFilter, CharacterType, Dataset};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Callback invoked with the current selection after each mutation.
pub type SelectionObserver = Box<dyn FnMut(&[Arc<Character>]) + Send>;

/// Handle returned by [`SelectionModel::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// What a call to [`SelectionModel::select`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Appended to the end of the selection.
    Selected,
    /// Was already selected and has been removed.
    Deselected,
    /// Selection is full; nothing changed.
    CapacityReached,
    /// No character with that id; nothing changed.
    UnknownCharacter,
}

pub struct SelectionModel {
    all: Vec<Arc<Character>>,
    filters: CharacterFilter,
    filtered: Vec<Arc<Character>>,
    selected: Vec<Arc<Character>>,
    observers: Vec<(SubscriptionId, SelectionObserver)>,
    next_subscription: u64,
}

impl SelectionModel {
    /// Create a model over `characters` with no filters and nothing selected.
    pub fn new(characters: impl IntoIterator<Item = Character>) -> Self {
        let all: Vec<Arc<Character>> = characters.into_iter().map(Arc::new).collect();
        Self {
            filtered: all.clone(),
            all,
            filters: CharacterFilter::default(),
            selected: Vec::new(),
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Create a model over every character in `dataset`.
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self::new(dataset.characters.iter().cloned())
    }

    /// Swap in a reloaded character list, keeping filters and observers.
    /// Selected ids that no longer exist are dropped; the rest keep their
    /// order and now refer to the new records.
    pub fn set_characters(&mut self, characters: impl IntoIterator<Item = Character>) {
        self.all = characters.into_iter().map(Arc::new).collect();
        let all = &self.all;
        self.selected = self
            .selected
            .iter()
            .filter_map(|old| all.iter().find(|c| c.id == old.id).cloned())
            .collect();
        self.refilter();
    }

    // Observers

    pub fn subscribe(&mut self, observer: impl FnMut(&[Arc<Character>]) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    // Filters

    /// Case-insensitive substring search on `name` or `nameJp`; empty shows all.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.filters.search = text.into();
        self.refilter();
    }

    /// Restrict to one character type; `None` shows all types.
    pub fn set_type_filter(&mut self, character_type: Option<CharacterType>) {
        self.filters.character_type = character_type;
        self.refilter();
    }

    /// Restrict to one rarity; `None` shows all rarities.
    pub fn set_rarity_filter(&mut self, rarity: Option<u8>) {
        self.filters.rarity = rarity;
        self.refilter();
    }

    // Selection

    /// Toggle `id`: deselect when selected, otherwise append if there is room.
    pub fn select(&mut self, id: &str) -> SelectOutcome {
        let outcome = if self.remove_selected(id) {
            SelectOutcome::Deselected
        } else {
            match self.find(id) {
                None => SelectOutcome::UnknownCharacter,
                Some(_) if self.is_full() => {
                    debug!("Maximum number of characters already selected, ignoring {}", id);
                    SelectOutcome::CapacityReached
                }
                Some(character) => {
                    let character = Arc::clone(character);
                    debug!("Added character: {}", character.name);
                    self.selected.push(character);
                    SelectOutcome::Selected
                }
            }
        };
        self.notify();
        outcome
    }

    /// Remove `id` from the selection if present.
    pub fn deselect(&mut self, id: &str) {
        if self.remove_selected(id) {
            debug!("Removed character: {}", id);
        }
        self.notify();
    }

    /// Empty the selection, keeping filters.
    pub fn clear_selection(&mut self) {
        self.selected.clear();
        self.notify();
    }

    /// Clear the selection and every filter.
    pub fn reset(&mut self) {
        self.selected.clear();
        self.filters = CharacterFilter::default();
        self.filtered = self.all.clone();
        self.notify();
    }

    /// Replace the selection with the given characters that exist in the
    /// model, in the given order, truncated to capacity.
    pub fn replace_selection<C: AsRef<Character>>(&mut self, characters: &[C]) {
        let ids: Vec<&str> = characters.iter().map(|c| c.as_ref().id.as_str()).collect();
        self.replace_selection_ids(&ids);
    }

    /// Id-based form of [`Self::replace_selection`]. Unknown and repeated ids
    /// are skipped.
    pub fn replace_selection_ids(&mut self, ids: &[&str]) {
        let mut next: Vec<Arc<Character>> = Vec::with_capacity(SelectionConfig::MAX_SELECTED);
        for id in ids {
            if next.len() == SelectionConfig::MAX_SELECTED {
                break;
            }
            if next.iter().any(|c| c.id == *id) {
                continue;
            }
            if let Some(character) = self.find(id) {
                next.push(Arc::clone(character));
            }
        }
        self.selected = next;
        self.notify();
    }

    // Accessors

    /// Every character, in dataset order.
    pub fn all(&self) -> &[Arc<Character>] {
        &self.all
    }

    /// Characters matching the current filters, in dataset order.
    pub fn filtered(&self) -> &[Arc<Character>] {
        &self.filtered
    }

    /// The selection, in selection order.
    pub fn selected(&self) -> &[Arc<Character>] {
        &self.selected
    }

    /// Get the active filters.
    pub fn filters(&self) -> &CharacterFilter {
        &self.filters
    }

    /// Check if `id` is selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|c| c.id == id)
    }

    /// Check if the selection is at capacity.
    pub fn is_full(&self) -> bool {
        self.selected.len() >= SelectionConfig::MAX_SELECTED
    }

    /// Whether clicking `id` in the list would do anything: selected entries
    /// can always be toggled off, others only while there is room.
    pub fn can_select(&self, id: &str) -> bool {
        self.is_selected(id) || (!self.is_full() && self.find(id).is_some())
    }

    /// Look up a character by id.
    pub fn find(&self, id: &str) -> Option<&Arc<Character>> {
        self.all.iter().find(|c| c.id == id)
    }

    // Internal

    fn remove_selected(&mut self, id: &str) -> bool {
        match self.selected.iter().position(|c| c.id == id) {
            Some(index) => {
                self.selected.remove(index);
                true
            }
            None => false,
        }
    }

    fn refilter(&mut self) {
        self.filtered = self
            .all
            .iter()
            .filter(|c| self.filters.matches(c))
            .cloned()
            .collect();
        self.notify();
    }

    fn notify(&mut self) {
        let selected = &self.selected;
        for (_, observer) in self.observers.iter_mut() {
            observer(selected);
        }
    }
}

impl fmt::Debug for SelectionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionModel")
            .field("all", &self.all.len())
            .field("filters", &self.filters)
            .field("filtered", &self.filtered.len())
            .field(
                "selected",
                &self.selected.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(),
            )
            .field("observers", &self.observers.len())
            .finish()
    }
}
