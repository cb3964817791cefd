//! Search and filter predicates.

use super::{Character, CharacterType};
use serde::{Deserialize, Serialize};

/// Conjunction of the page's search box and the two dropdown filters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterFilter {
    /// Raw search text as typed; matching trims and lowercases it.
    #[serde(default)]
    pub search: String,
    #[serde(default, rename = "type")]
    pub character_type: Option<CharacterType>,
    #[serde(default)]
    pub rarity: Option<u8>,
}

impl CharacterFilter {
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    pub fn with_type(mut self, character_type: Option<CharacterType>) -> Self {
        self.character_type = character_type;
        self
    }

    pub fn with_rarity(mut self, rarity: Option<u8>) -> Self {
        self.rarity = rarity;
        self
    }

    /// True when no criterion is active.
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty() && self.character_type.is_none() && self.rarity.is_none()
    }

    pub fn matches(&self, character: &Character) -> bool {
        let needle = self.search.trim().to_lowercase();
        if !needle.is_empty() && !character.matches_name(&needle) {
            return false;
        }
        if let Some(t) = self.character_type {
            if character.character_type != t {
                return false;
            }
        }
        if let Some(r) = self.rarity {
            if character.rarity != r {
                return false;
            }
        }
        true
    }
}
