//! The dataset envelope and lookup helpers.

use super::{Character, CharacterFilter, CharacterType};
use crate::error::{GuideError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Provenance information published alongside the characters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetMetadata {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub total_characters: Option<usize>,
    #[serde(default)]
    pub source: Option<String>,
}

/// Top-level payload: `{ characters: [...], metadata?: {...} }`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub characters: Vec<Character>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<DatasetMetadata>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Check unique ids and rarity range.
    pub fn check_invariants(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.characters.len());
        for character in &self.characters {
            if !seen.insert(character.id.as_str()) {
                return Err(GuideError::validation(format!(
                    "duplicate character id: {}",
                    character.id
                )));
            }
            if !(1..=5).contains(&character.rarity) {
                return Err(GuideError::validation(format!(
                    "rarity {} out of range for {}",
                    character.rarity, character.id
                )));
            }
        }
        Ok(())
    }

    pub fn find(&self, id: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    pub fn by_type(&self, character_type: CharacterType) -> Vec<&Character> {
        self.filter(&CharacterFilter::default().with_type(Some(character_type)))
    }

    pub fn by_rarity(&self, rarity: u8) -> Vec<&Character> {
        self.filter(&CharacterFilter::default().with_rarity(Some(rarity)))
    }

    /// Name search; an empty query returns every character.
    pub fn search(&self, query: &str) -> Vec<&Character> {
        self.filter(&CharacterFilter::default().with_search(query))
    }

    /// Characters matching every active criterion, in dataset order.
    pub fn filter(&self, filter: &CharacterFilter) -> Vec<&Character> {
        self.characters.iter().filter(|c| filter.matches(c)).collect()
    }
}
