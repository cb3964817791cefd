//! Tabular comparison layout.
//!
//! The table has one column per selected character and a fixed set of rows
//! in three groups: the five base stats, ten aptitudes, and the unique skill
//! followed by one row per awakening slot. Missing data renders as "N/A";
//! the awakening rows are always present.

use crate::models::{AptitudeKey, AwakeningSlot, Character, CharacterType, StatName};
use serde::Serialize;
use std::fmt;

pub const NOT_AVAILABLE: &str = "N/A";

/// One row key of the fixed schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Stat(StatName),
    Aptitude(AptitudeKey),
    UniqueSkill,
    Awakening(AwakeningSlot),
}

impl Attribute {
    /// Stable key, e.g. `speed`, `turf`, `uniqueSkill`, `awakening.rare1`.
    pub fn key(&self) -> String {
        match self {
            Attribute::Stat(s) => s.as_str().to_string(),
            Attribute::Aptitude(a) => a.as_str().to_string(),
            Attribute::UniqueSkill => "uniqueSkill".to_string(),
            Attribute::Awakening(slot) => format!("awakening.{}", slot.as_str()),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Attribute::Stat(s) => s.label().to_string(),
            Attribute::Aptitude(a) => a.label().to_string(),
            Attribute::UniqueSkill => "Unique Skill".to_string(),
            Attribute::Awakening(slot) => format!("awakening {}", slot.as_str()),
        }
    }

    pub fn value(&self, character: &Character) -> CellValue {
        let text = |value: Option<&str>| {
            value.map_or(CellValue::NotAvailable, |v| CellValue::Text(v.to_string()))
        };
        match self {
            Attribute::Stat(s) => CellValue::Number(character.stats.get(*s)),
            Attribute::Aptitude(a) => text(character.aptitude(*a)),
            Attribute::UniqueSkill => text(
                character
                    .unique_skill
                    .as_ref()
                    .map(|s| s.name.as_str())
                    .filter(|n| !n.is_empty()),
            ),
            Attribute::Awakening(slot) => text(character.awakening_skill(*slot)),
        }
    }
}

/// Row groups in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttributeGroupKind {
    #[serde(rename = "Basic Stats")]
    BasicStats,
    #[serde(rename = "Aptitudes")]
    Aptitudes,
    #[serde(rename = "Skills")]
    Skills,
}

impl AttributeGroupKind {
    pub const ALL: [AttributeGroupKind; 3] = [
        AttributeGroupKind::BasicStats,
        AttributeGroupKind::Aptitudes,
        AttributeGroupKind::Skills,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AttributeGroupKind::BasicStats => "Basic Stats",
            AttributeGroupKind::Aptitudes => "Aptitudes",
            AttributeGroupKind::Skills => "Skills",
        }
    }

    pub fn attributes(&self) -> Vec<Attribute> {
        match self {
            AttributeGroupKind::BasicStats => StatName::ALL.into_iter().map(Attribute::Stat).collect(),
            AttributeGroupKind::Aptitudes => {
                AptitudeKey::ALL.into_iter().map(Attribute::Aptitude).collect()
            }
            AttributeGroupKind::Skills => std::iter::once(Attribute::UniqueSkill)
                .chain(AwakeningSlot::ALL.into_iter().map(Attribute::Awakening))
                .collect(),
        }
    }
}

/// A single table cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(i64),
    Text(String),
    #[serde(serialize_with = "serialize_not_available")]
    NotAvailable,
}

fn serialize_not_available<S: serde::Serializer>(serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(NOT_AVAILABLE)
}

impl CellValue {
    pub fn is_available(&self) -> bool {
        !matches!(self, CellValue::NotAvailable)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(t) => write!(f, "{}", t),
            CellValue::NotAvailable => write!(f, "{}", NOT_AVAILABLE),
        }
    }
}

/// Header cell for one selected character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumn {
    pub id: String,
    pub name: String,
    pub name_jp: String,
    pub rarity: u8,
    pub character_type: CharacterType,
    pub type_label: String,
    pub thumbnail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeRow {
    pub key: String,
    pub label: String,
    pub cells: Vec<CellValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeGroup {
    pub kind: AttributeGroupKind,
    pub rows: Vec<AttributeRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonTable {
    pub columns: Vec<TableColumn>,
    pub groups: Vec<AttributeGroup>,
}

impl ComparisonTable {
    /// Lay out the selection. `None` for an empty selection.
    pub fn build<C: AsRef<Character>>(selected: &[C]) -> Option<Self> {
        if selected.is_empty() {
            return None;
        }

        let columns = selected
            .iter()
            .map(|c| {
                let c = c.as_ref();
                TableColumn {
                    id: c.id.clone(),
                    name: c.name.clone(),
                    name_jp: c.name_jp.clone(),
                    rarity: c.rarity,
                    character_type: c.character_type,
                    type_label: c.character_type.label().to_string(),
                    thumbnail: c.thumbnail.clone(),
                }
            })
            .collect();

        let groups = AttributeGroupKind::ALL
            .into_iter()
            .map(|kind| AttributeGroup {
                kind,
                rows: kind
                    .attributes()
                    .into_iter()
                    .map(|attribute| AttributeRow {
                        key: attribute.key(),
                        label: attribute.label(),
                        cells: selected.iter().map(|c| attribute.value(c.as_ref())).collect(),
                    })
                    .collect(),
            })
            .collect();

        Some(Self { columns, groups })
    }

    /// Find a row by its key.
    pub fn row(&self, key: &str) -> Option<&AttributeRow> {
        self.groups
            .iter()
            .flat_map(|g| g.rows.iter())
            .find(|r| r.key == key)
    }

    pub fn row_count(&self) -> usize {
        self.groups.iter().map(|g| g.rows.len()).sum()
    }
}
