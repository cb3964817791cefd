//! Character record types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// One of the five trainable stats, in canonical display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatName {
    Speed,
    Stamina,
    Power,
    Guts,
    Wisdom,
}

impl StatName {
    pub const ALL: [StatName; 5] = [
        StatName::Speed,
        StatName::Stamina,
        StatName::Power,
        StatName::Guts,
        StatName::Wisdom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatName::Speed => "speed",
            StatName::Stamina => "stamina",
            StatName::Power => "power",
            StatName::Guts => "guts",
            StatName::Wisdom => "wisdom",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatName::Speed => "Speed",
            StatName::Stamina => "Stamina",
            StatName::Power => "Power",
            StatName::Guts => "Guts",
            StatName::Wisdom => "Wisdom",
        }
    }
}

impl fmt::Display for StatName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A character's primary stat specialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterType {
    Speed,
    Stamina,
    Power,
    Guts,
    Wisdom,
}

impl CharacterType {
    pub const ALL: [CharacterType; 5] = [
        CharacterType::Speed,
        CharacterType::Stamina,
        CharacterType::Power,
        CharacterType::Guts,
        CharacterType::Wisdom,
    ];

    pub fn as_str(&self) -> &'static str {
        self.stat().as_str()
    }

    pub fn label(&self) -> &'static str {
        self.stat().label()
    }

    /// The stat this type specializes in.
    pub fn stat(&self) -> StatName {
        match self {
            CharacterType::Speed => StatName::Speed,
            CharacterType::Stamina => StatName::Stamina,
            CharacterType::Power => StatName::Power,
            CharacterType::Guts => StatName::Guts,
            CharacterType::Wisdom => StatName::Wisdom,
        }
    }
}

impl FromStr for CharacterType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CharacterType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown character type: {}", s))
    }
}

impl fmt::Display for CharacterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The five base stats. Unknown keys are rejected on decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Stats {
    pub speed: i64,
    pub stamina: i64,
    pub power: i64,
    pub guts: i64,
    pub wisdom: i64,
}

impl Stats {
    pub fn get(&self, stat: StatName) -> i64 {
        match stat {
            StatName::Speed => self.speed,
            StatName::Stamina => self.stamina,
            StatName::Power => self.power,
            StatName::Guts => self.guts,
            StatName::Wisdom => self.wisdom,
        }
    }

    /// Sum of all five stats, saturating at the `i64` bounds.
    pub fn total(&self) -> i64 {
        StatName::ALL
            .iter()
            .fold(0i64, |sum, s| sum.saturating_add(self.get(*s)))
    }

    /// `(stat, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (StatName, i64)> + '_ {
        StatName::ALL.into_iter().map(move |s| (s, self.get(s)))
    }
}

/// Course and running-style dimensions that carry an aptitude grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AptitudeKey {
    Turf,
    Dirt,
    Short,
    Mile,
    Medium,
    Long,
    Front,
    Pace,
    Late,
    End,
}

impl AptitudeKey {
    pub const ALL: [AptitudeKey; 10] = [
        AptitudeKey::Turf,
        AptitudeKey::Dirt,
        AptitudeKey::Short,
        AptitudeKey::Mile,
        AptitudeKey::Medium,
        AptitudeKey::Long,
        AptitudeKey::Front,
        AptitudeKey::Pace,
        AptitudeKey::Late,
        AptitudeKey::End,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AptitudeKey::Turf => "turf",
            AptitudeKey::Dirt => "dirt",
            AptitudeKey::Short => "short",
            AptitudeKey::Mile => "mile",
            AptitudeKey::Medium => "medium",
            AptitudeKey::Long => "long",
            AptitudeKey::Front => "front",
            AptitudeKey::Pace => "pace",
            AptitudeKey::Late => "late",
            AptitudeKey::End => "end",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AptitudeKey::Turf => "Turf",
            AptitudeKey::Dirt => "Dirt",
            AptitudeKey::Short => "Short",
            AptitudeKey::Mile => "Mile",
            AptitudeKey::Medium => "Medium",
            AptitudeKey::Long => "Long",
            AptitudeKey::Front => "Front Runner",
            AptitudeKey::Pace => "Pace Setter",
            AptitudeKey::Late => "Late Charge",
            AptitudeKey::End => "Finisher",
        }
    }
}

/// A character's signature skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniqueSkill {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A skill unlocked through awakening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwakeningSkill {
    pub name: String,
}

/// Awakening slot of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AwakeningSlot {
    Rare1,
    Rare2,
}

impl AwakeningSlot {
    pub const ALL: [AwakeningSlot; 2] = [AwakeningSlot::Rare1, AwakeningSlot::Rare2];

    pub fn as_str(&self) -> &'static str {
        match self {
            AwakeningSlot::Rare1 => "rare1",
            AwakeningSlot::Rare2 => "rare2",
        }
    }
}

/// The two rare awakening slots; either may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AwakeningSkills {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rare1: Option<AwakeningSkill>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rare2: Option<AwakeningSkill>,
}

impl AwakeningSkills {
    pub fn slot(&self, slot: AwakeningSlot) -> Option<&AwakeningSkill> {
        match slot {
            AwakeningSlot::Rare1 => self.rare1.as_ref(),
            AwakeningSlot::Rare2 => self.rare2.as_ref(),
        }
    }
}

/// A learnable skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub skill_type: String,
}

impl Skill {
    /// Short display label for the skill's effect category.
    pub fn type_label(&self) -> &str {
        match self.skill_type.as_str() {
            "speed_boost" => "Speed",
            "stamina_boost" => "Stamina",
            "power_boost" => "Power",
            "acceleration" => "Accel",
            "efficiency" => "Efficiency",
            "all_boost" => "All Stats",
            "random_boost" => "Random",
            "situational" => "Situational",
            other => other,
        }
    }
}

/// A character record. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub name_jp: String,
    pub rarity: u8,
    #[serde(rename = "type")]
    pub character_type: CharacterType,
    pub stats: Stats,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aptitudes: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_skill: Option<UniqueSkill>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub awakening_skills: Option<AwakeningSkills>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub thumbnail: String,
}

impl Character {
    /// Aptitude grade for `key`, if the character has one.
    pub fn aptitude(&self, key: AptitudeKey) -> Option<&str> {
        self.aptitudes
            .as_ref()
            .and_then(|a| a.get(key.as_str()))
            .map(String::as_str)
            .filter(|grade| !grade.is_empty())
    }

    /// Name of the awakening skill in `slot`, if any.
    pub fn awakening_skill(&self, slot: AwakeningSlot) -> Option<&str> {
        self.awakening_skills
            .as_ref()
            .and_then(|a| a.slot(slot))
            .map(|s| s.name.as_str())
            .filter(|name| !name.is_empty())
    }

    pub fn total_stats(&self) -> i64 {
        self.stats.total()
    }

    /// Case-insensitive substring match against `name` or `nameJp`.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_name(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.name_jp.to_lowercase().contains(needle)
    }
}

impl AsRef<Character> for Character {
    fn as_ref(&self) -> &Character {
        self
    }
}
