//! Per-character card view for the comparison grid.

use super::engine::overall_rating;
use crate::models::{Character, CharacterType, StatName};
use serde::Serialize;

/// One stat line with a bar fill in percent of the nominal maximum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatBar {
    pub stat: StatName,
    pub label: String,
    pub value: i64,
    /// Clamped to `0..=100`.
    pub fill_percent: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillLine {
    pub name: String,
    pub description: String,
    pub skill_type: String,
    pub type_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterCard {
    pub id: String,
    pub name: String,
    pub name_jp: String,
    pub character_type: CharacterType,
    pub rarity: u8,
    /// `★` repeated `rarity` times.
    pub stars: String,
    pub image: String,
    pub total_stats: i64,
    pub overall_rating: i64,
    /// Strongest stat; the first one wins a tie.
    pub highest_stat: StatName,
    /// Weakest stat; the first one wins a tie.
    pub lowest_stat: StatName,
    pub stats: Vec<StatBar>,
    pub skills: Vec<SkillLine>,
}

impl CharacterCard {
    pub fn from_character(character: &Character) -> Self {
        let stats = &character.stats;

        let mut highest_stat = StatName::Speed;
        let mut lowest_stat = StatName::Speed;
        for (stat, value) in stats.iter() {
            if value > stats.get(highest_stat) {
                highest_stat = stat;
            }
            if value < stats.get(lowest_stat) {
                lowest_stat = stat;
            }
        }

        let total_stats = stats.total();
        Self {
            id: character.id.clone(),
            name: character.name.clone(),
            name_jp: character.name_jp.clone(),
            character_type: character.character_type,
            rarity: character.rarity,
            stars: "★".repeat(usize::from(character.rarity)),
            image: character.image.clone(),
            total_stats,
            overall_rating: overall_rating(total_stats),
            highest_stat,
            lowest_stat,
            stats: stats
                .iter()
                .map(|(stat, value)| StatBar {
                    stat,
                    label: stat.label().to_string(),
                    value,
                    fill_percent: value.clamp(0, 100) as u8,
                })
                .collect(),
            skills: character
                .skills
                .iter()
                .map(|skill| SkillLine {
                    name: skill.name.clone(),
                    description: skill.description.clone(),
                    skill_type: skill.skill_type.clone(),
                    type_label: skill.type_label().to_string(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Skill, Stats};

    fn character(stats: Stats) -> Character {
        Character {
            id: "oguri-cap".into(),
            name: "Oguri Cap".into(),
            name_jp: "オグリキャップ".into(),
            rarity: 3,
            character_type: CharacterType::Power,
            stats,
            aptitudes: None,
            unique_skill: None,
            awakening_skills: None,
            skills: vec![Skill {
                name: "Triumphant Pulse".into(),
                description: "Recover stamina".into(),
                skill_type: "stamina_boost".into(),
            }],
            image: String::new(),
            thumbnail: String::new(),
        }
    }

    #[test]
    fn test_card_summary() {
        let card = CharacterCard::from_character(&character(Stats {
            speed: 85,
            stamina: 80,
            power: 95,
            guts: 75,
            wisdom: 70,
        }));

        assert_eq!(card.stars, "★★★");
        assert_eq!(card.total_stats, 405);
        assert_eq!(card.overall_rating, 81);
        assert_eq!(card.highest_stat, StatName::Power);
        assert_eq!(card.lowest_stat, StatName::Wisdom);
        assert_eq!(card.stats.len(), 5);
        assert_eq!(card.stats[2].label, "Power");
        assert_eq!(card.skills[0].type_label, "Stamina");
    }

    #[test]
    fn test_ties_and_bar_clamping() {
        let card = CharacterCard::from_character(&character(Stats {
            speed: 120,
            stamina: 120,
            power: -5,
            guts: 60,
            wisdom: -5,
        }));

        assert_eq!(card.highest_stat, StatName::Speed);
        assert_eq!(card.lowest_stat, StatName::Power);
        assert_eq!(card.stats[0].fill_percent, 100);
        assert_eq!(card.stats[2].fill_percent, 0);
        assert_eq!(card.stats[3].fill_percent, 60);
    }
}
