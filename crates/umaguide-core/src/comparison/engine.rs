//! Aggregate comparison of a selection.

use crate::config::RatingConfig;
use crate::models::{Character, StatName, Stats};
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-character aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterSummary {
    pub id: String,
    pub name: String,
    pub stats: Stats,
    pub total_stats: i64,
    /// `round(totalStats / 500 * 100)`.
    pub overall_rating: i64,
}

impl CharacterSummary {
    pub fn from_character(character: &Character) -> Self {
        let total_stats = character.stats.total();
        Self {
            id: character.id.clone(),
            name: character.name.clone(),
            stats: character.stats,
            total_stats,
            overall_rating: overall_rating(total_stats),
        }
    }
}

/// One character's value for one stat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatEntry {
    pub id: String,
    pub name: String,
    pub value: i64,
}

/// Comparison of one stat across the selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatComparison {
    pub highest: StatEntry,
    pub lowest: StatEntry,
    pub average: i64,
    /// Descending by value; ties keep selection order.
    pub rankings: Vec<StatEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub characters: Vec<CharacterSummary>,
    pub stat_comparison: BTreeMap<StatName, StatComparison>,
    pub overall_best: CharacterSummary,
}

impl ComparisonResult {
    pub fn stat(&self, stat: StatName) -> &StatComparison {
        // Every stat is populated by `compare`.
        &self.stat_comparison[&stat]
    }
}

/// Compare the selected characters. `None` for an empty selection.
pub fn compare<C: AsRef<Character>>(selected: &[C]) -> Option<ComparisonResult> {
    if selected.is_empty() {
        return None;
    }

    let characters: Vec<CharacterSummary> = selected
        .iter()
        .map(|c| CharacterSummary::from_character(c.as_ref()))
        .collect();

    let stat_comparison = StatName::ALL
        .into_iter()
        .map(|stat| (stat, compare_stat(&characters, stat)))
        .collect();

    let mut best = &characters[0];
    for candidate in &characters[1..] {
        if candidate.total_stats > best.total_stats {
            best = candidate;
        }
    }
    let overall_best = best.clone();

    Some(ComparisonResult {
        characters,
        stat_comparison,
        overall_best,
    })
}

fn compare_stat(characters: &[CharacterSummary], stat: StatName) -> StatComparison {
    let mut rankings: Vec<StatEntry> = characters
        .iter()
        .map(|c| StatEntry {
            id: c.id.clone(),
            name: c.name.clone(),
            value: c.stats.get(stat),
        })
        .collect();
    // Stable: equal values stay in selection order.
    rankings.sort_by(|a, b| b.value.cmp(&a.value));

    let sum: i128 = rankings.iter().map(|e| i128::from(e.value)).sum();
    StatComparison {
        highest: rankings[0].clone(),
        lowest: rankings[rankings.len() - 1].clone(),
        average: round_half_up(sum, rankings.len() as i128),
        rankings,
    }
}

/// Overall rating in percent of the nominal maximum.
pub fn overall_rating(total_stats: i64) -> i64 {
    round_half_up(
        i128::from(total_stats) * 100,
        i128::from(RatingConfig::MAX_TOTAL_STATS),
    )
}

/// `floor(numerator / denominator + 0.5)` in integer arithmetic, clamped to
/// the `i64` range.
///
/// `denominator` must be positive.
pub fn round_half_up(numerator: i128, denominator: i128) -> i64 {
    let rounded = (2 * numerator + denominator).div_euclid(2 * denominator);
    i64::try_from(rounded).unwrap_or(if rounded < 0 { i64::MIN } else { i64::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CharacterType;

    fn character(id: &str, [speed, stamina, power, guts, wisdom]: [i64; 5]) -> Character {
        Character {
            id: id.to_string(),
            name: id.to_uppercase(),
            name_jp: String::new(),
            rarity: 3,
            character_type: CharacterType::Speed,
            stats: Stats {
                speed,
                stamina,
                power,
                guts,
                wisdom,
            },
            aptitudes: None,
            unique_skill: None,
            awakening_skills: None,
            skills: Vec::new(),
            image: String::new(),
            thumbnail: String::new(),
        }
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(5, 2), 3);
        assert_eq!(round_half_up(7, 3), 2);
        assert_eq!(round_half_up(8, 3), 3);
        assert_eq!(round_half_up(-5, 2), -2);
        assert_eq!(round_half_up(0, 4), 0);
    }

    #[test]
    fn test_huge_stats_do_not_overflow() {
        let a = character("a", [100_000_000_000_000_000, 50, 50, 50, 50]);
        let b = character("b", [i64::MAX, i64::MAX, 0, 0, 0]);
        let c = character("c", [i64::MAX, i64::MIN, i64::MIN, 0, 0]);
        let result = compare(&[a, b, c]).unwrap();

        assert_eq!(result.characters[0].overall_rating, 20_000_000_000_000_040);
        assert_eq!(result.characters[1].total_stats, i64::MAX);
        assert_eq!(result.characters[1].overall_rating, 1_844_674_407_370_955_161);
        assert_eq!(result.characters[2].total_stats, i64::MIN);
        assert_eq!(result.overall_best.id, "b");

        let speed = result.stat(StatName::Speed);
        assert_eq!(speed.highest.id, "b");
        assert_eq!(speed.lowest.id, "a");
        assert!(speed.average > 0);
        assert_eq!(overall_rating(i64::MIN), -1_844_674_407_370_955_162);
        assert_eq!(round_half_up(i128::from(i64::MAX) * 4, 1), i64::MAX);
        assert_eq!(round_half_up(i128::from(i64::MIN) * 4, 1), i64::MIN);
    }

    #[test]
    fn test_empty_selection() {
        assert!(compare::<Character>(&[]).is_none());
    }

    #[test]
    fn test_single_character() {
        let a = character("a", [90, 80, 70, 60, 50]);
        let result = compare(&[a]).unwrap();

        assert_eq!(result.overall_best.id, "a");
        assert_eq!(result.overall_best.total_stats, 350);
        assert_eq!(result.overall_best.overall_rating, 70);
        for stat in StatName::ALL {
            let cmp = result.stat(stat);
            assert_eq!(cmp.highest, cmp.lowest);
            assert_eq!(cmp.highest.id, "a");
            assert_eq!(cmp.average, cmp.highest.value);
        }
    }

    #[test]
    fn test_best_and_average() {
        let a = character("a", [60, 60, 60, 60, 60]); // 300
        let b = character("b", [91, 90, 90, 90, 89]); // 450
        let c = character("c", [100, 100, 100, 100, 100]); // 500
        let result = compare(&[a, b, c]).unwrap();

        assert_eq!(result.overall_best.id, "c");
        // (60 + 91 + 100) / 3 = 83.67
        assert_eq!(result.stat(StatName::Speed).average, 84);
        assert_eq!(result.stat(StatName::Wisdom).lowest.id, "a");
        assert_eq!(
            result.characters.iter().map(|c| c.overall_rating).collect::<Vec<_>>(),
            [60, 90, 100]
        );
    }

    #[test]
    fn test_ties_keep_selection_order() {
        let a = character("a", [80, 50, 50, 50, 50]);
        let b = character("b", [90, 50, 50, 50, 50]);
        let c = character("c", [80, 50, 50, 50, 50]);
        let result = compare(&[a, b, c]).unwrap();

        let speed = result.stat(StatName::Speed);
        let order: Vec<&str> = speed.rankings.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(order, ["b", "a", "c"]);
        assert_eq!(speed.lowest.id, "c");

        let stamina = result.stat(StatName::Stamina);
        assert_eq!(stamina.highest.id, "a");
        assert_eq!(stamina.lowest.id, "c");
    }

    #[test]
    fn test_overall_best_first_occurrence_wins() {
        let a = character("a", [70, 70, 70, 70, 70]);
        let b = character("b", [100, 50, 70, 70, 60]);
        let result = compare(&[a, b]).unwrap();
        assert_eq!(result.overall_best.id, "a");
    }

    #[test]
    fn test_result_is_deterministic_and_serializes_camel_case() {
        let chars = vec![
            character("a", [70, 71, 72, 73, 74]),
            character("b", [74, 73, 72, 71, 70]),
        ];
        let first = compare(&chars).unwrap();
        let second = compare(&chars).unwrap();
        assert_eq!(first, second);

        let json = serde_json::to_value(&first).unwrap();
        assert!(json["statComparison"]["speed"]["rankings"].is_array());
        assert_eq!(json["overallBest"]["totalStats"], 360);
        assert_eq!(
            serde_json::to_string(&first.stat(StatName::Guts).rankings).unwrap(),
            serde_json::to_string(&second.stat(StatName::Guts).rankings).unwrap()
        );
    }
}
