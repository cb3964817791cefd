//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use umaguide_core::{DatasetSource, GuideError, Result};

pub const HOUR_MILLIS: i64 = 60 * 60 * 1000;
pub const START_MILLIS: i64 = 1_700_000_000_000;

/// A small dataset in the site's JSON shape.
pub fn dataset_json() -> String {
    serde_json::json!({
        "characters": [
            {
                "id": "special-week", "name": "Special Week", "nameJp": "スペシャルウィーク",
                "rarity": 3, "type": "speed",
                "stats": {"speed": 92, "stamina": 78, "power": 85, "guts": 70, "wisdom": 75},
                "aptitudes": {"turf": "A", "dirt": "G", "mile": "B", "medium": "A", "late": "A"},
                "uniqueSkill": {"name": "Shooting Star", "description": "Burst on the final corner"},
                "awakeningSkills": {"rare1": {"name": "Straightaway Adept"}},
                "skills": [{"name": "Corner Adept", "description": "Faster in corners", "type": "speed_boost"}]
            },
            {
                "id": "silence-suzuka", "name": "Silence Suzuka", "nameJp": "サイレンススズカ",
                "rarity": 3, "type": "speed",
                "stats": {"speed": 98, "stamina": 65, "power": 80, "guts": 70, "wisdom": 72},
                "aptitudes": {"turf": "A", "front": "A"},
                "skills": []
            },
            {
                "id": "gold-ship", "name": "Gold Ship", "nameJp": "ゴールドシップ",
                "rarity": 2, "type": "stamina",
                "stats": {"speed": 75, "stamina": 95, "power": 82, "guts": 85, "wisdom": 60},
                "skills": [{"name": "Rampage", "description": "Unpredictable", "type": "random_boost"}]
            },
            {
                "id": "oguri-cap", "name": "Oguri Cap", "nameJp": "オグリキャップ",
                "rarity": 3, "type": "power",
                "stats": {"speed": 85, "stamina": 80, "power": 95, "guts": 75, "wisdom": 70},
                "skills": []
            },
            {
                "id": "haru-urara", "name": "Haru Urara", "nameJp": "ハルウララ",
                "rarity": 1, "type": "guts",
                "stats": {"speed": 60, "stamina": 55, "power": 58, "guts": 90, "wisdom": 62},
                "skills": []
            }
        ],
        "metadata": {"version": "1.0.0", "lastUpdated": "2024-01-15", "totalCharacters": 5}
    })
    .to_string()
}

/// A source that replays queued responses and counts fetches. An empty
/// queue answers with a connection failure.
#[derive(Default)]
pub struct StubSource {
    responses: Mutex<VecDeque<Result<String>>>,
    calls: AtomicUsize,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serving(body: impl Into<String>) -> Self {
        let source = Self::new();
        source.push_ok(body);
        source
    }

    pub fn push_ok(&self, body: impl Into<String>) {
        self.responses.lock().unwrap().push_back(Ok(body.into()));
    }

    pub fn push_err(&self, err: GuideError) {
        self.responses.lock().unwrap().push_back(Err(err));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DatasetSource for StubSource {
    fn describe(&self) -> String {
        "stub".to_string()
    }

    async fn fetch(&self) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(GuideError::Network {
                    message: "connection refused".to_string(),
                    status: None,
                })
            })
    }
}

pub fn http_error(status: u16) -> GuideError {
    GuideError::Network {
        message: format!("HTTP {}", status),
        status: Some(status),
    }
}
