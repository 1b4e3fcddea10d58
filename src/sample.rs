//! The fixed hand-written land set served by the `sample` variant.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldChunk {
    pub x: i32,
    pub z: i32,
    pub world: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Land {
    pub id: String,
    pub name: String,
    pub description: String,
    pub contact: String,
    /// ARGB, `#AARRGGBB`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub chunks: Vec<WorldChunk>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandsData {
    pub lands: Vec<Land>,
    pub last_updated: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandsResponse {
    pub success: bool,
    pub data: LandsData,
    pub timestamp: i64,
}

#[derive(Debug, Clone)]
pub struct SampleLands {
    lands: Vec<Land>,
}

impl SampleLands {
    pub fn new() -> Self {
        let lands = vec![
            land(
                "land_001",
                "Spawn Town",
                "The main spawn area for all new players",
                "admin@example.com",
                Some("#8000FF00"),
                "world",
                &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 0), (2, 1)],
                (2024, 1, 1),
            ),
            land(
                "land_002",
                "Player Base - Alice",
                "Alice's awesome castle with automatic farms",
                "alice@example.com",
                Some("#800000FF"),
                "world",
                &[(10, 10), (11, 10), (10, 11), (11, 11)],
                (2024, 1, 15),
            ),
            land(
                "land_003",
                "Shopping District",
                "Community shopping area - all are welcome!",
                "community@example.com",
                Some("#80FFA500"),
                "world",
                &[(-5, -5), (-4, -5), (-3, -5), (-5, -4), (-4, -4), (-3, -4)],
                (2024, 1, 20),
            ),
            land(
                "land_004",
                "Nether Hub",
                "Fast travel network hub",
                "admin@example.com",
                None,
                "world_nether",
                &[(0, 0), (1, 0), (0, 1), (1, 1)],
                (2024, 1, 25),
            ),
        ];
        Self { lands }
    }

    pub fn lands(&self) -> &[Land] {
        &self.lands
    }

    /// The payload for one request, with every volatile timestamp set to `now_ms`.
    pub fn response(&self, now_ms: i64) -> LandsResponse {
        let lands = self
            .lands
            .iter()
            .cloned()
            .map(|land| Land {
                updated_at: now_ms,
                ..land
            })
            .collect();

        LandsResponse {
            success: true,
            data: LandsData {
                lands,
                last_updated: now_ms,
            },
            timestamp: now_ms,
        }
    }
}

impl Default for SampleLands {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(clippy::too_many_arguments)]
fn land(
    id: &str,
    name: &str,
    description: &str,
    contact: &str,
    color: Option<&str>,
    world: &str,
    chunks: &[(i32, i32)],
    created: (i32, u32, u32),
) -> Land {
    let created_at = midnight_utc_ms(created);
    Land {
        id: id.to_owned(),
        name: name.to_owned(),
        description: description.to_owned(),
        contact: contact.to_owned(),
        color: color.map(str::to_owned),
        chunks: chunks
            .iter()
            .map(|&(x, z)| WorldChunk {
                x,
                z,
                world: world.to_owned(),
            })
            .collect(),
        created_at,
        updated_at: created_at,
    }
}

fn midnight_utc_ms((year, month, day): (i32, u32, u32)) -> i64 {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or_default()
}
