use anyhow::Context;
use rand::{seq::IndexedRandom, Rng};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;
use uuid::Uuid;

use crate::{
    chunk_key::{self, Packing},
    generate::Generator,
};

const DESCRIPTIONS: &[&str] = &[
    "Generated claim for client testing",
    "Sprawling frontier settlement",
    "Quiet farmland with a few outposts",
    "Contested border territory",
    "Abandoned mining operation",
];

// Fields are kept in key order so the struct serializes the same way as its
// canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub chunks: Vec<i64>,
    pub contact: String,
    pub description: String,
    pub id: Uuid,
    pub name: String,
    pub owner: Uuid,
    pub world: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub hash: String,
    pub timestamp: i64,
    pub regions: Vec<Region>,
}

/// The `/status` view of a manifest.
#[derive(Debug, Serialize)]
pub struct Status<'a> {
    pub hash: &'a str,
    pub timestamp: i64,
}

impl Manifest {
    pub fn status(&self) -> Status<'_> {
        Status {
            hash: &self.hash,
            timestamp: self.timestamp,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DatasetParams {
    pub regions: usize,
    pub chunks_per_region: usize,
    pub generator: Generator,
    pub packing: Packing,
    pub world: String,
}

/// Generates every region and seals them into a hashed manifest.
pub fn build_manifest(rng: &mut impl Rng, params: &DatasetParams) -> anyhow::Result<Manifest> {
    let regions = (0..params.regions)
        .map(|i| build_region(rng, params, i + 1))
        .collect::<Vec<_>>();

    let hash = content_hash(&regions)?;
    debug!(%hash, regions = regions.len(), "built manifest");

    Ok(Manifest {
        hash,
        timestamp: now_ms(),
        regions,
    })
}

fn build_region(rng: &mut impl Rng, params: &DatasetParams, n: usize) -> Region {
    let chunks = params
        .generator
        .generate(rng, params.chunks_per_region)
        .into_iter()
        .map(|pos| chunk_key::encode(params.packing, pos))
        .collect();

    Region {
        id: random_uuid(rng),
        name: format!("Region {n}"),
        description: DESCRIPTIONS.choose(rng).copied().unwrap_or_default().to_owned(),
        owner: random_uuid(rng),
        contact: format!("owner{n}@example.com"),
        world: params.world.clone(),
        chunks,
    }
}

fn random_uuid(rng: &mut impl Rng) -> Uuid {
    uuid::Builder::from_random_bytes(rng.random()).into_uuid()
}

/// Hex SHA-256 of the canonical form of `regions`: object keys sorted,
/// no whitespace.
pub fn content_hash(regions: &[Region]) -> anyhow::Result<String> {
    let bytes = canonical_json(regions)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

fn canonical_json(regions: &[Region]) -> anyhow::Result<Vec<u8>> {
    // `serde_json::Map` is ordered by key, so a round trip through `Value`
    // sorts every object regardless of field declaration order.
    let value = serde_json::to_value(regions).context("converting regions to json")?;
    serde_json::to_vec(&value).context("serializing regions")
}

pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
