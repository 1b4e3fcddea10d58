//! Procedural chunk footprints for generated regions.

use std::collections::HashSet;

use rand::Rng;

use crate::chunk_key::ChunkPos;

/// Width of a chunk in blocks. Walk-generated coordinates are multiples of this.
pub const CHUNK_SIZE: i32 = 16;

const JITTER_CENTER_BOUND: i32 = 100_000;
const JITTER_SPREAD: i32 = 50;

/// Seeds are drawn within this many strides of the origin.
const WALK_SEED_BOUND: i32 = 10_000;
const MIN_WALK_RADIUS: i32 = 4;
const ACCEPT_PROBABILITY: f64 = 0.6;
const SETTLE_PROBABILITY: f64 = 0.25;
const HOLE_PROBABILITY: f64 = 0.12;

const NEIGHBOURS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Generator {
    Jitter(JitterParams),
    Walk(WalkParams),
}

impl Generator {
    pub fn jitter() -> Self {
        Self::Jitter(JitterParams::default())
    }

    pub fn walk() -> Self {
        Self::Walk(WalkParams::default())
    }

    /// Produces up to `target` coordinates for one region.
    ///
    /// The walk may come up short when its frontier dies out, and hole carving
    /// thins it further. Neither is an error.
    pub fn generate(&self, rng: &mut impl Rng, target: usize) -> Vec<ChunkPos> {
        match self {
            Self::Jitter(params) => jitter(rng, target, params),
            Self::Walk(params) => {
                let bound = WALK_SEED_BOUND * params.stride;
                let start = ChunkPos::new(
                    rng.random_range(-bound..=bound) / params.stride * params.stride,
                    rng.random_range(-bound..=bound) / params.stride * params.stride,
                );
                let radius = params.radius_for(target);
                let walked = random_walk(rng, start, target, radius, params);
                carve_holes(rng, walked, params.hole_probability)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JitterParams {
    pub center_bound: i32,
    pub spread: i32,
}

impl Default for JitterParams {
    fn default() -> Self {
        Self {
            center_bound: JITTER_CENTER_BOUND,
            spread: JITTER_SPREAD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkParams {
    pub stride: i32,
    pub min_radius: i32,
    pub accept_probability: f64,
    pub settle_probability: f64,
    pub hole_probability: f64,
}

impl WalkParams {
    /// Bounding radius in strides, wide enough that `target` cells fit.
    pub fn radius_for(&self, target: usize) -> i32 {
        let side = (target as f64).sqrt().ceil() as i32;
        side.max(self.min_radius)
    }
}

impl Default for WalkParams {
    fn default() -> Self {
        Self {
            stride: CHUNK_SIZE,
            min_radius: MIN_WALK_RADIUS,
            accept_probability: ACCEPT_PROBABILITY,
            settle_probability: SETTLE_PROBABILITY,
            hole_probability: HOLE_PROBABILITY,
        }
    }
}

/// Scatters `count` points around a random center. Duplicates are possible.
pub fn jitter(rng: &mut impl Rng, count: usize, params: &JitterParams) -> Vec<ChunkPos> {
    let bound = params.center_bound;
    let center = ChunkPos::new(
        rng.random_range(-bound..=bound),
        rng.random_range(-bound..=bound),
    );

    let spread = params.spread;
    (0..count)
        .map(|_| {
            ChunkPos::new(
                center.x + rng.random_range(-spread..=spread),
                center.z + rng.random_range(-spread..=spread),
            )
        })
        .collect()
}

/// Grows a connected blob out of `start` by randomly expanding a frontier.
///
/// Returned in discovery order, `start` first. Every point is a multiple of
/// `params.stride` away from `start` and at most `radius` strides from it on
/// either axis.
pub fn random_walk(
    rng: &mut impl Rng,
    start: ChunkPos,
    target: usize,
    radius: i32,
    params: &WalkParams,
) -> Vec<ChunkPos> {
    if target == 0 {
        return Vec::new();
    }

    let stride = params.stride;
    let reach = radius as i64 * stride as i64;
    let in_bounds = |pos: ChunkPos| {
        (pos.x as i64 - start.x as i64).abs() <= reach
            && (pos.z as i64 - start.z as i64).abs() <= reach
    };

    let mut visited = HashSet::from([start]);
    let mut found = vec![start];
    let mut frontier = vec![start];

    while found.len() < target && !frontier.is_empty() {
        let idx = rng.random_range(0..frontier.len());
        let current = frontier[idx];

        for (dx, dz) in NEIGHBOURS {
            if found.len() >= target {
                break;
            }
            let (Some(x), Some(z)) = (
                current.x.checked_add(dx * stride),
                current.z.checked_add(dz * stride),
            ) else {
                continue;
            };
            let next = ChunkPos::new(x, z);
            if visited.contains(&next) || !in_bounds(next) {
                continue;
            }
            if rng.random_bool(params.accept_probability) {
                visited.insert(next);
                found.push(next);
                frontier.push(next);
            }
        }

        if rng.random_bool(params.settle_probability) {
            frontier.swap_remove(idx);
        }
    }

    found
}

/// Drops each point independently with `probability`.
pub fn carve_holes(rng: &mut impl Rng, chunks: Vec<ChunkPos>, probability: f64) -> Vec<ChunkPos> {
    chunks
        .into_iter()
        .filter(|_| !rng.random_bool(probability))
        .collect()
}
