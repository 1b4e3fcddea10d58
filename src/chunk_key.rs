use clap::ValueEnum;

/// A chunk coordinate on the x/z plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

/// Which half of the key holds the x coordinate.
///
/// The two layouts are not wire compatible. A process picks one and sticks with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Packing {
    /// x in the high 32 bits, z in the low 32 bits.
    XHigh,
    /// x in the low 32 bits, z in the high 32 bits.
    XLow,
}

pub fn encode(packing: Packing, pos: ChunkPos) -> i64 {
    let (hi, lo) = match packing {
        Packing::XHigh => (pos.x, pos.z),
        Packing::XLow => (pos.z, pos.x),
    };
    (((hi as u32 as u64) << 32) | lo as u32 as u64) as i64
}

// Nothing on the serving path reads keys back.
#[cfg(test)]
pub fn decode(packing: Packing, key: i64) -> ChunkPos {
    let hi = (key >> 32) as i32;
    let lo = key as i32;
    match packing {
        Packing::XHigh => ChunkPos::new(hi, lo),
        Packing::XLow => ChunkPos::new(lo, hi),
    }
}
