//! Integer block coordinates.
//!
//! Workers stand on and strike whole blocks, so positions are integral.  The
//! walking plane is `x`/`z`; `y` is height.

use std::fmt;

/// A block coordinate in the world.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// `true` if every axis differs from `site` by at most `range` blocks.
    ///
    /// This is the "worker is at site" test used for storage interaction and
    /// for the stand location of a wait condition.
    #[inline]
    pub fn within(self, site: BlockPos, range: u32) -> bool {
        let r = range as i64;
        (self.x as i64 - site.x as i64).abs() <= r
            && (self.y as i64 - site.y as i64).abs() <= r
            && (self.z as i64 - site.z as i64).abs() <= r
    }

    /// Manhattan distance in blocks.
    #[inline]
    pub fn manhattan(self, other: BlockPos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) + self.z.abs_diff(other.z)
    }

    /// Return `self` shifted by the given deltas.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> BlockPos {
        BlockPos::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// The four horizontal neighbours, in a fixed order (deterministic search).
    pub fn horizontal_neighbours(self) -> [BlockPos; 4] {
        [
            self.offset(1, 0, 0),
            self.offset(-1, 0, 0),
            self.offset(0, 0, 1),
            self.offset(0, 0, -1),
        ]
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
