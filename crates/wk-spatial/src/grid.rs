//! `GridMap`: a bounded walkable plane.

use std::collections::HashSet;

use wk_core::BlockPos;

/// Rectangular walkable plane at height `y`, spanning `min..=max` on the
/// `x` and `z` axes, with individual blocked cells (walls, ore, chests).
#[derive(Clone, Debug)]
pub struct GridMap {
    y:       i32,
    min_x:   i32,
    min_z:   i32,
    max_x:   i32,
    max_z:   i32,
    blocked: HashSet<(i32, i32)>,
}

impl GridMap {
    /// Plane covering the corners `a` and `b` (inclusive, any order) at
    /// height `y`.
    pub fn new(y: i32, a: (i32, i32), b: (i32, i32)) -> Self {
        Self {
            y,
            min_x:   a.0.min(b.0),
            min_z:   a.1.min(b.1),
            max_x:   a.0.max(b.0),
            max_z:   a.1.max(b.1),
            blocked: HashSet::new(),
        }
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.y
    }

    /// `true` if `pos` lies on the plane inside the bounds.
    #[inline]
    pub fn contains(&self, pos: BlockPos) -> bool {
        pos.y == self.y
            && (self.min_x..=self.max_x).contains(&pos.x)
            && (self.min_z..=self.max_z).contains(&pos.z)
    }

    pub fn block(&mut self, x: i32, z: i32) {
        self.blocked.insert((x, z));
    }

    pub fn unblock(&mut self, x: i32, z: i32) {
        self.blocked.remove(&(x, z));
    }

    /// Block every cell of the column `x` from `z0` to `z1` inclusive.
    pub fn wall_x(&mut self, x: i32, z0: i32, z1: i32) {
        for z in z0.min(z1)..=z0.max(z1) {
            self.block(x, z);
        }
    }

    #[inline]
    pub fn is_blocked(&self, pos: BlockPos) -> bool {
        self.blocked.contains(&(pos.x, pos.z))
    }

    /// In bounds and not blocked.
    #[inline]
    pub fn is_walkable(&self, pos: BlockPos) -> bool {
        self.contains(pos) && !self.is_blocked(pos)
    }

    /// Number of cells on the plane.
    pub fn area(&self) -> usize {
        let w = (self.max_x - self.min_x + 1) as usize;
        let d = (self.max_z - self.min_z + 1) as usize;
        w * d
    }
}
