//! Uniform spatial grid for the link pass.
//!
//! Linking every pair of nearby particles is quadratic if done naively, so
//! dynamic positions are binned into cells the size of the link distance and
//! only the home cell plus its forward half-neighborhood is scanned. Every
//! unordered pair is visited exactly once, and the distance test itself is
//! unchanged, so the emitted pair set is identical to a full N-squared scan.

use glam::Vec3;
use std::collections::HashMap;

/// Offsets covering half the 26-cell Moore neighborhood, so each unordered
/// cell pair is visited from exactly one side.
const FORWARD_OFFSETS: [(i32, i32, i32); 13] = [
    (1, 0, 0),
    (-1, 1, 0),
    (0, 1, 0),
    (1, 1, 0),
    (-1, -1, 1),
    (0, -1, 1),
    (1, -1, 1),
    (-1, 0, 1),
    (0, 0, 1),
    (1, 0, 1),
    (-1, 1, 1),
    (0, 1, 1),
    (1, 1, 1),
];

/// Cell-hashed index of particle positions.
///
/// Cell vectors are retained across rebuilds so steady-state frames reuse
/// their allocations.
pub struct SpatialGrid {
    cell_size: f32,
    cells: HashMap<(i32, i32, i32), Vec<usize>>,
}

impl SpatialGrid {
    /// `cell_size` must be at least the query distance passed to
    /// [`collect_pairs`](Self::collect_pairs), and positive.
    pub fn new(cell_size: f32) -> Self {
        assert!(cell_size > 0.0, "cell_size must be positive");
        Self {
            cell_size,
            cells: HashMap::new(),
        }
    }

    #[inline]
    fn cell_of(&self, pos: Vec3) -> (i32, i32, i32) {
        (
            (pos.x / self.cell_size).floor() as i32,
            (pos.y / self.cell_size).floor() as i32,
            (pos.z / self.cell_size).floor() as i32,
        )
    }

    pub fn clear(&mut self) {
        for indices in self.cells.values_mut() {
            indices.clear();
        }
    }

    pub fn insert(&mut self, index: usize, pos: Vec3) {
        let cell = self.cell_of(pos);
        self.cells.entry(cell).or_default().push(index);
    }

    /// Drop the old contents and index `positions` by cell. Indices are
    /// inserted in order, so each cell's list stays ascending.
    pub fn rebuild(&mut self, positions: &[Vec3]) {
        self.clear();
        for (index, &pos) in positions.iter().enumerate() {
            self.insert(index, pos);
        }
    }

    /// All unordered index pairs closer than `max_dist`, sorted ascending
    /// by `(i, j)` with `i < j`. The ordering matches what a nested
    /// index-order scan would produce, so callers can draw in a stable
    /// order.
    ///
    /// The threshold is strict, and `max_dist` must not exceed the grid's
    /// cell size.
    pub fn collect_pairs(&self, positions: &[Vec3], max_dist: f32) -> Vec<(usize, usize)> {
        debug_assert!(max_dist <= self.cell_size);
        let max_dist_sq = max_dist * max_dist;
        let mut pairs = Vec::new();

        for (&cell, indices) in &self.cells {
            // Pairs inside the home cell. Lists are ascending, so a < b.
            for (slot, &a) in indices.iter().enumerate() {
                for &b in &indices[slot + 1..] {
                    if positions[a].distance_squared(positions[b]) < max_dist_sq {
                        pairs.push((a, b));
                    }
                }
            }

            // Pairs against each forward neighbor cell.
            for &(dx, dy, dz) in &FORWARD_OFFSETS {
                let neighbor = (cell.0 + dx, cell.1 + dy, cell.2 + dz);
                if let Some(others) = self.cells.get(&neighbor) {
                    for &a in indices {
                        for &b in others {
                            if positions[a].distance_squared(positions[b]) < max_dist_sq {
                                pairs.push((a.min(b), a.max(b)));
                            }
                        }
                    }
                }
            }
        }

        pairs.sort_unstable();
        pairs
    }
}

/// Reference N-squared scan with the same strict threshold. Kept public so
/// tests and benches can hold the grid to it.
pub fn brute_force_pairs(positions: &[Vec3], max_dist: f32) -> Vec<(usize, usize)> {
    let max_dist_sq = max_dist * max_dist;
    let mut pairs = Vec::new();
    for i in 0..positions.len() {
        for j in (i + 1)..positions.len() {
            if positions[i].distance_squared(positions[j]) < max_dist_sq {
                pairs.push((i, j));
            }
        }
    }
    pairs
}
