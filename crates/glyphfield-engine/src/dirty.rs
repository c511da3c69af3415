#![forbid(unsafe_code)]

//! Dirty set: coordinates whose cells are animating.
//!
//! The frame loop walks this set instead of the whole grid. A coordinate is
//! present exactly while its cell is not idle. Ordered row-major, so a pass
//! visits cells (and consumes randomness) in a reproducible order.
//!
//! Removal is two-phase: the frame pass collects retired coordinates into a
//! scratch list while iterating and only then calls
//! [`DirtySet::remove_all`].

use std::collections::BTreeSet;

use glyphfield_core::geometry::CellCoord;

/// Set of animating cell coordinates.
#[derive(Debug, Clone, Default)]
pub struct DirtySet {
    coords: BTreeSet<CellCoord>,
}

impl DirtySet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `coord`. Returns `false` if it was already present.
    #[inline]
    pub fn insert(&mut self, coord: CellCoord) -> bool {
        self.coords.insert(coord)
    }

    /// Whether `coord` is present.
    #[inline]
    pub fn contains(&self, coord: CellCoord) -> bool {
        self.coords.contains(&coord)
    }

    /// Remove every coordinate yielded by `retired`.
    pub fn remove_all<I>(&mut self, retired: I) -> usize
    where
        I: IntoIterator<Item = CellCoord>,
    {
        retired
            .into_iter()
            .filter(|coord| self.coords.remove(coord))
            .count()
    }

    /// Drop everything (grid rebuild).
    pub fn clear(&mut self) {
        self.coords.clear();
    }

    /// Number of coordinates.
    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Whether the set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Coordinates in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.coords.iter().copied()
    }

    /// Packed integer keys, row-major. For diagnostics and host interop.
    pub fn keys(&self) -> impl Iterator<Item = u32> + '_ {
        self.coords.iter().map(|c| c.to_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_insert_is_noop() {
        let mut set = DirtySet::new();
        assert!(set.insert(CellCoord::new(1, 1)));
        assert!(!set.insert(CellCoord::new(1, 1)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn iterates_row_major() {
        let mut set = DirtySet::new();
        set.insert(CellCoord::new(2, 0));
        set.insert(CellCoord::new(0, 9));
        set.insert(CellCoord::new(0, 1));
        let order: Vec<_> = set.iter().collect();
        assert_eq!(
            order,
            vec![
                CellCoord::new(0, 1),
                CellCoord::new(0, 9),
                CellCoord::new(2, 0)
            ]
        );
    }

    #[test]
    fn remove_all_counts_only_present() {
        let mut set = DirtySet::new();
        set.insert(CellCoord::new(0, 0));
        set.insert(CellCoord::new(0, 1));
        let removed = set.remove_all([CellCoord::new(0, 0), CellCoord::new(5, 5)]);
        assert_eq!(removed, 1);
        assert!(!set.contains(CellCoord::new(0, 0)));
        assert!(set.contains(CellCoord::new(0, 1)));
    }

    #[test]
    fn clear_empties() {
        let mut set = DirtySet::new();
        set.insert(CellCoord::new(3, 3));
        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn keys_use_packed_form() {
        let mut set = DirtySet::new();
        set.insert(CellCoord::new(4, 12));
        assert_eq!(set.keys().collect::<Vec<_>>(), vec![40_012]);
    }
}
