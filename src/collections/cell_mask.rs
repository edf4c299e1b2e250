//! A fixed-width set of grid cells

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Sub};

use bitvec::prelude::*;

use super::CellId;

const WORD_BITS: usize = 64;
const WORDS: usize = 4;

/// The largest number of cells a grid may have to be represented by a `CellMask`
pub const MAX_CELLS: usize = WORD_BITS * WORDS;

type Bits = BitArray<[u64; WORDS], Lsb0>;

/// A set of cells stored as a bitmask, one bit per cell index.
///
/// The mask is `Copy` so that solver state can be saved and restored by value.
#[derive(Clone, Copy)]
pub struct CellMask(Bits);

impl CellMask {
    /// The empty set
    pub const EMPTY: Self = Self(Bits::ZERO);

    /// Creates a set containing one cell
    pub fn single(cell: CellId) -> Self {
        let mut mask = Self::EMPTY;
        mask.insert(cell);
        mask
    }

    /// Adds a cell to the set. Returns `false` if it was already present.
    ///
    /// Panics if `cell >= MAX_CELLS`.
    pub fn insert(&mut self, cell: CellId) -> bool {
        assert!(
            cell < MAX_CELLS,
            "cell {} exceeds the mask width of {}",
            cell,
            MAX_CELLS
        );
        let present = self.0[cell];
        self.0.set(cell, true);
        !present
    }

    pub fn contains(&self, cell: CellId) -> bool {
        cell < MAX_CELLS && self.0[cell]
    }

    /// The number of cells in the set
    pub fn len(&self) -> usize {
        self.0.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.0.not_any()
    }

    /// Returns true if the two sets share at least one cell
    pub fn intersects(&self, other: &Self) -> bool {
        self.words().zip(other.words()).any(|(a, b)| a & b != 0)
    }

    /// Returns true if every cell of `other` is in this set
    pub fn is_superset(&self, other: &Self) -> bool {
        self.words().zip(other.words()).all(|(a, b)| a & b == b)
    }

    /// Iterates over the cells of the set in ascending order
    pub fn iter(&self) -> Iter {
        Iter {
            bits: self.0,
            next: 0,
        }
    }

    fn words(&self) -> impl Iterator<Item = u64> + '_ {
        self.0.as_raw_slice().iter().copied()
    }

    fn combine(&mut self, rhs: &Self, op: impl Fn(u64, u64) -> u64) {
        for (a, &b) in self.0.as_raw_mut_slice().iter_mut().zip(rhs.0.as_raw_slice()) {
            *a = op(*a, b);
        }
    }
}

impl Default for CellMask {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl PartialEq for CellMask {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_raw_slice() == other.0.as_raw_slice()
    }
}

impl Eq for CellMask {}

impl Hash for CellMask {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.as_raw_slice().hash(state);
    }
}

impl BitOr for CellMask {
    type Output = Self;

    fn bitor(mut self, rhs: Self) -> Self::Output {
        self |= rhs;
        self
    }
}

impl BitOrAssign for CellMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.combine(&rhs, |a, b| a | b);
    }
}

impl BitAnd for CellMask {
    type Output = Self;

    fn bitand(mut self, rhs: Self) -> Self::Output {
        self &= rhs;
        self
    }
}

impl BitAndAssign for CellMask {
    fn bitand_assign(&mut self, rhs: Self) {
        self.combine(&rhs, |a, b| a & b);
    }
}

/// Set difference
impl Sub for CellMask {
    type Output = Self;

    fn sub(mut self, rhs: Self) -> Self::Output {
        self.combine(&rhs, |a, b| a & !b);
        self
    }
}

impl FromIterator<CellId> for CellMask {
    fn from_iter<I: IntoIterator<Item = CellId>>(iter: I) -> Self {
        let mut mask = Self::EMPTY;
        mask.extend(iter);
        mask
    }
}

impl Extend<CellId> for CellMask {
    fn extend<I: IntoIterator<Item = CellId>>(&mut self, iter: I) {
        for cell in iter {
            self.insert(cell);
        }
    }
}

impl fmt::Debug for CellMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Iterator over the cells of a `CellMask`
pub struct Iter {
    bits: Bits,
    next: CellId,
}

impl Iterator for Iter {
    type Item = CellId;

    fn next(&mut self) -> Option<Self::Item> {
        let cell = self.next + self.bits[self.next..].first_one()?;
        self.next = cell + 1;
        Some(cell)
    }
}

impl<'a> IntoIterator for &'a CellMask {
    type Item = CellId;
    type IntoIter = Iter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use ahash::AHashSet;

    use super::{CellMask, MAX_CELLS};

    #[test]
    #[should_panic]
    fn insert_too_high() {
        let mut mask = CellMask::EMPTY;
        mask.insert(MAX_CELLS);
    }

    #[test]
    fn insert_result() {
        let mut mask = CellMask::EMPTY;
        assert!(mask.is_empty());
        assert!(mask.insert(70));
        assert!(!mask.insert(70));
        assert!(mask.contains(70));
        assert!(!mask.contains(71));
        assert_eq!(1, mask.len());
    }

    #[test]
    fn last_cell() {
        let mask: CellMask = vec![MAX_CELLS - 1, 0].into_iter().collect();
        assert_eq!(vec![0, MAX_CELLS - 1], mask.iter().collect::<Vec<_>>());
        assert!(mask.contains(MAX_CELLS - 1));
    }

    #[test]
    fn equal_masks_hash_equal() {
        let mut seen: AHashSet<CellMask> = AHashSet::default();
        assert!(seen.insert(vec![4, 130].into_iter().collect()));
        assert!(!seen.insert(vec![130, 4].into_iter().collect()));
        assert_eq!(CellMask::default(), CellMask::EMPTY);
    }

    #[test]
    fn iter_crosses_words() {
        let mask: CellMask = vec![200, 3, 64, 63, 0].into_iter().collect();
        let cells: Vec<_> = mask.iter().collect();
        assert_eq!(vec![0, 3, 63, 64, 200], cells);
        assert_eq!(5, mask.len());
    }

    #[test]
    fn set_operations() {
        let a: CellMask = vec![1, 2, 3, 100].into_iter().collect();
        let b: CellMask = vec![3, 4, 100].into_iter().collect();
        assert_eq!(vec![1, 2, 3, 4, 100], (a | b).iter().collect::<Vec<_>>());
        assert_eq!(vec![3, 100], (a & b).iter().collect::<Vec<_>>());
        assert_eq!(vec![1, 2], (a - b).iter().collect::<Vec<_>>());
        assert!(a.intersects(&b));
        assert!(!(a - b).intersects(&b));
        assert!(a.is_superset(&(a & b)));
        assert!(!a.is_superset(&b));
        assert!(a.is_superset(&CellMask::EMPTY));
    }

    #[test]
    fn contains_out_of_range() {
        assert!(!CellMask::single(5).contains(MAX_CELLS + 1));
    }
}
