//! Pair and PairList definitions.
//!
//! A `Pair` holds the two 1-based endpoints of a base pair, packed into a
//! `PairKey` for set and map storage. A `PairList` is the growing list of
//! pairs a folding algorithm commits to, in commit order, together with
//! the length of the sequence the pairs live on.
//!
//! We keep the list 1-based throughout so it can index dynamic-programming
//! tables whose row/column 0 stands for the empty subsequence.

use std::fmt;

use crate::PairKey;
use crate::SeqIdx;


/// A base pair (i, j) with 0 < i < j, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pair {
    i: SeqIdx,
    j: SeqIdx,
}

impl Pair {
    /// Create a new pair (i, j). Panics in debug if i is 0 or i >= j.
    pub fn new(i: SeqIdx, j: SeqIdx) -> Self {
        debug_assert!(0 < i && i < j);
        Pair { i, j }
    }

    /// Return the 5'-side position.
    pub fn i(&self) -> SeqIdx {
        self.i
    }

    /// Return the 3'-side position.
    pub fn j(&self) -> SeqIdx {
        self.j
    }

    /// Compact 32-bit key encoding both positions.
    pub fn key(&self) -> PairKey {
        ((self.i as PairKey) << 16) | (self.j as PairKey)
    }

    /// Decode a key back into a `Pair`.
    pub fn from_key(key: PairKey) -> Self {
        let i = (key >> 16) as SeqIdx;
        let j = (key & 0xFFFF) as SeqIdx;
        debug_assert!(0 < i && i < j);
        Pair { i, j }
    }
}

/// Committed base pairs of one (possibly partial) structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairList {
    length: usize,
    pairs: Vec<Pair>,
}

impl PairList {
    /// Create an empty list for a sequence of the given length.
    pub fn new(length: usize) -> Self {
        Self {
            length,
            pairs: Vec::new(),
        }
    }

    /// Number of committed pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if no pair has been committed.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Append a pair. Panics in debug if the pair exceeds the length.
    pub fn push(&mut self, pair: Pair) {
        debug_assert!((pair.j() as usize) <= self.length);
        self.pairs.push(pair);
    }

    /// Iterator over the pairs in commit order.
    pub fn iter(&self) -> impl Iterator<Item = Pair> + '_ {
        self.pairs.iter().copied()
    }

    /// The pairs as a slice, in commit order.
    pub fn as_slice(&self) -> &[Pair] {
        &self.pairs
    }

    /// Length of the underlying sequence.
    pub fn length(&self) -> usize {
        self.length
    }
}

impl fmt::Display for PairList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for pair in self.iter() {
            if !first {
                write!(f, ",")?;
            }
            write!(f, "({},{})", pair.i(), pair.j())?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_key_roundtrip() {
        let p = Pair::new(1, 42);
        let k = p.key();
        let q = Pair::from_key(k);
        assert_eq!(p, q);
    }

    #[test]
    fn test_pair_list_push_and_iter() {
        let mut pl = PairList::new(6);
        pl.push(Pair::new(1, 6));
        pl.push(Pair::new(2, 5));

        assert_eq!(pl.length(), 6);
        assert_eq!(pl.len(), 2);
        assert_eq!(pl.as_slice(), &[Pair::new(1, 6), Pair::new(2, 5)]);
    }

    #[test]
    fn test_pair_list_display() {
        let mut pl = PairList::new(6);
        pl.push(Pair::new(1, 6));
        pl.push(Pair::new(2, 5));
        assert_eq!(format!("{}", pl), "(1,6),(2,5)");
    }
}
