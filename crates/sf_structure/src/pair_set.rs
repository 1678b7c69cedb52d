//! Set-of-pairs view of a secondary structure.
//!
//! Compact integer-based representation: each `Pair` is packed into a
//! `PairKey` and stored in a no-hash integer set. This is the decode target
//! of the dot-bracket codec and the natural form for comparing structures
//! regardless of the order their pairs were committed in.

use std::fmt;

use nohash_hasher::IntSet;

use crate::DotBracket;
use crate::DotBracketVec;
use crate::PairKey;
use crate::PairList;
use crate::SeqIdx;
use crate::StructureError;
use crate::pair_list::Pair;


/// A collection of base pairs represented as compact integer keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairSet {
    length: usize,
    pairs: IntSet<PairKey>,
}

impl PairSet {
    /// Create an empty pair set for a given sequence length.
    pub fn new(length: usize) -> Self {
        Self {
            length,
            pairs: IntSet::default(),
        }
    }

    /// Number of pairs contained in the set.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if there are no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Insert a new pair; returns true if it was newly inserted.
    pub fn insert(&mut self, pair: Pair) -> bool {
        debug_assert!((pair.j() as usize) <= self.length);
        self.pairs.insert(pair.key())
    }

    /// Check if a pair exists in the set.
    pub fn contains(&self, pair: &Pair) -> bool {
        self.pairs.contains(&pair.key())
    }

    /// Iterator over all pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = Pair> + '_ {
        self.pairs.iter().map(|&k| Pair::from_key(k))
    }

    /// Return all pairs as a Vec (for deterministic inspection).
    pub fn to_vec(&self) -> Vec<Pair> {
        let mut v: Vec<_> = self.iter().collect();
        v.sort_unstable_by_key(|p| (p.i(), p.j()));
        v
    }

    /// Underlying sequence length.
    pub fn length(&self) -> usize {
        self.length
    }
}

impl From<&PairList> for PairSet {
    fn from(pl: &PairList) -> Self {
        let mut pairs = IntSet::default();
        for pair in pl.iter() {
            pairs.insert(pair.key());
        }
        Self {
            length: pl.length(),
            pairs,
        }
    }
}

impl TryFrom<&DotBracketVec> for PairSet {
    type Error = StructureError;

    /// Decode a dot-bracket structure with a stack scan. Every `(` opens a
    /// pair, every `)` closes the innermost open one. Positions are 1-based
    /// in the reported errors and in the decoded pairs.
    fn try_from(dbv: &DotBracketVec) -> Result<Self, Self::Error> {
        let mut set = PairSet::new(dbv.len());
        let mut opens: Vec<SeqIdx> = Vec::new();
        for (idx, &db) in dbv.0.iter().enumerate() {
            let position = idx + 1;
            match db {
                DotBracket::Unpaired => {}
                DotBracket::Open => opens.push(position as SeqIdx),
                DotBracket::Close => {
                    let Some(i) = opens.pop() else {
                        return Err(StructureError::Unbalanced {
                            symbol: ')',
                            position,
                        });
                    };
                    set.insert(Pair::new(i, position as SeqIdx));
                }
            }
        }
        if let Some(&i) = opens.first() {
            return Err(StructureError::Unbalanced {
                symbol: '(',
                position: i as usize,
            });
        }
        Ok(set)
    }
}

impl TryFrom<&str> for PairSet {
    type Error = StructureError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let dbv = DotBracketVec::try_from(s)?;
        PairSet::try_from(&dbv)
    }
}

impl fmt::Display for PairSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for pair in self.to_vec() {
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
    fn test_decode_nested() {
        let ps = PairSet::try_from("((..))").unwrap();

        let expected = vec![Pair::new(1, 6), Pair::new(2, 5)];
        assert_eq!(ps.length(), 6);
        assert_eq!(ps.to_vec(), expected);

        for p in &expected {
            assert!(ps.contains(p));
        }
        assert!(!ps.contains(&Pair::new(1, 5)));
    }

    #[test]
    fn test_decode_mixed() {
        let ps = PairSet::try_from(".(.().)").unwrap();
        assert_eq!(ps.to_vec(), vec![Pair::new(2, 7), Pair::new(4, 5)]);
    }

    #[test]
    fn test_decode_unmatched_close() {
        let err = PairSet::try_from("().)").unwrap_err();
        assert_eq!(
            err,
            StructureError::Unbalanced {
                symbol: ')',
                position: 4
            }
        );
    }

    #[test]
    fn test_decode_leftover_open() {
        let err = PairSet::try_from("(()").unwrap_err();
        assert_eq!(
            err,
            StructureError::Unbalanced {
                symbol: '(',
                position: 1
            }
        );
    }

    #[test]
    fn test_roundtrip_via_dotbracket() {
        let mut pl = PairList::new(9);
        pl.push(Pair::new(3, 7));
        pl.push(Pair::new(2, 8));
        pl.push(Pair::new(1, 9));

        let dbv = DotBracketVec::try_from(&pl).unwrap();
        assert_eq!(format!("{}", dbv), "(((...)))");

        let decoded = PairSet::try_from(&dbv).unwrap();
        assert_eq!(decoded, PairSet::from(&pl));
    }

    #[test]
    fn test_display() {
        let ps = PairSet::try_from("((..))").unwrap();
        let s = format!("{}", ps);
        assert!(s.contains("(1,6)"));
        assert!(s.contains("(2,5)"));
    }
}
