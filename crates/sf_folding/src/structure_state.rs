//! Partially resolved structures for traceback and enumeration.
//!
//! A `StructureState` is a snapshot of a fold in progress: the pairs already
//! committed plus a stack of open segments that still have to be resolved.
//! Both the deterministic traceback and the suboptimal enumerator drive
//! their work off this type; the enumerator additionally uses `branch` to
//! fork alternative continuations and `max_pairs` to prune the ones that
//! can no longer reach the score threshold.

use ndarray::Array2;

use sf_structure::Pair;
use sf_structure::PairList;
use sf_structure::SeqIdx;


/// Committed pairs plus the stack of open segments of a partial structure.
///
/// Only segments with `i < j` are ever stored; anything narrower is dropped
/// at insert time since it cannot hold a pair. A state with an empty stack
/// is folded and its pair list is final.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureState {
    sigma: Vec<(SeqIdx, SeqIdx)>,
    pairs: PairList,
}

impl StructureState {
    /// Fresh state covering the whole sequence `1..=n`.
    pub fn new(n: SeqIdx) -> Self {
        let mut state = Self {
            sigma: Vec::new(),
            pairs: PairList::new(n as usize),
        };
        state.push_segment(1, n);
        state
    }

    /// Whether every segment has been resolved.
    pub fn is_folded(&self) -> bool {
        self.sigma.is_empty()
    }

    /// Take the most recently stacked segment.
    pub fn pop_segment(&mut self) -> Option<(SeqIdx, SeqIdx)> {
        self.sigma.pop()
    }

    /// Stack a segment, dropping it if it is too narrow to hold a pair.
    pub fn push_segment(&mut self, i: SeqIdx, j: SeqIdx) {
        if i < j {
            self.sigma.push((i, j));
        }
    }

    /// Record a decided pair.
    pub fn commit(&mut self, pair: Pair) {
        self.pairs.push(pair);
    }

    /// Fork a child state: `segments` (filtered like `push_segment`) placed
    /// ahead of the remaining stack, plus an optionally committed pair. The
    /// parent is left untouched, so several children can branch off one pop.
    pub fn branch(&self, segments: &[(SeqIdx, SeqIdx)], pair: Option<Pair>) -> Self {
        let mut sigma = Vec::with_capacity(segments.len() + self.sigma.len());
        sigma.extend(segments.iter().copied().filter(|&(i, j)| i < j));
        sigma.extend_from_slice(&self.sigma);
        let mut pairs = self.pairs.clone();
        if let Some(pair) = pair {
            pairs.push(pair);
        }
        Self { sigma, pairs }
    }

    /// Upper bound on the pair count any completion of this state can reach:
    /// committed pairs plus the table optimum of every open segment. Exact
    /// once the state is folded.
    pub fn max_pairs(&self, p: &Array2<usize>) -> usize {
        let potential: usize = self
            .sigma
            .iter()
            .map(|&(i, j)| p[(i as usize, j as usize)])
            .sum();
        self.pairs.len() + potential
    }

    /// Open segments, oldest first; `pop_segment` takes from the back.
    pub fn segments(&self) -> &[(SeqIdx, SeqIdx)] {
        &self.sigma
    }

    /// The pairs committed so far.
    pub fn pairs(&self) -> &PairList {
        &self.pairs
    }

    /// Consume the state, keeping only its pair list.
    pub fn into_pairs(self) -> PairList {
        self.pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_filters_degenerate_segments() {
        let state = StructureState::new(5);
        assert_eq!(state.segments(), &[(1, 5)]);
        assert!(!state.is_folded());

        // A single position cannot pair with anything.
        assert!(StructureState::new(1).is_folded());
        assert!(StructureState::new(0).is_folded());
    }

    #[test]
    fn test_pop_takes_newest_segment() {
        let mut state = StructureState::new(9);
        state.pop_segment();
        state.push_segment(1, 2);
        state.push_segment(3, 4);
        assert_eq!(state.pop_segment(), Some((3, 4)));
        assert_eq!(state.pop_segment(), Some((1, 2)));
        assert_eq!(state.pop_segment(), None);
    }

    #[test]
    fn test_branch_prepends_new_segments() {
        let mut parent = StructureState::new(9);
        parent.pop_segment();
        parent.push_segment(7, 9);

        // Pair (1, 6) splits off (1, 0) and (2, 5); the empty one is dropped.
        let child = parent.branch(&[(1, 0), (2, 5)], Some(Pair::new(1, 6)));
        assert_eq!(child.segments(), &[(2, 5), (7, 9)]);
        assert_eq!(child.pairs().as_slice(), &[Pair::new(1, 6)]);

        // The parent keeps its own stack and pairs.
        assert_eq!(parent.segments(), &[(7, 9)]);
        assert!(parent.pairs().is_empty());
    }

    #[test]
    fn test_max_pairs_sums_committed_and_potential() {
        let mut p = Array2::from_elem((5, 5), 0usize);
        p[(1, 2)] = 0;
        p[(3, 4)] = 1;

        let mut state = StructureState::new(4);
        state.pop_segment();
        state.push_segment(1, 2);
        state.push_segment(3, 4);
        state.commit(Pair::new(1, 4));
        assert_eq!(state.max_pairs(&p), 2);

        let folded = StructureState::new(1);
        assert_eq!(folded.max_pairs(&p), 0);
    }
}
