//! Exhaustive enumeration of suboptimal structures.
//!
//! Wuchty-style branch and bound over [`StructureState`]s: a stack of
//! partial structures is expanded segment by segment, and a partial
//! structure survives only while [`StructureState::max_pairs`] can still
//! reach `max_pairs() - d`. With no cap this visits every non-crossing
//! structure within `d` pairs of the optimum exactly once.

use log::warn;

use sf_structure::Pair;
use sf_structure::PairList;
use sf_structure::SeqIdx;

use crate::FoldMatrix;
use crate::StructureState;


/// Enumerator for all structures within `d` pairs of the table optimum.
pub struct SuboptimalEnumerator<'a> {
    fold: &'a FoldMatrix,
    threshold: usize,
    structures_max: Option<usize>,
}

impl<'a> SuboptimalEnumerator<'a> {
    /// Set up an enumeration over a filled matrix. A `d` exceeding the
    /// optimum saturates to a threshold of zero, i.e. every valid structure.
    pub fn new(fold: &'a FoldMatrix, d: usize, structures_max: Option<usize>) -> Self {
        let threshold = fold.max_pairs().saturating_sub(d);
        Self {
            fold,
            threshold,
            structures_max,
        }
    }

    /// Run the enumeration and return the complete structures in a fixed,
    /// reproducible order. A capped run returns a prefix of the uncapped
    /// run; hitting the cap logs a warning.
    pub fn run(&self) -> Vec<PairList> {
        let mut structures: Vec<PairList> = Vec::new();
        if self.structures_max == Some(0) {
            return structures;
        }

        let mut seed = StructureState::new(self.fold.len() as SeqIdx);
        if self.fold.max_pairs() == 0 {
            // Nothing can pair, so the fully unpaired structure is the one
            // and only candidate.
            seed.pop_segment();
            structures.push(seed.into_pairs());
            return structures;
        }

        let p = self.fold.table();
        let min_loop_size = self.fold.min_loop_size();
        let mut stack = vec![seed];

        while let Some(mut state) = stack.pop() {
            if state.is_folded() {
                structures.push(state.into_pairs());
                if let Some(cap) = self.structures_max {
                    if structures.len() >= cap {
                        warn!("stopping enumeration at {cap} structures, more may exist");
                        break;
                    }
                }
                continue;
            }

            let mut spawned = false;
            while let Some((si, sj)) = state.pop_segment() {
                let (i, j) = (si as usize, sj as usize);
                if j - i <= min_loop_size {
                    // Too narrow to hold a pair; its only completion is
                    // staying unpaired, so it is simply consumed.
                    continue;
                }

                // Branch on exactly one segment per pass. The remaining
                // segments travel with the children; branching a second
                // segment here would reach the same completions twice.
                let unpaired = state.branch(&[(si, sj - 1)], None);
                if unpaired.max_pairs(p) >= self.threshold {
                    stack.push(unpaired);
                    spawned = true;
                }
                for l in i..j.saturating_sub(min_loop_size) {
                    if !self.fold.can_pair(l, j) {
                        continue;
                    }
                    let li = l as SeqIdx;
                    let paired = state.branch(
                        &[(si, li - 1), (li + 1, sj - 1)],
                        Some(Pair::new(li, sj)),
                    );
                    if paired.max_pairs(p) >= self.threshold {
                        stack.push(paired);
                        spawned = true;
                    }
                }
                break;
            }

            if !spawned {
                // All segments were narrow: the state folded right here and
                // is its own completion, collected on the next pop.
                debug_assert!(state.is_folded());
                stack.push(state);
            }
        }
        structures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CanonicalPairing;

    fn fill(seq: &str, min_loop_size: usize) -> FoldMatrix {
        FoldMatrix::fill(seq, &CanonicalPairing::new(), min_loop_size).unwrap()
    }

    fn structs(seq: &str, min_loop_size: usize, d: usize) -> Vec<String> {
        fill(seq, min_loop_size)
            .subopt_structs(d, None)
            .iter()
            .map(|dbv| dbv.to_string())
            .collect()
    }

    #[test]
    fn test_unpairable_sequence_yields_unpaired_structure() {
        let result = fill("AAAA", 1).traceback_subopt(0, None);
        assert_eq!(result.len(), 1);
        assert!(result[0].is_empty());
        assert_eq!(result[0].length(), 4);

        // Same special case, higher tolerance.
        assert_eq!(structs("AUGC", 1, 3), ["...."]);
    }

    #[test]
    fn test_enumeration_order_is_pairs_first() {
        let result = fill("GCGC", 1).traceback_subopt(1, None);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].as_slice(), &[Pair::new(1, 4)]);
        assert!(result[1].is_empty());
    }

    #[test]
    fn test_optimal_set_contains_traceback() {
        for (seq, min_loop_size) in [("GCGC", 1), ("ACGU", 0), ("GGGAAACCC", 3)] {
            let fold = fill(seq, min_loop_size);
            let rendered: Vec<String> = fold
                .subopt_structs(0, None)
                .iter()
                .map(|dbv| dbv.to_string())
                .collect();
            let mfe = sf_structure::DotBracketVec::try_from(&fold.traceback())
                .unwrap()
                .to_string();
            assert!(rendered.contains(&mfe), "{seq}: {mfe} not in {rendered:?}");
            for pairs in fold.traceback_subopt(0, None) {
                assert_eq!(pairs.len(), fold.max_pairs());
            }
        }
    }

    #[test]
    fn test_nested_optimum_and_suboptimals() {
        assert_eq!(structs("ACGU", 0, 0), ["(())"]);

        let within_one = structs("ACGU", 0, 1);
        assert_eq!(within_one.len(), 4);
        for s in ["(())", "(..)", ".().", "..()"] {
            assert!(within_one.iter().any(|r| r == s), "{s} missing");
        }
    }

    #[test]
    fn test_hairpin_optimum_is_unique() {
        assert_eq!(structs("GGGAAACCC", 3, 0), ["(((...)))"]);
    }

    #[test]
    fn test_hairpin_suboptimals_within_one() {
        let fold = fill("GGGAAACCC", 3);
        let result = fold.traceback_subopt(1, None);
        // Nine ways to nest two of the G-C pairs, plus the optimum.
        assert_eq!(result.len(), 10);
        for pairs in &result {
            assert!(pairs.len() >= fold.max_pairs() - 1);
        }

        let rendered = structs("GGGAAACCC", 3, 1);
        let unique: std::collections::HashSet<&String> = rendered.iter().collect();
        assert_eq!(unique.len(), 10);
        assert!(rendered.iter().any(|s| s == "(((...)))"));
        assert!(rendered.iter().any(|s| s == "((....))."));
    }

    #[test]
    fn test_no_duplicates_with_isolated_late_pair() {
        // Five ways to place a single pair, and (4,8) only opens up once
        // (4,6) is rejected; a naive multi-segment branch emits it twice.
        let rendered = structs("AAAGAUAC", 1, 0);
        assert_eq!(rendered.len(), 5);
        let unique: std::collections::HashSet<&String> = rendered.iter().collect();
        assert_eq!(unique.len(), 5);
        for s in ["(....)..", ".(...)..", "..(..)..", "...(.)..", "...(...)"] {
            assert!(rendered.iter().any(|r| r == s), "{s} missing");
        }
    }

    #[test]
    fn test_cap_is_a_prefix_of_the_uncapped_run() {
        let fold = fill("GGGAAACCC", 3);
        let uncapped = fold.subopt_structs(1, None);
        assert_eq!(fold.subopt_structs(1, Some(4)), uncapped[..4]);
        assert_eq!(fold.subopt_structs(1, Some(99)), uncapped);
        assert!(fold.subopt_structs(1, Some(0)).is_empty());
        assert!(fold.subopt_structs(0, Some(0)).is_empty());
    }

    #[test]
    fn test_tolerance_saturates_at_zero_threshold() {
        // d beyond the optimum enumerates everything, same as any d that
        // already drops the threshold to zero.
        assert_eq!(structs("GCGC", 1, 99), structs("GCGC", 1, 1));
    }

    #[test]
    fn test_enumeration_is_deterministic() {
        let first = structs("GGGAAACCC", 3, 1);
        let second = structs("GGGAAACCC", 3, 1);
        assert_eq!(first, second);
    }
}
