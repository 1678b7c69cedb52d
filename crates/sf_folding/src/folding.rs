//! Nussinov-style base-pair maximization over a pairing rule.
//!
//! The dynamic program scores a structure by its number of base pairs. The
//! table is laid out 1-based: entry `(i, j)` with `1 <= i <= j <= n` holds
//! the optimum for the subsequence `i..=j`, and row/column 0 stay zero so
//! the recurrence can read the empty subsequence `(i, i-1)` without guards.

use ndarray::Array2;

use sf_structure::DotBracket;
use sf_structure::DotBracketVec;
use sf_structure::Pair;
use sf_structure::PairList;
use sf_structure::SeqIdx;

use crate::FoldError;
use crate::PairingRule;
use crate::StructureState;
use crate::SuboptimalEnumerator;


/// A filled base-pair maximization table for one sequence.
///
/// Construction via [`FoldMatrix::fill`] runs the whole dynamic program, so
/// a value of this type is always ready for traceback and enumeration.
/// Pairability of every position pair is cached at fill time; the fold
/// algorithms query the cache instead of the rule.
pub struct FoldMatrix {
    n: usize,
    min_loop_size: usize,
    p: Array2<usize>,
    can_pair: Array2<bool>,
}

impl FoldMatrix {
    /// Fill the table for `seq` under the given pairing rule. A pair `(l, j)`
    /// is only considered when `j - l > min_loop_size`, i.e. at least
    /// `min_loop_size` positions lie between the paired ones.
    pub fn fill<R: PairingRule>(
        seq: &str,
        rule: &R,
        min_loop_size: usize,
    ) -> Result<Self, FoldError> {
        let symbols: Vec<char> = seq.chars().collect();
        let n = symbols.len();
        let max = SeqIdx::MAX as usize - 1;
        if n > max {
            return Err(FoldError::SequenceTooLong { length: n, max });
        }
        let can_pair = build_pairability(&symbols, rule)?;
        let p = nussinov(&can_pair, min_loop_size);
        Ok(Self {
            n,
            min_loop_size,
            p,
            can_pair,
        })
    }

    /// Sequence length.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn min_loop_size(&self) -> usize {
        self.min_loop_size
    }

    /// The optimal pair count for the full sequence.
    pub fn max_pairs(&self) -> usize {
        if self.n == 0 { 0 } else { self.p[(1, self.n)] }
    }

    /// The filled table.
    pub fn table(&self) -> &Array2<usize> {
        &self.p
    }

    /// Cached pairability of positions `i` and `j` (1-based).
    pub fn can_pair(&self, i: usize, j: usize) -> bool {
        self.can_pair[(i, j)]
    }

    /// Recover one optimal structure deterministically.
    ///
    /// Segments resolve right to left: if `j` can stay unpaired at no cost it
    /// does, otherwise `j` pairs the lowest `l` whose split reproduces the
    /// table value. The returned list holds exactly `max_pairs()` pairs.
    pub fn traceback(&self) -> PairList {
        let mut state = StructureState::new(self.n as SeqIdx);
        while let Some((si, sj)) = state.pop_segment() {
            let (i, j) = (si as usize, sj as usize);
            if self.p[(i, j)] == self.p[(i, j - 1)] {
                state.push_segment(si, sj - 1);
                continue;
            }
            // A split matching the table value exists below j - min_loop_size,
            // so the scan commits before reaching any over-tight l.
            for l in i..j {
                if self.can_pair[(l, j)]
                    && self.p[(i, j)] == self.p[(i, l - 1)] + self.p[(l + 1, j - 1)] + 1
                {
                    state.commit(Pair::new(l as SeqIdx, sj));
                    state.push_segment(si, l as SeqIdx - 1);
                    state.push_segment(l as SeqIdx + 1, sj - 1);
                    break;
                }
            }
        }
        debug_assert_eq!(state.pairs().len(), self.max_pairs());
        state.into_pairs()
    }

    /// Enumerate every structure within `d` pairs of the optimum, as pair
    /// lists in enumeration order. `structures_max` caps the result count;
    /// hitting the cap truncates the enumeration with a logged warning.
    pub fn traceback_subopt(&self, d: usize, structures_max: Option<usize>) -> Vec<PairList> {
        SuboptimalEnumerator::new(self, d, structures_max).run()
    }

    /// Like [`FoldMatrix::traceback_subopt`], rendered to dot-bracket form.
    pub fn subopt_structs(&self, d: usize, structures_max: Option<usize>) -> Vec<DotBracketVec> {
        self.traceback_subopt(d, structures_max)
            .into_iter()
            .map(|pairs| {
                let mut dbv = vec![DotBracket::Unpaired; self.n];
                for pair in pairs.iter() {
                    dbv[pair.i() as usize - 1] = DotBracket::Open;
                    dbv[pair.j() as usize - 1] = DotBracket::Close;
                }
                DotBracketVec(dbv)
            })
            .collect()
    }
}


/// Returns the pairability matrix for a sequence, `(n+1) x (n+1)` with the
/// zero row/column unused. Surfaces the rule's symbol errors before any
/// table work happens.
fn build_pairability<R: PairingRule>(
    symbols: &[char],
    rule: &R,
) -> Result<Array2<bool>, FoldError> {
    let n = symbols.len();
    let mut can_pair = Array2::from_elem((n + 1, n + 1), false);
    for i in 1..=n {
        for j in 1..=n {
            can_pair[(i, j)] = rule.may_pair(symbols[i - 1], symbols[j - 1])?;
        }
    }
    Ok(can_pair)
}

fn nussinov(can_pair: &Array2<bool>, min_loop_size: usize) -> Array2<usize> {
    let n = can_pair.dim().0 - 1;
    let mut p = Array2::from_elem((n + 1, n + 1), 0);
    for k in 1..n {
        for i in 1..=n - k {
            let j = i + k;
            let mut best = p[(i, j - 1)];
            for l in i..j.saturating_sub(min_loop_size) {
                if can_pair[(l, j)] {
                    best = best.max(p[(i, l - 1)] + p[(l + 1, j - 1)] + 1);
                }
            }
            p[(i, j)] = best;
        }
    }
    p
}
