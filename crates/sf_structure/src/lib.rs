mod error;
mod dotbracket;
mod pair_list;
mod pair_set;

pub use error::*;
pub use dotbracket::*;
pub use pair_list::*;
pub use pair_set::*;


/// Sequence index: `u16` (1 to 65k) covers every sequence we fold. Positions
/// are 1-based; index 0 is reserved so dynamic programs can address the empty
/// subsequence. Should you ever want longer sequences, beware that `PairKey`
/// needs to be *twice as large* (in bits) as `SeqIdx`, since pairs
/// `(SeqIdx, SeqIdx)` are compacted into one `PairKey`.
pub type SeqIdx = u16;

/// Pair key. Must be >= 2x`SeqIdx` in bit width so we can safely pack two indices.
pub type PairKey = u32;

/// Compile-time sanity check: 2xSeqIdx bits must fit into PairKey.
const _: () = {
    debug_assert!(2 * SeqIdx::BITS <= PairKey::BITS);
};
