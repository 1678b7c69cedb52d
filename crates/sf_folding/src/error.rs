use thiserror::Error;

/// Errors raised while configuring a pairing rule or filling a fold matrix.
#[derive(Debug, Error)]
pub enum FoldError {
    /// A sequence or query symbol outside the configured alphabet.
    #[error("symbol '{0}' is not part of the pairing alphabet")]
    UnknownSymbol(char),
    /// Sequences must fit the 16-bit position packing.
    #[error("sequence length {length} exceeds the supported maximum of {max}")]
    SequenceTooLong { length: usize, max: usize },
    /// The same symbol occurs twice in an alphabet.
    #[error("duplicate symbol '{0}' in pairing alphabet")]
    DuplicateSymbol(char),
    /// Adjacency matrix dimensions do not match the alphabet.
    #[error("adjacency matrix is {rows}x{cols} but the alphabet holds {symbols} symbols")]
    AlphabetMismatch {
        symbols: usize,
        rows: usize,
        cols: usize,
    },
    /// Pairing must be a symmetric relation.
    #[error("pairing matrix is not symmetric: entries ({a},{b}) and ({b},{a}) differ")]
    AsymmetricRule { a: usize, b: usize },
    /// No graph with the requested id in the resource.
    #[error("graph {id} of order {order} not found in the pairing resource")]
    GraphNotFound { order: usize, id: i64 },
    /// Header or adjacency rows that cannot be parsed.
    #[error("malformed pairing resource: {0}")]
    MalformedResource(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
