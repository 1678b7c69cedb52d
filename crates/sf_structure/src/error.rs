use thiserror::Error;

/// Errors raised by structure representations and the dot-bracket codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    /// A character that is neither `.`, `(` nor `)`.
    #[error("character '{0}' is not valid dot-bracket notation")]
    InvalidChar(char),
    /// A `)` without a matching `(`, or a `(` left open at the end.
    #[error("unmatched '{symbol}' at position {position}")]
    Unbalanced { symbol: char, position: usize },
    /// Two pairs claim the same sequence position.
    #[error("position {0} is claimed by more than one pair")]
    DuplicatePosition(usize),
}
