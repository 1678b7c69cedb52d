//! Dot-bracket symbols and printable structure strings.
//!
//! The encoding side of the codec lives here: a `PairList` renders into a
//! `DotBracketVec` with `(` and `)` at the pair endpoints and `.` everywhere
//! else. Rendering is validating, a position written by two pairs is an
//! error rather than a silent overwrite. The decoding side (string back to
//! pairs) lives with `PairSet`.

use std::fmt;

use crate::PairList;
use crate::StructureError;


/// One position of a secondary structure in dot-bracket notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DotBracket {
    Unpaired,
    Open,
    Close,
}

impl DotBracket {
    pub fn to_char(self) -> char {
        match self {
            DotBracket::Unpaired => '.',
            DotBracket::Open => '(',
            DotBracket::Close => ')',
        }
    }
}

impl TryFrom<char> for DotBracket {
    type Error = StructureError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '.' => Ok(DotBracket::Unpaired),
            '(' => Ok(DotBracket::Open),
            ')' => Ok(DotBracket::Close),
            other => Err(StructureError::InvalidChar(other)),
        }
    }
}

/// A full structure as a vector of dot-bracket symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotBracketVec(pub Vec<DotBracket>);

impl DotBracketVec {
    /// The fully unpaired structure of a given length.
    pub fn unpaired(length: usize) -> Self {
        DotBracketVec(vec![DotBracket::Unpaired; length])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DotBracketVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for db in &self.0 {
            write!(f, "{}", db.to_char())?;
        }
        Ok(())
    }
}

impl TryFrom<&str> for DotBracketVec {
    type Error = StructureError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let symbols: Result<Vec<DotBracket>, _> =
            s.chars().map(DotBracket::try_from).collect();
        Ok(DotBracketVec(symbols?))
    }
}

impl TryFrom<&PairList> for DotBracketVec {
    type Error = StructureError;

    /// Render committed pairs, 1-based positions into a 0-based vector.
    fn try_from(pl: &PairList) -> Result<Self, Self::Error> {
        let mut dbv = vec![DotBracket::Unpaired; pl.length()];
        for pair in pl.iter() {
            for pos in [pair.i(), pair.j()] {
                if dbv[pos as usize - 1] != DotBracket::Unpaired {
                    return Err(StructureError::DuplicatePosition(pos as usize));
                }
            }
            dbv[pair.i() as usize - 1] = DotBracket::Open;
            dbv[pair.j() as usize - 1] = DotBracket::Close;
        }
        Ok(DotBracketVec(dbv))
    }
}
