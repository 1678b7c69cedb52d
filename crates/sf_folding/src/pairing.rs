//! Pairing rules: which symbols of an alphabet may form a base pair.
//!
//! Two rules are provided. `CanonicalPairing` is the hardcoded nucleotide
//! table (A-U, G-C and the G-U wobble). `AdjacencyPairing` reads the pairing
//! relation from an adjacency matrix over an arbitrary alphabet, so folding
//! can be studied under alternative chemistries. Adjacency rules can be
//! parsed from the plain-text graph resources used for that purpose, files
//! named `graph{n}.adj` holding one block per undirected graph of order `n`:
//!
//! ```text
//! Graph 1, order 2.
//! 01
//! 10
//! ```
//!
//! Both rules answer `may_pair` symmetrically and refuse symbols outside
//! their alphabet instead of defaulting to "no pair".

use std::fs;
use std::path::Path;

use ahash::AHashMap;
use ndarray::Array2;

use crate::FoldError;


/// Decides whether two alphabet symbols may form a base pair.
pub trait PairingRule {
    /// Symbols of the configured alphabet, in index order.
    fn alphabet(&self) -> &[char];

    /// Whether `a` and `b` may pair. The relation is symmetric. Symbols
    /// outside the alphabet are an error, never a silent `false`.
    fn may_pair(&self, a: char, b: char) -> Result<bool, FoldError>;
}

const CANONICAL_ALPHABET: [char; 4] = ['A', 'U', 'G', 'C'];

/// The canonical nucleotide rule: A-U, G-C, and the G-U wobble.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalPairing;

impl CanonicalPairing {
    pub fn new() -> Self {
        CanonicalPairing
    }
}

impl PairingRule for CanonicalPairing {
    fn alphabet(&self) -> &[char] {
        &CANONICAL_ALPHABET
    }

    fn may_pair(&self, a: char, b: char) -> Result<bool, FoldError> {
        for symbol in [a, b] {
            if !CANONICAL_ALPHABET.contains(&symbol) {
                return Err(FoldError::UnknownSymbol(symbol));
            }
        }
        Ok(matches!(
            (a, b),
            ('A', 'U') | ('U', 'A') | ('G', 'C') | ('C', 'G') | ('G', 'U') | ('U', 'G')
        ))
    }
}

/// A pairing rule backed by an adjacency matrix over an arbitrary alphabet.
///
/// Symbol `i` may pair symbol `j` iff `matrix[(i, j)]`. The diagonal decides
/// whether a symbol pairs with itself.
#[derive(Debug, Clone)]
pub struct AdjacencyPairing {
    alphabet: Vec<char>,
    index: AHashMap<char, usize>,
    matrix: Array2<bool>,
}

impl AdjacencyPairing {
    /// Validate and wrap an adjacency matrix for the given alphabet.
    pub fn new(alphabet: &str, matrix: Array2<bool>) -> Result<Self, FoldError> {
        let symbols: Vec<char> = alphabet.chars().collect();
        let mut index = AHashMap::default();
        for (i, &c) in symbols.iter().enumerate() {
            if index.insert(c, i).is_some() {
                return Err(FoldError::DuplicateSymbol(c));
            }
        }
        let (rows, cols) = matrix.dim();
        if rows != symbols.len() || cols != symbols.len() {
            return Err(FoldError::AlphabetMismatch {
                symbols: symbols.len(),
                rows,
                cols,
            });
        }
        for a in 0..rows {
            for b in a + 1..rows {
                if matrix[(a, b)] != matrix[(b, a)] {
                    return Err(FoldError::AsymmetricRule { a, b });
                }
            }
        }
        Ok(Self {
            alphabet: symbols,
            index,
            matrix,
        })
    }

    /// Parse the graph with the given id out of a resource text.
    pub fn from_graph_str(alphabet: &str, text: &str, id: i64) -> Result<Self, FoldError> {
        let order = alphabet.chars().count();
        let matrix = parse_graph_resource(text, order, id)?;
        Self::new(alphabet, matrix)
    }

    /// Load `graph{n}.adj` from a resource directory, `n` being the
    /// alphabet size, and parse the graph with the given id.
    pub fn from_graph_dir(alphabet: &str, dir: &Path, id: i64) -> Result<Self, FoldError> {
        let order = alphabet.chars().count();
        let path = dir.join(format!("graph{}.adj", order));
        let text = fs::read_to_string(path)?;
        Self::from_graph_str(alphabet, &text, id)
    }
}

impl PairingRule for AdjacencyPairing {
    fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    fn may_pair(&self, a: char, b: char) -> Result<bool, FoldError> {
        let ia = *self
            .index
            .get(&a)
            .ok_or(FoldError::UnknownSymbol(a))?;
        let ib = *self
            .index
            .get(&b)
            .ok_or(FoldError::UnknownSymbol(b))?;
        Ok(self.matrix[(ia, ib)])
    }
}

/// Scan a resource for `Graph <id>, order <order>.` and read its rows.
fn parse_graph_resource(text: &str, order: usize, id: i64) -> Result<Array2<bool>, FoldError> {
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());
    while let Some(line) = lines.next() {
        let (graph_id, graph_order) = parse_graph_header(line)?;
        if graph_id != id {
            // Skip the adjacency rows of a graph we are not after.
            for _ in 0..graph_order {
                lines.next();
            }
            continue;
        }
        if graph_order != order {
            return Err(FoldError::AlphabetMismatch {
                symbols: order,
                rows: graph_order,
                cols: graph_order,
            });
        }
        let mut matrix = Array2::from_elem((order, order), false);
        for row in 0..order {
            let digits = lines.next().ok_or_else(|| {
                FoldError::MalformedResource(format!("graph {graph_id} is truncated"))
            })?;
            if digits.chars().count() != order {
                return Err(FoldError::MalformedResource(format!(
                    "graph {graph_id}, row {row}: expected {order} digits, found '{digits}'"
                )));
            }
            for (col, digit) in digits.chars().enumerate() {
                matrix[(row, col)] = match digit {
                    '0' => false,
                    '1' => true,
                    other => {
                        return Err(FoldError::MalformedResource(format!(
                            "graph {graph_id}, row {row}: unexpected digit '{other}'"
                        )));
                    }
                };
            }
        }
        return Ok(matrix);
    }
    Err(FoldError::GraphNotFound { order, id })
}

fn parse_graph_header(line: &str) -> Result<(i64, usize), FoldError> {
    let malformed =
        || FoldError::MalformedResource(format!("expected a graph header, found '{line}'"));
    let rest = line.strip_prefix("Graph ").ok_or_else(malformed)?;
    let (id_part, order_part) = rest.split_once(',').ok_or_else(malformed)?;
    let id = id_part.trim().parse::<i64>().map_err(|_| malformed())?;
    let order = order_part
        .trim()
        .strip_prefix("order ")
        .and_then(|s| s.trim_end_matches('.').parse::<usize>().ok())
        .ok_or_else(malformed)?;
    Ok((id, order))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_GRAPHS: &str = "\
Graph 1, order 2.
00
00
Graph 2, order 2.
01
10
";

    #[test]
    fn test_canonical_table() {
        let rule = CanonicalPairing::new();
        for (a, b) in [('A', 'U'), ('U', 'A'), ('G', 'C'), ('C', 'G'), ('G', 'U'), ('U', 'G')] {
            assert!(rule.may_pair(a, b).unwrap(), "{a}-{b} should pair");
        }
        for (a, b) in [('A', 'A'), ('A', 'G'), ('A', 'C'), ('U', 'U'), ('U', 'C'), ('C', 'C')] {
            assert!(!rule.may_pair(a, b).unwrap(), "{a}-{b} should not pair");
        }
    }

    #[test]
    fn test_canonical_unknown_symbol() {
        let rule = CanonicalPairing::new();
        assert!(matches!(
            rule.may_pair('A', 'X'),
            Err(FoldError::UnknownSymbol('X'))
        ));
    }

    #[test]
    fn test_adjacency_rule() {
        let matrix =
            Array2::from_shape_vec((2, 2), vec![true, true, true, false]).unwrap();
        let rule = AdjacencyPairing::new("AB", matrix).unwrap();
        assert_eq!(rule.alphabet(), &['A', 'B']);
        assert!(rule.may_pair('A', 'A').unwrap()); // self-pairing is allowed here
        assert!(rule.may_pair('A', 'B').unwrap());
        assert!(rule.may_pair('B', 'A').unwrap());
        assert!(!rule.may_pair('B', 'B').unwrap());
        assert!(matches!(
            rule.may_pair('C', 'A'),
            Err(FoldError::UnknownSymbol('C'))
        ));
    }

    #[test]
    fn test_adjacency_rejects_asymmetry() {
        let matrix =
            Array2::from_shape_vec((2, 2), vec![false, true, false, false]).unwrap();
        assert!(matches!(
            AdjacencyPairing::new("AB", matrix),
            Err(FoldError::AsymmetricRule { a: 0, b: 1 })
        ));
    }

    #[test]
    fn test_adjacency_rejects_duplicate_symbols() {
        let matrix = Array2::from_elem((2, 2), false);
        assert!(matches!(
            AdjacencyPairing::new("AA", matrix),
            Err(FoldError::DuplicateSymbol('A'))
        ));
    }

    #[test]
    fn test_adjacency_rejects_size_mismatch() {
        let matrix = Array2::from_elem((3, 3), false);
        assert!(matches!(
            AdjacencyPairing::new("AB", matrix),
            Err(FoldError::AlphabetMismatch { symbols: 2, rows: 3, cols: 3 })
        ));
    }

    #[test]
    fn test_graph_resource_lookup() {
        let rule = AdjacencyPairing::from_graph_str("AB", TWO_GRAPHS, 2).unwrap();
        assert!(rule.may_pair('A', 'B').unwrap());
        assert!(!rule.may_pair('A', 'A').unwrap());

        // Graph 1 is the edgeless one.
        let rule = AdjacencyPairing::from_graph_str("AB", TWO_GRAPHS, 1).unwrap();
        assert!(!rule.may_pair('A', 'B').unwrap());
    }

    #[test]
    fn test_graph_resource_not_found() {
        assert!(matches!(
            AdjacencyPairing::from_graph_str("AB", TWO_GRAPHS, 7),
            Err(FoldError::GraphNotFound { order: 2, id: 7 })
        ));
    }

    #[test]
    fn test_graph_resource_malformed() {
        let bad_header = "Graph one, order 2.\n00\n00\n";
        assert!(matches!(
            AdjacencyPairing::from_graph_str("AB", bad_header, 1),
            Err(FoldError::MalformedResource(_))
        ));

        let bad_row = "Graph 1, order 2.\n0x\n00\n";
        assert!(matches!(
            AdjacencyPairing::from_graph_str("AB", bad_row, 1),
            Err(FoldError::MalformedResource(_))
        ));

        let short_row = "Graph 1, order 2.\n0\n00\n";
        assert!(matches!(
            AdjacencyPairing::from_graph_str("AB", short_row, 1),
            Err(FoldError::MalformedResource(_))
        ));
    }
}
