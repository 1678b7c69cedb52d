//! Genotype-phenotype map accumulation.
//!
//! Folding a genotype file yields one or more phenotypes (dot-bracket
//! structures) per genotype. The map groups genotype ids by phenotype and
//! writes the exchange format consumed by downstream analysis: one line
//! `<phenotype> <id> <id> ...` per phenotype, phenotypes in first-seen
//! order and ids in input order.

use std::io;
use std::io::Write;

use ahash::AHashMap;


/// Phenotype to genotype-id grouping in first-seen phenotype order.
#[derive(Debug, Default)]
pub struct PhenotypeMap {
    order: Vec<String>,
    ids: AHashMap<String, Vec<usize>>,
}

impl PhenotypeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a genotype id to a phenotype, creating the phenotype on first
    /// sight. Ids accumulate in call order.
    pub fn record(&mut self, genotype_id: usize, phenotype: &str) {
        match self.ids.get_mut(phenotype) {
            Some(ids) => ids.push(genotype_id),
            None => {
                self.order.push(phenotype.to_string());
                self.ids.insert(phenotype.to_string(), vec![genotype_id]);
            }
        }
    }

    /// Number of distinct phenotypes.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Write one `<phenotype> <id> <id> ...` line per phenotype.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for phenotype in &self.order {
            write!(out, "{phenotype}")?;
            for id in &self.ids[phenotype.as_str()] {
                write!(out, " {id}")?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}
