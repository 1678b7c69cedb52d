//! The subfold command line interface.
//!
//! `subfold fold` prints every structure of one sequence, `subfold map`
//! folds a genotype file into a genotype-phenotype map.

mod mapping;

use std::fs;
use std::io;
use std::io::BufRead;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use env_logger::Env;
use log::warn;

use sf_folding::AdjacencyPairing;
use sf_folding::CanonicalPairing;
use sf_folding::FoldError;
use sf_folding::FoldMatrix;
use sf_folding::PairingRule;

use crate::mapping::PhenotypeMap;


#[derive(Parser, Debug)]
#[command(
    version,
    about = "Base-pair maximization folding with exhaustive suboptimal structures."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fold a single sequence and print its structures.
    Fold(FoldArgs),
    /// Fold every genotype in a file into a genotype-phenotype map.
    Map(MapArgs),
}

#[derive(Args, Debug)]
struct PairingArgs {
    /// Symbols of the pairing alphabet, in adjacency-matrix row order.
    #[arg(short, long, default_value = "AUGC")]
    alphabet: String,

    /// Graph id inside the pairing resource; -1 selects the built-in
    /// canonical rule (A-U, G-C, G-U).
    #[arg(short, long, default_value_t = -1, allow_negative_numbers = true)]
    pairing: i64,

    /// Directory holding the graph{n}.adj pairing resources.
    #[arg(short, long)]
    graph_path: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FoldArgs {
    /// The sequence to fold.
    #[arg(short = 'r', long)]
    sequence: String,

    /// Minimum number of unpaired positions enclosed by a pair.
    #[arg(short, long, default_value_t = 1)]
    min_loop_size: usize,

    /// Also print suboptimal structures within this many pairs
    /// of the optimum.
    #[arg(short, long, default_value_t = 0)]
    suboptimal: usize,

    /// Stop after this many structures.
    #[arg(short = 'z', long)]
    structures_max: Option<usize>,

    #[command(flatten)]
    pairing: PairingArgs,
}

#[derive(Args, Debug)]
struct MapArgs {
    /// File with one genotype per line.
    #[arg(short, long)]
    input: PathBuf,

    /// Write the map here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Minimum number of unpaired positions enclosed by a pair.
    #[arg(short, long, default_value_t = 1)]
    min_loop_size: usize,

    /// Tolerated distance from the optimal pair count.
    #[arg(short, long, default_value_t = 0)]
    suboptimal: usize,

    /// Stop each enumeration after this many structures.
    #[arg(short = 'z', long)]
    structures_max: Option<usize>,

    #[command(flatten)]
    pairing: PairingArgs,
}

/// The pairing rule picked on the command line.
enum Rule {
    Canonical(CanonicalPairing),
    Adjacency(AdjacencyPairing),
}

impl PairingRule for Rule {
    fn alphabet(&self) -> &[char] {
        match self {
            Rule::Canonical(rule) => rule.alphabet(),
            Rule::Adjacency(rule) => rule.alphabet(),
        }
    }

    fn may_pair(&self, a: char, b: char) -> Result<bool, FoldError> {
        match self {
            Rule::Canonical(rule) => rule.may_pair(a, b),
            Rule::Adjacency(rule) => rule.may_pair(a, b),
        }
    }
}

impl PairingArgs {
    fn build_rule(&self) -> Result<Rule> {
        if self.pairing == -1 {
            if self.alphabet != "AUGC" {
                bail!(
                    "the canonical rule (--pairing -1) only covers the AUGC alphabet, \
                     not '{}'; pick a graph id and resource instead",
                    self.alphabet
                );
            }
            return Ok(Rule::Canonical(CanonicalPairing::new()));
        }
        let dir = self.graph_path.as_deref().with_context(|| {
            format!(
                "--pairing {} needs --graph-path to locate the graph resources",
                self.pairing
            )
        })?;
        let rule = AdjacencyPairing::from_graph_dir(&self.alphabet, dir, self.pairing)
            .with_context(|| {
                format!(
                    "loading pairing graph {} for alphabet '{}'",
                    self.pairing, self.alphabet
                )
            })?;
        Ok(Rule::Adjacency(rule))
    }
}

fn run_fold(args: &FoldArgs) -> Result<()> {
    let rule = args.pairing.build_rule()?;
    let fold = FoldMatrix::fill(&args.sequence, &rule, args.min_loop_size)
        .with_context(|| format!("folding '{}'", args.sequence))?;
    let mut stdout = io::stdout().lock();
    for dbv in fold.subopt_structs(args.suboptimal, args.structures_max) {
        writeln!(stdout, "{dbv}")?;
    }
    Ok(())
}

fn run_map(args: &MapArgs) -> Result<()> {
    let rule = args.pairing.build_rule()?;
    let file = fs::File::open(&args.input)
        .with_context(|| format!("opening {}", args.input.display()))?;

    let mut map = PhenotypeMap::new();
    for (genotype_id, line) in io::BufReader::new(file).lines().enumerate() {
        let line = line?;
        let genotype = line.trim();
        if genotype.is_empty() {
            // The id is consumed anyway so later ids keep matching
            // the line numbers of the input.
            warn!("skipping blank genotype line {genotype_id}");
            continue;
        }
        let fold = FoldMatrix::fill(genotype, &rule, args.min_loop_size)
            .with_context(|| format!("folding genotype {genotype_id} ('{genotype}')"))?;
        for dbv in fold.subopt_structs(args.suboptimal, args.structures_max) {
            map.record(genotype_id, &dbv.to_string());
        }
    }

    match &args.output {
        Some(path) => {
            let mut out = fs::File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            map.write_to(&mut out)?;
        }
        None => map.write_to(&mut io::stdout().lock())?,
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    match &cli.command {
        Commands::Fold(args) => run_fold(args),
        Commands::Map(args) => run_map(args),
    }
}
