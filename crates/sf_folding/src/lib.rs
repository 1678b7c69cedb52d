//! The sf_folding crate.
//!
//! Provides base-pair maximization folding for sequences over a
//! configurable alphabet:
//!  - pairing rules, canonical or read from adjacency matrices
//!  - the Nussinov-style fold matrix with deterministic traceback.
//!  - exhaustive suboptimal structure enumeration (Wuchty).
//!

mod error;
mod pairing;
mod structure_state;
mod folding;
mod subopt;

pub use error::*;
pub use pairing::*;
pub use structure_state::*;
pub use folding::*;
pub use subopt::*;
