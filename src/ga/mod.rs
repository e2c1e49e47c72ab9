//! Generational gene pool.
//!
//! A generic engine that evolves a fixed-size population of fixed-length
//! genomes. Users plug in their problem by implementing [`Gene`] (the
//! elementary unit), optionally [`Score`] (a payload-carrying fitness), and
//! [`Evaluator`] (the simulator that scores a genome).
//!
//! # Core Traits
//!
//! - [`Gene`]: random generation, mutation, and pairwise crossover of one unit
//! - [`Score`]: scalar fitness, higher is better, `Default` means unscored
//! - [`Evaluator`]: scores a [`Genome`]; closures implement it
//!
//! # Key Types
//!
//! - [`Genome`]: one candidate solution
//! - [`GenePoolConfig`]: population shape and run limits
//! - [`GenePool`]: the engine, driven by `evaluate` / `evolve`
//! - [`GenePoolRunner`]: loops the engine to a target score or a limit
//!
//! # Selection
//!
//! Each generation pairs parents through a persistent index table whose
//! leading elite slots are never shuffled, so top-ranked genomes breed more
//! often without being copied through unchanged. Every child is the
//! cut-point crossover of two parents followed by one point mutation.

mod config;
mod error;
mod genome;
mod pool;
mod runner;
mod types;

pub use config::GenePoolConfig;
pub use error::GenePoolError;
pub use genome::Genome;
pub use pool::GenePool;
pub use runner::{GenePoolRunner, RunResult};
pub use types::{Evaluator, Gene, Score};
