//! Generic generational evolution engine.
//!
//! Provides a reusable genetic-algorithm core parameterized over the
//! encoding and the fitness evaluator:
//!
//! - **Gene pool**: a population of fixed-length genomes, evolved with
//!   elitism-biased pairing, cut-point crossover, and point mutation, reusing
//!   its buffers across generations.
//! - **Runner**: drives the evaluate/evolve cycle to a target score, a
//!   generation limit, stagnation, or cancellation.
//!
//! # Architecture
//!
//! This crate contains no domain-specific concepts. Encodings ([`ga::Gene`])
//! and simulators ([`ga::Evaluator`]) are defined by consumers.
//!
//! # Features
//!
//! - `parallel`: evaluate genomes with rayon when
//!   [`ga::GenePoolConfig::parallel`] is set.
//! - `serde`: `Serialize`/`Deserialize` for [`ga::GenePoolConfig`].

pub mod ga;
