//! Construction errors.

/// Rejected gene pool parameters.
///
/// Returned by [`GenePoolConfig::validate`](super::GenePoolConfig::validate)
/// and by every constructor that goes through it. Parameters are never
/// clamped into range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenePoolError {
    #[error("population_size must be at least 1")]
    EmptyPopulation,

    #[error("genome_length must be at least 1")]
    EmptyGenome,

    #[error("elite_fraction must be between 0.0 and 0.5, got {0}")]
    EliteFractionOutOfRange(f64),

    #[error("max_generations must be at least 1")]
    NoGenerations,
}
