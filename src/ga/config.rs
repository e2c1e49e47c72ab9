//! Gene pool configuration.
//!
//! [`GenePoolConfig`] holds the construction parameters of a
//! [`GenePool`](super::GenePool) and the termination conditions used by
//! [`GenePoolRunner`](super::GenePoolRunner).

use super::error::GenePoolError;

/// Configuration for a gene pool.
///
/// # Defaults
///
/// ```
/// use u_genepool::ga::GenePoolConfig;
///
/// let config = GenePoolConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.genome_length, 10);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_genepool::ga::GenePoolConfig;
///
/// let config = GenePoolConfig::new(10, 7, 0.3)
///     .with_seed(42)
///     .with_max_generations(100)
///     .with_target_score(10.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenePoolConfig {
    /// Number of genomes in the pool.
    ///
    /// Even sizes pair every genome; an odd size leaves one slot per
    /// generation that is refilled from the current best genome.
    pub population_size: usize,

    /// Number of genes per genome. Fixed for the lifetime of the pool.
    pub genome_length: usize,

    /// Fraction of top-ranked genomes exempt from the selection shuffle
    /// (0.0–0.5).
    ///
    /// Elites are not copied through unchanged; they keep their slot in the
    /// parent index table and so take part in pairings more often.
    pub elite_fraction: f64,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Whether to evaluate genomes in parallel using rayon.
    ///
    /// Only honored when the crate is built with the `parallel` feature.
    pub parallel: bool,

    /// Maximum number of evolve/evaluate cycles the runner performs.
    pub max_generations: usize,

    /// The runner stops as soon as the best score reaches this value.
    pub target_score: Option<f64>,

    /// Number of generations without a better best score before the runner
    /// stops.
    ///
    /// Set to 0 to disable stagnation-based termination.
    pub stagnation_limit: usize,
}

impl Default for GenePoolConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            genome_length: 10,
            elite_fraction: 0.1,
            seed: None,
            parallel: false,
            max_generations: 100,
            target_score: None,
            stagnation_limit: 0,
        }
    }
}

impl GenePoolConfig {
    /// Configuration with the three shape parameters set.
    pub fn new(population_size: usize, genome_length: usize, elite_fraction: f64) -> Self {
        Self {
            population_size,
            genome_length,
            elite_fraction,
            ..Self::default()
        }
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the genome length.
    pub fn with_genome_length(mut self, n: usize) -> Self {
        self.genome_length = n;
        self
    }

    /// Sets the elite fraction. Out-of-range values are reported by
    /// [`validate`](Self::validate), not clamped.
    pub fn with_elite_fraction(mut self, fraction: f64) -> Self {
        self.elite_fraction = fraction;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the score at which the runner stops early.
    pub fn with_target_score(mut self, score: f64) -> Self {
        self.target_score = Some(score);
        self
    }

    /// Sets the stagnation limit (0 to disable).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// `floor(population_size * elite_fraction)`.
    pub fn elite_count(&self) -> usize {
        (self.population_size as f64 * self.elite_fraction) as usize
    }

    /// `floor(population_size * (0.5 - elite_fraction))`.
    ///
    /// Informational only; selection does not read it.
    pub fn retain_count(&self) -> usize {
        (self.population_size as f64 * (0.5 - self.elite_fraction)) as usize
    }

    /// Validates the population shape: size, genome length, elite fraction.
    ///
    /// This is all a [`GenePool`](super::GenePool) needs.
    pub fn validate_shape(&self) -> Result<(), GenePoolError> {
        if self.population_size == 0 {
            return Err(GenePoolError::EmptyPopulation);
        }
        if self.genome_length == 0 {
            return Err(GenePoolError::EmptyGenome);
        }
        if !(0.0..=0.5).contains(&self.elite_fraction) {
            return Err(GenePoolError::EliteFractionOutOfRange(self.elite_fraction));
        }
        Ok(())
    }

    /// Validates the whole configuration, shape and run limits.
    pub fn validate(&self) -> Result<(), GenePoolError> {
        self.validate_shape()?;
        if self.max_generations == 0 {
            return Err(GenePoolError::NoGenerations);
        }
        Ok(())
    }
}
