//! The generational engine.
//!
//! [`GenePool`] owns the population, its random source, and two scratch
//! buffers (parent index table and next generation) that live as long as the
//! pool, so a generation allocates nothing.

use super::config::GenePoolConfig;
use super::error::GenePoolError;
use super::genome::Genome;
use super::types::{Evaluator, Gene, Score};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fmt;
use tracing::debug;

/// Pools with more genomes than this are rendered abbreviated.
const DISPLAY_GENOME_LIMIT: usize = 20;

/// Number of leading/trailing genomes shown in abbreviated rendering.
const DISPLAY_GENOME_EDGE: usize = 5;

/// A population of genomes evolved one generation at a time.
///
/// The caller alternates [`evaluate`](Self::evaluate), which scores and
/// ranks the population, and [`evolve`](Self::evolve), which replaces it with
/// the next generation. [`best`](Self::best) is the top-ranked genome of the
/// last evaluation.
///
/// # Usage
///
/// ```
/// use rand::Rng;
/// use u_genepool::ga::{Gene, GenePool, GenePoolConfig, Genome};
///
/// #[derive(Clone, Debug)]
/// struct Step(i32);
///
/// impl Gene for Step {
///     fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
///         Step(rng.random_range(-5..=5))
///     }
///     fn mutate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
///         self.0 += rng.random_range(-5..=5);
///     }
///     fn crossover(a: &Self, b: &Self) -> Self {
///         Step((a.0 + b.0) / 2)
///     }
/// }
///
/// let config = GenePoolConfig::new(10, 7, 0.3).with_seed(42);
/// let mut pool: GenePool<Step, f64> = GenePool::new(&config)?;
/// let closeness = |g: &Genome<Step, f64>| {
///     let sum: i32 = g.genes().iter().map(|s| s.0).sum();
///     -(sum - 6).abs() as f64
/// };
///
/// pool.evaluate(&closeness);
/// for _ in 0..10 {
///     pool.evolve();
///     pool.evaluate(&closeness);
/// }
/// assert_eq!(pool.generations(), 10);
/// # Ok::<(), u_genepool::ga::GenePoolError>(())
/// ```
pub struct GenePool<G, S, R = StdRng> {
    genomes: Vec<Genome<G, S>>,
    genome_length: usize,
    elite_count: usize,
    retain_count: usize,
    parallel: bool,
    rng: R,
    generation: usize,

    // scratch, reused every generation
    shuffle_indices: Vec<usize>,
    next_generation: Vec<Genome<G, S>>,
}

impl<G: Gene, S: Score, R: Rng + SeedableRng> GenePool<G, S, R> {
    /// Creates a pool of random, unscored genomes.
    ///
    /// The random source is seeded from `config.seed`, or from
    /// `rand::random()` when no seed is set.
    pub fn new(config: &GenePoolConfig) -> Result<Self, GenePoolError> {
        let rng = match config.seed {
            Some(seed) => R::seed_from_u64(seed),
            None => R::seed_from_u64(rand::random()),
        };
        Self::with_rng(config, rng)
    }
}

impl<G: Gene, S: Score, R: Rng> GenePool<G, S, R> {
    /// Creates a pool of random, unscored genomes drawing from `rng`.
    ///
    /// `config.seed` and the run limits are ignored.
    pub fn with_rng(config: &GenePoolConfig, mut rng: R) -> Result<Self, GenePoolError> {
        config.validate_shape()?;

        let n = config.population_size;
        let genomes: Vec<Genome<G, S>> = (0..n)
            .map(|_| Genome::random(config.genome_length, &mut rng))
            .collect();
        let next_generation = genomes.clone();

        debug!(
            population_size = n,
            genome_length = config.genome_length,
            elite_count = config.elite_count(),
            "gene pool created"
        );

        Ok(Self {
            genomes,
            genome_length: config.genome_length,
            elite_count: config.elite_count(),
            retain_count: config.retain_count(),
            parallel: config.parallel,
            rng,
            generation: 0,
            shuffle_indices: (0..n).collect(),
            next_generation,
        })
    }

    /// Scores every genome with `evaluator`, then ranks the population by
    /// score, best first.
    ///
    /// Previous scores are replaced. Must run before [`best`](Self::best)
    /// is meaningful and before each [`evolve`](Self::evolve).
    pub fn evaluate<E: Evaluator<G, S>>(&mut self, evaluator: &E) {
        score_all(&mut self.genomes, evaluator, self.parallel);
        self.genomes.sort_unstable_by(|a, b| b.cmp_score(a));

        debug!(
            generation = self.generation,
            best_score = self.genomes[0].score(),
            worst_score = self.genomes[self.genomes.len() - 1].score(),
            "population evaluated"
        );
    }

    /// Replaces the population with the next generation.
    ///
    /// 1. Shuffle the parent index table past the elite slots.
    /// 2. Copy its first half over its second half.
    /// 3. Shuffle the second half; child `i` is the crossover of the parents
    ///    at `i` and `i + half`.
    /// 4. Shuffle the second half again; child `i + half` likewise.
    /// 5. Mutate one random gene of every child.
    /// 6. Swap the generations.
    ///
    /// The index table is never reset, so slot positions carry over between
    /// generations. Elite genomes are not copied through; they stay fixed in
    /// the first half of the table and so are paired more often.
    ///
    /// Does not evaluate the new generation.
    pub fn evolve(&mut self) {
        let n = self.genomes.len();
        let half = n / 2;

        self.shuffle_indices[self.elite_count..].shuffle(&mut self.rng);
        self.shuffle_indices.copy_within(..half, half);

        self.shuffle_indices[half..].shuffle(&mut self.rng);
        self.breed(0, half);

        self.shuffle_indices[half..].shuffle(&mut self.rng);
        self.breed(half, half);

        // no pairing writes the trailing slot of an odd-sized pool
        if n % 2 == 1 {
            self.next_generation[n - 1].clone_from(&self.genomes[0]);
            self.next_generation[n - 1].set_scorer(S::default());
        }

        for genome in &mut self.next_generation {
            let index = self.rng.random_range(0..self.genome_length);
            genome.mutate(index, &mut self.rng);
        }

        std::mem::swap(&mut self.genomes, &mut self.next_generation);
        self.generation += 1;

        debug!(
            generation = self.generation,
            elite_count = self.elite_count,
            "generation evolved"
        );
    }

    /// Writes `half` children into `next_generation[offset..]`, pairing the
    /// index table's first half with its second half.
    fn breed(&mut self, offset: usize, half: usize) {
        for i in 0..half {
            let cut = self.rng.random_range(0..=self.genome_length);
            let a = &self.genomes[self.shuffle_indices[i]];
            let b = &self.genomes[self.shuffle_indices[i + half]];
            Genome::crossover_into(a, b, &mut self.next_generation[offset + i], cut);
        }
    }

    /// Rotates the genes of every genome left by `n` places.
    pub fn shift(&mut self, n: usize) {
        for genome in &mut self.genomes {
            genome.shift(n);
        }
    }
}

impl<G, S: Score, R> GenePool<G, S, R> {
    /// The top-ranked genome of the last evaluation.
    ///
    /// Before the first [`evaluate`](Self::evaluate) this is an arbitrary,
    /// unscored genome.
    pub fn best(&self) -> &Genome<G, S> {
        &self.genomes[0]
    }

    /// Number of [`evolve`](Self::evolve) calls since creation or the last
    /// [`reset`](Self::reset).
    pub fn generations(&self) -> usize {
        self.generation
    }

    /// Resets the generation counter to zero.
    pub fn reset(&mut self) {
        self.generation = 0;
    }

    /// The population, best first after an evaluation.
    pub fn genomes(&self) -> &[Genome<G, S>] {
        &self.genomes
    }

    /// Iterates over the population, best first after an evaluation.
    pub fn iter(&self) -> std::slice::Iter<'_, Genome<G, S>> {
        self.genomes.iter()
    }

    /// Population size.
    pub fn len(&self) -> usize {
        self.genomes.len()
    }

    /// Always `false`; a pool holds at least one genome.
    pub fn is_empty(&self) -> bool {
        self.genomes.is_empty()
    }

    /// Genes per genome.
    pub fn genome_length(&self) -> usize {
        self.genome_length
    }

    /// Number of leading index slots exempt from the selection shuffle.
    pub fn elite_count(&self) -> usize {
        self.elite_count
    }

    /// `floor(N * (0.5 - elite_fraction))`. Not used by selection.
    pub fn retain_count(&self) -> usize {
        self.retain_count
    }
}

impl<'a, G, S: Score, R> IntoIterator for &'a GenePool<G, S, R> {
    type Item = &'a Genome<G, S>;
    type IntoIter = std::slice::Iter<'a, Genome<G, S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Attach a fresh score to every genome.
fn score_all<G: Gene, S: Score, E: Evaluator<G, S>>(
    genomes: &mut [Genome<G, S>],
    evaluator: &E,
    parallel: bool,
) {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        if parallel {
            genomes.par_iter_mut().for_each(|genome| {
                let score = evaluator.evaluate(genome);
                genome.set_scorer(score);
            });
            return;
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    for genome in genomes.iter_mut() {
        let score = evaluator.evaluate(genome);
        genome.set_scorer(score);
    }
}

impl<G: fmt::Display, S: Score, R> fmt::Display for GenePool<G, S, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.genomes.len();
        writeln!(f, "GenePool [{n} genomes]")?;
        writeln!(f, "{{")?;
        writeln!(f, "  generations: {}", self.generation)?;
        writeln!(f, "  genomes:")?;
        if n > DISPLAY_GENOME_LIMIT {
            for genome in &self.genomes[..DISPLAY_GENOME_EDGE] {
                writeln!(f, "    {:.4} {genome}", genome.score())?;
            }
            writeln!(f, "    ...")?;
            for genome in &self.genomes[n - DISPLAY_GENOME_EDGE..] {
                writeln!(f, "    {:.4} {genome}", genome.score())?;
            }
        } else {
            for genome in &self.genomes {
                writeln!(f, "    {:.4} {genome}", genome.score())?;
            }
        }
        write!(f, "\n}}")
    }
}
