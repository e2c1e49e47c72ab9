//! Core trait definitions for the gene pool.
//!
//! Three contracts separate the generic engine from the problem:
//!
//! - [`Gene`]: the elementary unit a [`Genome`] is made of
//! - [`Score`]: the fitness value the evaluator attaches to a genome
//! - [`Evaluator`]: computes a [`Score`] for one genome
//!
//! The concrete types are fixed per [`GenePool`](super::GenePool) instance, so
//! everything is dispatched statically.

use super::genome::Genome;
use rand::Rng;

/// An elementary unit (allele) of a [`Genome`].
///
/// # Implementing
///
/// ```
/// use rand::Rng;
/// use u_genepool::ga::Gene;
///
/// #[derive(Clone, Debug, Default)]
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
/// ```
pub trait Gene: Clone + Send + Sync {
    /// Draws a fresh unit.
    ///
    /// Should use the same distribution as the deltas applied by
    /// [`mutate`](Gene::mutate).
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self;

    /// Applies one stochastic perturbation in place.
    fn mutate<R: Rng + ?Sized>(&mut self, rng: &mut R);

    /// Combines two parent units into a child unit.
    ///
    /// Operand order matters: the genome crossover calls this with swapped
    /// operands past the cut point.
    fn crossover(a: &Self, b: &Self) -> Self;

    /// Writes the combination of `a` and `b` into `out`.
    ///
    /// Override when the unit owns heap storage that can be reused.
    fn crossover_into(a: &Self, b: &Self, out: &mut Self) {
        *out = Self::crossover(a, b);
    }
}

/// Fitness value attached to a [`Genome`].
///
/// Higher [`score`](Score::score) is better. [`Default`] is the
/// "not yet evaluated" value.
///
/// Built-in implementations exist for `f64` and `f32`. Implement it on a
/// struct to carry a domain-specific payload next to the scalar.
pub trait Score: Default + Clone + Send + Sync {
    /// Builds a score from a bare scalar.
    fn from_score(score: f64) -> Self;

    /// The scalar used for ranking.
    fn score(&self) -> f64;
}

impl Score for f64 {
    fn from_score(score: f64) -> Self {
        score
    }

    fn score(&self) -> f64 {
        *self
    }
}

impl Score for f32 {
    fn from_score(score: f64) -> Self {
        score as f32
    }

    fn score(&self) -> f64 {
        *self as f64
    }
}

/// Computes the score of a genome.
///
/// The engine calls [`evaluate`](Evaluator::evaluate) once per genome per
/// evaluation pass and attaches the returned score, replacing the old one.
/// Genomes are handed out by shared reference, so an evaluator can read but
/// never alter the genes.
///
/// Must be `Sync` because the `parallel` feature may score genomes from
/// several threads.
pub trait Evaluator<G: Gene, S: Score>: Sync {
    /// Scores one genome.
    fn evaluate(&self, genome: &Genome<G, S>) -> S;
}

impl<G, S, F> Evaluator<G, S> for F
where
    G: Gene,
    S: Score,
    F: Fn(&Genome<G, S>) -> S + Sync,
{
    fn evaluate(&self, genome: &Genome<G, S>) -> S {
        self(genome)
    }
}
