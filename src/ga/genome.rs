//! Candidate solutions.
//!
//! A [`Genome`] is a fixed-length sequence of [`Gene`]s plus the [`Score`]
//! the evaluator attached to it last.

use super::types::{Gene, Score};
use rand::Rng;
use std::cmp::Ordering;
use std::fmt;

/// Genomes with at least this many genes are rendered abbreviated.
const DISPLAY_GENE_LIMIT: usize = 30;

/// Number of leading/trailing genes shown in abbreviated rendering.
const DISPLAY_GENE_EDGE: usize = 5;

/// One individual of a [`GenePool`](super::GenePool).
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use u_genepool::ga::Genome;
/// # use rand::Rng;
/// # use u_genepool::ga::Gene;
/// # #[derive(Clone, Debug)]
/// # struct Step(i32);
/// # impl Gene for Step {
/// #     fn random<R: Rng + ?Sized>(rng: &mut R) -> Self { Step(rng.random_range(-5..=5)) }
/// #     fn mutate<R: Rng + ?Sized>(&mut self, rng: &mut R) { self.0 += rng.random_range(-5..=5) }
/// #     fn crossover(a: &Self, b: &Self) -> Self { Step((a.0 + b.0) / 2) }
/// # }
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let genome: Genome<Step, f64> = Genome::random(7, &mut rng);
/// assert_eq!(genome.len(), 7);
/// assert_eq!(genome.score(), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct Genome<G, S> {
    genes: Vec<G>,
    scorer: S,
}

impl<G: Gene, S: Score> Genome<G, S> {
    /// Creates a genome of `len` independently drawn genes, unscored.
    pub fn random<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Self {
        let genes = (0..len).map(|_| G::random(rng)).collect();
        Self::from_genes(genes)
    }

    /// Wraps existing genes into an unscored genome.
    pub fn from_genes(genes: Vec<G>) -> Self {
        Self {
            genes,
            scorer: S::default(),
        }
    }

    /// Crossover of `a` and `b` at `cut` into a new genome.
    ///
    /// See [`crossover_into`](Self::crossover_into).
    pub fn crossover(a: &Self, b: &Self, cut: usize) -> Self {
        let mut child = Self::from_genes(a.genes.clone());
        Self::crossover_into(a, b, &mut child, cut);
        child
    }

    /// Crossover of `a` and `b` at `cut`, written into `child`.
    ///
    /// Genes `[0, cut)` are `G::crossover(a[i], b[i])`, genes `[cut, len)`
    /// are `G::crossover(b[i], a[i])`. The child's score is reset. When the
    /// child already has the parents' length its gene storage is reused.
    ///
    /// # Panics
    /// Panics if the parents differ in length or `cut > a.len()`.
    pub fn crossover_into(a: &Self, b: &Self, child: &mut Self, cut: usize) {
        let n = a.genes.len();
        assert_eq!(n, b.genes.len(), "parents must have equal length");
        assert!(cut <= n, "cut point {cut} out of range for length {n}");

        if child.genes.len() != n {
            child.genes.clone_from(&a.genes);
        }

        let (head, tail) = child.genes.split_at_mut(cut);
        for (i, out) in head.iter_mut().enumerate() {
            G::crossover_into(&a.genes[i], &b.genes[i], out);
        }
        for (i, out) in tail.iter_mut().enumerate() {
            let j = cut + i;
            G::crossover_into(&b.genes[j], &a.genes[j], out);
        }
        child.scorer = S::default();
    }

    /// Mutates the gene at `index` in place.
    ///
    /// # Panics
    /// Panics if `index >= len()`.
    pub fn mutate<R: Rng + ?Sized>(&mut self, index: usize, rng: &mut R) {
        self.genes[index].mutate(rng);
    }

    /// Rotates the genes left by `n` places.
    ///
    /// Useful when the genome encodes a window over a running process whose
    /// starting point moves on. `n` wraps around the genome length.
    pub fn shift(&mut self, n: usize) {
        if self.genes.is_empty() {
            return;
        }
        let n = n % self.genes.len();
        self.genes.rotate_left(n);
    }
}

impl<G, S: Score> Genome<G, S> {
    /// Number of genes.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Whether the genome has no genes.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// The genes, in order.
    pub fn genes(&self) -> &[G] {
        &self.genes
    }

    /// The attached score.
    ///
    /// Equals `S::default()` until the genome has been evaluated.
    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    /// Mutable access to the attached score.
    pub fn scorer_mut(&mut self) -> &mut S {
        &mut self.scorer
    }

    /// Replaces the attached score.
    pub fn set_scorer(&mut self, scorer: S) {
        self.scorer = scorer;
    }

    /// Shorthand for `self.scorer().score()`.
    pub fn score(&self) -> f64 {
        self.scorer.score()
    }

    /// Orders two genomes by their scalar score. NaN compares equal.
    pub fn cmp_score(&self, other: &Self) -> Ordering {
        self.score()
            .partial_cmp(&other.score())
            .unwrap_or(Ordering::Equal)
    }
}

impl<G: fmt::Display, S> fmt::Display for Genome<G, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.genes.len();
        write!(f, "[ ")?;
        if n < DISPLAY_GENE_LIMIT {
            for gene in &self.genes {
                write!(f, "{gene}, ")?;
            }
        } else {
            for gene in &self.genes[..DISPLAY_GENE_EDGE] {
                write!(f, "{gene}, ")?;
            }
            write!(f, "... ")?;
            for gene in &self.genes[n - DISPLAY_GENE_EDGE..] {
                write!(f, "{gene}, ")?;
            }
        }
        write!(f, "]")
    }
}
