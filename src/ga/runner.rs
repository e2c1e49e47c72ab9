//! Evaluate/evolve loop execution.
//!
//! [`GenePoolRunner`] drives a [`GenePool`] through the full cycle:
//! evaluate → (evolve → evaluate) × generations, stopping early on a target
//! score, stagnation, or cancellation.

use super::config::GenePoolConfig;
use super::error::GenePoolError;
use super::genome::Genome;
use super::pool::GenePool;
use super::types::{Evaluator, Gene, Score};
use rand::rngs::StdRng;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, instrument};

/// Result of a gene pool run.
#[derive(Debug, Clone)]
pub struct RunResult<G, S> {
    /// The best genome found during the entire run.
    pub best: Genome<G, S>,

    /// Score of `best`, the maximum of `score_history`.
    pub best_score: f64,

    /// Number of generations evolved.
    pub generations: usize,

    /// Whether the run stopped because `target_score` was reached.
    pub reached_target: bool,

    /// Whether the run was terminated due to stagnation.
    pub stagnated: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best score after the initial evaluation and after each generation.
    pub score_history: Vec<f64>,
}

/// Executes the evaluate/evolve loop.
///
/// # Usage
///
/// ```ignore
/// let config = GenePoolConfig::new(10, 7, 0.3)
///     .with_seed(42)
///     .with_target_score(10.0);
/// let result = GenePoolRunner::run::<MyGene, f64, _>(&config, &my_evaluator)?;
/// println!("best score: {}", result.best_score);
/// ```
pub struct GenePoolRunner;

impl GenePoolRunner {
    /// Builds a pool from `config` and runs it.
    pub fn run<G, S, E>(
        config: &GenePoolConfig,
        evaluator: &E,
    ) -> Result<RunResult<G, S>, GenePoolError>
    where
        G: Gene,
        S: Score,
        E: Evaluator<G, S>,
    {
        config.validate()?;
        let mut pool: GenePool<G, S, StdRng> = GenePool::new(config)?;
        Ok(Self::run_pool(&mut pool, config, evaluator, None))
    }

    /// Builds a pool from `config` and runs it with an optional
    /// cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the run stops
    /// before the next generation and returns the best genome so far.
    pub fn run_with_cancel<G, S, E>(
        config: &GenePoolConfig,
        evaluator: &E,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<RunResult<G, S>, GenePoolError>
    where
        G: Gene,
        S: Score,
        E: Evaluator<G, S>,
    {
        config.validate()?;
        let mut pool: GenePool<G, S, StdRng> = GenePool::new(config)?;
        Ok(Self::run_pool(&mut pool, config, evaluator, cancel))
    }

    /// Runs an existing pool using the termination settings of `config`.
    ///
    /// The shape fields of `config` are not consulted; the pool keeps its own.
    #[instrument(level = "debug", skip_all, fields(population_size = pool.len(), max_generations = config.max_generations))]
    pub fn run_pool<G, S, R, E>(
        pool: &mut GenePool<G, S, R>,
        config: &GenePoolConfig,
        evaluator: &E,
        cancel: Option<Arc<AtomicBool>>,
    ) -> RunResult<G, S>
    where
        G: Gene,
        S: Score,
        R: Rng,
        E: Evaluator<G, S>,
    {
        let reached = |score: f64| config.target_score.is_some_and(|t| score >= t);

        info!(
            population_size = pool.len(),
            genome_length = pool.genome_length(),
            max_generations = config.max_generations,
            "gene pool run started"
        );

        pool.evaluate(evaluator);
        let mut best = pool.best().clone();
        let mut best_score = best.score();
        let mut score_history = Vec::with_capacity(config.max_generations + 1);
        score_history.push(best_score);

        let mut generations = 0usize;
        let mut stagnation_counter = 0usize;
        let mut reached_target = reached(best_score);
        let mut stagnated = false;
        let mut cancelled = false;

        while !reached_target && generations < config.max_generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            pool.evolve();
            pool.evaluate(evaluator);
            generations += 1;

            let gen_best = pool.best().score();
            score_history.push(gen_best);
            if gen_best > best_score {
                best.clone_from(pool.best());
                best_score = gen_best;
                stagnation_counter = 0;
            } else {
                stagnation_counter += 1;
            }

            reached_target = reached(gen_best);

            if config.stagnation_limit > 0 && stagnation_counter >= config.stagnation_limit {
                stagnated = true;
                break;
            }
        }

        info!(
            generations,
            best_score,
            reached_target,
            stagnated,
            cancelled,
            "gene pool run finished"
        );

        RunResult {
            best_score,
            best,
            generations,
            reached_target,
            stagnated,
            cancelled,
            score_history,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[derive(Clone, Debug)]
    struct IntGene(i32);

    impl Gene for IntGene {
        fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
            IntGene(rng.random_range(-5..=5))
        }
        fn mutate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
            self.0 += rng.random_range(-5..=5);
        }
        fn crossover(a: &Self, b: &Self) -> Self {
            IntGene((a.0 + b.0) / 2)
        }
    }

    fn sum(genome: &Genome<IntGene, f64>) -> i32 {
        genome.genes().iter().map(|g| g.0).sum()
    }

    fn max_seeker(genome: &Genome<IntGene, f64>) -> f64 {
        let m = sum(genome);
        if m == 6 {
            10.0
        } else {
            1.0 / (m - 6).abs() as f64
        }
    }

    #[test]
    fn test_reaches_target() {
        let config = GenePoolConfig::new(10, 7, 0.3)
            .with_seed(42)
            .with_max_generations(100)
            .with_target_score(10.0);

        let result: RunResult<IntGene, f64> = GenePoolRunner::run(&config, &max_seeker).unwrap();

        assert!(result.reached_target);
        assert!(!result.stagnated);
        assert!(!result.cancelled);
        assert_eq!(result.best_score, 10.0);
        assert_eq!(sum(&result.best), 6);
        assert_eq!(result.score_history.len(), result.generations + 1);
    }

    #[test]
    fn test_returns_best_ever_genome() {
        for seed in 0..50 {
            let config = GenePoolConfig::new(10, 7, 0.3)
                .with_seed(seed)
                .with_max_generations(30)
                .with_stagnation_limit(5);

            let result: RunResult<IntGene, f64> = GenePoolRunner::run(&config, &max_seeker).unwrap();

            let peak = result.score_history.iter().copied().fold(f64::MIN, f64::max);
            assert_eq!(result.best_score, peak, "seed {seed}");
            assert_eq!(result.best.score(), peak, "seed {seed}");
            assert_eq!(max_seeker(&result.best), peak, "seed {seed}");
        }
    }

    #[test]
    fn test_zero_generations_rejected_by_run() {
        let config = GenePoolConfig::new(10, 7, 0.3).with_max_generations(0);
        let result: Result<RunResult<IntGene, f64>, _> = GenePoolRunner::run(&config, &max_seeker);
        assert_eq!(result.err(), Some(GenePoolError::NoGenerations));
    }

    #[test]
    fn test_runs_all_generations_without_target() {
        let config = GenePoolConfig::new(8, 4, 0.25)
            .with_seed(1)
            .with_max_generations(12);

        let result: RunResult<IntGene, f64> = GenePoolRunner::run(&config, &max_seeker).unwrap();

        assert_eq!(result.generations, 12);
        assert_eq!(result.score_history.len(), 13);
        assert!(!result.reached_target);
    }

    #[test]
    fn test_stagnation_stops_run() {
        let config = GenePoolConfig::new(8, 4, 0.25)
            .with_seed(2)
            .with_max_generations(500)
            .with_stagnation_limit(5);
        let flat = |_: &Genome<IntGene, f64>| 1.0;

        let result: RunResult<IntGene, f64> = GenePoolRunner::run(&config, &flat).unwrap();

        assert!(result.stagnated);
        assert_eq!(result.generations, 5);
    }

    #[test]
    fn test_cancel_before_first_generation() {
        let config = GenePoolConfig::new(8, 4, 0.25)
            .with_seed(3)
            .with_max_generations(50);
        let flag = Arc::new(AtomicBool::new(true));

        let result: RunResult<IntGene, f64> =
            GenePoolRunner::run_with_cancel(&config, &max_seeker, Some(flag)).unwrap();

        assert!(result.cancelled);
        assert_eq!(result.generations, 0);
        assert_eq!(result.score_history.len(), 1);
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let config = GenePoolConfig::new(10, 7, 0.75);
        let result: Result<RunResult<IntGene, f64>, _> = GenePoolRunner::run(&config, &max_seeker);
        assert_eq!(
            result.err().map(|e| e.to_string()),
            Some("elite_fraction must be between 0.0 and 0.5, got 0.75".to_string())
        );
    }

    #[test]
    fn test_run_existing_pool() {
        let config = GenePoolConfig::new(6, 3, 0.0)
            .with_seed(4)
            .with_max_generations(3);
        let mut pool: GenePool<IntGene, f64> = GenePool::new(&config).unwrap();

        let result = GenePoolRunner::run_pool(&mut pool, &config, &max_seeker, None);

        assert_eq!(result.generations, 3);
        assert_eq!(pool.generations(), 3);
        assert_eq!(result.best_score, pool.best().score());
    }
}
