//! Main `MorrisScreening` entry point and builder.

use std::time::Instant;

use nalgebra::DVector;
use rand::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use tracing::info;

use crate::analysis::reduce;
use crate::config::Config;
use crate::domain::BoundedDomain;
use crate::error::{MorrisError, Result};
use crate::experiment::{latin_hypercube, LhsExperiment, MorrisExperiment};
use crate::model::Model;
use crate::result::{Metadata, ScreeningResult};
use crate::types::Sample;

/// Main entry point for Morris screening.
///
/// Use the builder pattern to configure, then run against a model. A run
/// builds the design, evaluates the model once over the whole design, and
/// reduces the matched pair to elementary-effect statistics.
///
/// # Example
///
/// ```ignore
/// use morris_screening::{BoundedDomain, FnModel, MorrisScreening};
///
/// let model = FnModel::new(3, 1, |x| vec![x[0] + 2.0 * x[1] * x[2]]);
/// let domain = BoundedDomain::unit(3);
///
/// let result = MorrisScreening::new()
///     .trajectories(20)
///     .seed(42)
///     .run(&model, &domain)?;
///
/// println!("mu* = {}", result.statistics.mean_absolute_elementary_effects(0)?);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MorrisScreening {
    config: Config,
}

impl MorrisScreening {
    /// Create with default configuration.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Create from an explicit configuration.
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Set the number of trajectories.
    pub fn trajectories(mut self, n: usize) -> Self {
        self.config.trajectories = n;
        self
    }

    /// Use a `p`-level step (`1 / p` per unit-cube axis).
    pub fn levels(mut self, p: usize) -> Self {
        self.config.levels = Some(p);
        self
    }

    /// Set the size of the Latin hypercube drawn by [`MorrisScreening::run`].
    pub fn base_size(mut self, size: usize) -> Self {
        self.config.base_size = size;
        self
    }

    /// Bound the de-duplication padding loop.
    pub fn max_padding_attempts(mut self, attempts: usize) -> Self {
        self.config.max_padding_attempts = attempts;
        self
    }

    /// Set a deterministic seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Get the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Screen `model` over `domain`, drawing a fresh Latin hypercube base design.
    ///
    /// # Errors
    ///
    /// Any error from design construction, model evaluation, or reduction.
    pub fn run<M: Model + ?Sized>(&self, model: &M, domain: &BoundedDomain) -> Result<ScreeningResult> {
        check_model(model, domain)?;
        let mut rng = self.rng();
        let unit_base = latin_hypercube(self.config.base_size, domain.dimension(), &mut rng)?;
        let experiment = LhsExperiment::from_unit(unit_base, domain.clone(), self.config.trajectories)?;
        self.run_experiment(model, experiment, &mut rng)
    }

    /// Screen `model` over `domain` from a caller-supplied base design.
    ///
    /// `base_design` rows are points of `domain`; they are rescaled to the
    /// unit cube before trajectories are built.
    ///
    /// # Errors
    ///
    /// Any error from design construction, model evaluation, or reduction.
    pub fn run_with_base<M: Model + ?Sized>(
        &self,
        model: &M,
        base_design: &Sample,
        domain: &BoundedDomain,
    ) -> Result<ScreeningResult> {
        check_model(model, domain)?;
        let experiment = LhsExperiment::with_bounds(base_design, domain.clone(), self.config.trajectories)?;
        let mut rng = self.rng();
        self.run_experiment(model, experiment, &mut rng)
    }

    fn run_experiment<M: Model + ?Sized>(
        &self,
        model: &M,
        experiment: LhsExperiment,
        rng: &mut Xoshiro256PlusPlus,
    ) -> Result<ScreeningResult> {
        let start_time = Instant::now();
        let domain = experiment.domain().clone();

        let experiment = match self.config.levels {
            Some(levels) => experiment.with_levels(levels)?,
            None => experiment,
        }
        .max_padding_attempts(self.config.max_padding_attempts);

        let input_design = experiment.generate(rng as &mut dyn RngCore)?;
        let output_design = model.evaluate(&input_design)?;
        if output_design.ncols() != model.output_dimension() {
            return Err(MorrisError::DimensionMismatch {
                context: "model output dimension",
                expected: model.output_dimension(),
                actual: output_design.ncols(),
            });
        }
        let statistics = reduce(&input_design, &output_design, &domain)?;

        let runtime_secs = start_time.elapsed().as_secs_f64();
        info!(
            trajectories = statistics.trajectory_count(),
            inputs = statistics.input_dimension,
            outputs = statistics.output_dimension,
            evaluations = input_design.nrows(),
            runtime_secs,
            "screening complete"
        );

        Ok(ScreeningResult {
            metadata: Metadata {
                trajectories: statistics.trajectory_count(),
                base_size: experiment.base_size(),
                step: step_to_vec(experiment.step()),
                seed: self.config.seed,
                runtime_secs,
            },
            domain,
            input_design,
            output_design,
            statistics,
        })
    }

    fn rng(&self) -> Xoshiro256PlusPlus {
        match self.config.seed {
            Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
            None => Xoshiro256PlusPlus::from_rng(&mut rand::rng()),
        }
    }
}

fn check_model<M: Model + ?Sized>(model: &M, domain: &BoundedDomain) -> Result<()> {
    if model.input_dimension() != domain.dimension() {
        return Err(MorrisError::DimensionMismatch {
            context: "model input dimension",
            expected: domain.dimension(),
            actual: model.input_dimension(),
        });
    }
    Ok(())
}

fn step_to_vec(step: &DVector<f64>) -> Vec<f64> {
    step.iter().copied().collect()
}
