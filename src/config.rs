//! Generator configuration
//!
//! Turns user-facing parameters (always `f64`) into a generator of a concrete
//! sample type and width, validating them on the way.

use crate::error::{GeneratorError, Result};
use crate::generator::{Anchored, AnyGenerator, GeneratorKind};
use num_traits::{Float, FloatConst};
use std::num::NonZeroU64;
use tracing::{debug, warn};

/// Parameters of one generator
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Which sequence to generate
    pub kind: GeneratorKind,
    /// Phase (or value, for linear ramps) of element 0
    pub start: f64,
    /// Per-element increment
    pub step: f64,
    /// Re-anchor by direct evaluation every this many values; `None` never does
    pub resync_interval: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            kind: GeneratorKind::Sin,
            start: 0.0,
            step: std::f64::consts::PI / 100.0,
            resync_interval: None,
        }
    }
}

impl GeneratorConfig {
    /// Check that the parameters are usable
    pub fn validate(&self) -> Result<()> {
        check_finite("start", self.start)?;
        check_finite("step", self.step)?;
        if self.resync_interval == Some(0) {
            return Err(GeneratorError::ZeroInterval);
        }
        Ok(())
    }

    /// Build a generator with sample type `T` and internal width `W`
    ///
    /// `W` must be even (see [`AnyGenerator`]).
    ///
    /// # Example
    /// ```
    /// use lanegen::config::GeneratorConfig;
    /// use lanegen::generator::{Generator, GeneratorKind};
    ///
    /// let config = GeneratorConfig {
    ///     kind: GeneratorKind::Linear,
    ///     start: 0.0,
    ///     step: 1.0,
    ///     resync_interval: None,
    /// };
    /// let mut gen = config.build::<f32, 4>().unwrap();
    /// assert_eq!(gen.produce_array::<3>(), [0.0, 1.0, 2.0]);
    /// ```
    pub fn build<T, const W: usize>(&self) -> Result<Anchored<AnyGenerator<T, W>>>
    where
        T: Float + FloatConst,
    {
        self.validate()?;
        let start = convert::<T>("start", self.start)?;
        let step = convert::<T>("step", self.step)?;

        debug!(
            kind = %self.kind,
            start = self.start,
            step = self.step,
            width = W,
            resync_interval = ?self.resync_interval,
            "building generator"
        );
        self.warn_on_degenerate_step(W);

        let gen = AnyGenerator::new(self.kind, start, step);
        Ok(match self.resync_interval.and_then(NonZeroU64::new) {
            Some(interval) => Anchored::new(gen, interval),
            None => Anchored::unanchored(gen),
        })
    }

    /// Warn about parameters that are valid but numerically useless
    fn warn_on_degenerate_step(&self, width: usize) {
        if let Some(problem) = self.degenerate_step(width) {
            warn!(kind = %self.kind, step = self.step, width, "{}", problem);
        }
    }

    fn degenerate_step(&self, width: usize) -> Option<&'static str> {
        let batch_step = self.step * width as f64;
        match self.kind {
            GeneratorKind::Exp => (!batch_step.exp_m1().is_finite())
                .then_some("batch growth factor overflows; output becomes infinite after the first batch"),
            GeneratorKind::Exp2 => (!(batch_step.exp2() - 1.0).is_finite())
                .then_some("batch growth factor overflows; output becomes infinite after the first batch"),
            GeneratorKind::CosSin | GeneratorKind::Sin => (self.step.abs() >= std::f64::consts::PI)
                .then_some("oscillator step is at or above the Nyquist limit"),
            GeneratorKind::Linear => None,
        }
    }
}

fn check_finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GeneratorError::NonFiniteParameter { name, value })
    }
}

/// Convert to the sample type, rejecting values that overflow it
fn convert<T: Float>(name: &'static str, value: f64) -> Result<T> {
    T::from(value)
        .filter(|v| v.is_finite())
        .ok_or(GeneratorError::NonFiniteParameter { name, value })
}
