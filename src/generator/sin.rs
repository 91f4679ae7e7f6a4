//! Separate-channel sine oscillator
//!
//! Keeps a sine batch and a cosine batch of `W` phases each and rotates both
//! by `Δ = W * step` per batch:
//!
//! ```text
//! cos(x + Δ) = c - (α·c + β·s)
//! sin(x + Δ) = s - (α·s - β·c)      α = 2·sin²(Δ/2), β = sin(Δ)
//! ```
//!
//! The sine channel is the generator's output; the cosine channel is needed by
//! the recurrence and can be drained alongside it with
//! [`SinGenerator::produce_quadrature`].

use super::engine;
use super::{width_of, BatchGenerator, Recurrence};
use crate::batch::Batch;
use num_traits::Float;
use std::ops::Range;

/// `sin(start + step * n)`, `W` phases at a time
pub type SinGenerator<T, const W: usize> = BatchGenerator<Sin<T, W>, T, W>;

/// Lock-step rotation of a sine and a cosine channel
#[derive(Debug, Clone, Copy)]
pub struct Sin<T, const W: usize> {
    step: T,
    alpha: T,
    beta: T,
    cos_value: Batch<T, W>,
}

impl<T: Float, const W: usize> SinGenerator<T, W> {
    /// Create a sine generator
    ///
    /// # Example
    /// ```
    /// use lanegen::generator::{Generator, SinGenerator};
    ///
    /// let mut osc = SinGenerator::<f32, 4>::new(0.0, 0.1);
    /// let mut frame = [0.0f32; 64];
    /// osc.produce(&mut frame);
    /// assert!((frame[10] - 1.0f32.sin()).abs() < 1e-5);
    /// ```
    pub fn new(start: T, step: T) -> Self {
        let two = T::one() + T::one();
        let delta = width_of::<T, W>() * step;
        let half = (delta / two).sin();
        let recurrence = Sin {
            step,
            alpha: two * half * half,
            beta: delta.sin(),
            cos_value: Batch::splat(T::zero()),
        };
        Self::with_recurrence(start, recurrence)
    }

    /// The look-ahead cosine batch, in phase with [`value`](Self::value)
    pub fn cos_value(&self) -> &Batch<T, W> {
        &self.recurrence.cos_value
    }

    /// Fill `cos_out` and `sin_out` with the next phases of both channels
    ///
    /// Advances the generator by `sin_out.len()` elements, exactly as
    /// `produce` would.
    ///
    /// # Panics
    /// Panics if the two buffers have different lengths
    pub fn produce_quadrature(&mut self, cos_out: &mut [T], sin_out: &mut [T]) {
        assert_eq!(
            cos_out.len(),
            sin_out.len(),
            "cosine and sine buffers must have the same length"
        );

        let len = sin_out.len();
        engine::fill_with(
            self,
            0,
            len,
            &mut |gen: &SinGenerator<T, W>, lanes: Range<usize>, at: usize| {
                let end = at + lanes.len();
                cos_out[at..end].copy_from_slice(&gen.recurrence.cos_value.as_slice()[lanes.clone()]);
                sin_out[at..end].copy_from_slice(&gen.core.value.as_slice()[lanes]);
            },
        );
    }
}

impl<T, const W: usize> super::sealed::Sealed for Sin<T, W> {}

impl<T: Float, const W: usize> Recurrence<T, W> for Sin<T, W> {
    fn step(&self) -> T {
        self.step
    }

    fn sync(&mut self, start: T) -> Batch<T, W> {
        let phases = Batch::enumerate() * self.step + start;
        self.cos_value = phases.map(T::cos);
        phases.map(T::sin)
    }

    fn next(&mut self, value: &mut Batch<T, W>) {
        let c = self.cos_value;
        let s = *value;

        let cc = c * self.alpha + s * self.beta;
        let ss = s * self.alpha - c * self.beta;

        self.cos_value = c - cc;
        *value = s - ss;
    }

    fn shift(&mut self, value: &mut Batch<T, W>, n: usize) {
        let old_sin = *value;
        let old_cos = self.cos_value;
        self.next(value);
        *value = old_sin.splice(*value, n);
        self.cos_value = old_cos.splice(self.cos_value, n);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::Generator;
    use std::f64::consts::PI;

    #[test]
    fn test_sin_tracks_direct_evaluation() {
        let step = PI / 100.0;
        let mut osc = SinGenerator::<f64, 8>::new(0.0, step);
        let mut cos = vec![0.0f64; 10_000];
        let mut sin = vec![0.0f64; 10_000];
        osc.produce_quadrature(&mut cos, &mut sin);

        for n in 0..sin.len() {
            let phase = step * n as f64;
            assert!((cos[n] - phase.cos()).abs() < 1e-9, "cos at {}", n);
            assert!((sin[n] - phase.sin()).abs() < 1e-9, "sin at {}", n);
            assert!((cos[n] * cos[n] + sin[n] * sin[n] - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_sin_shift_keeps_channels_aligned() {
        // Narrow requests go through the two-channel shift
        let step = 0.07f64;
        let mut osc = SinGenerator::<f64, 4>::new(0.2, step);
        let mut produced = 0usize;

        for len in [1usize, 3, 2, 2, 1, 3] {
            let mut cos = vec![0.0f64; len];
            let mut sin = vec![0.0f64; len];
            osc.produce_quadrature(&mut cos, &mut sin);

            for i in 0..len {
                let phase = 0.2 + step * (produced + i) as f64;
                assert!((cos[i] - phase.cos()).abs() < 1e-12);
                assert!((sin[i] - phase.sin()).abs() < 1e-12);
            }
            produced += len;
        }

        assert_eq!(osc.position(), produced as u64);
        let phase = 0.2 + step * produced as f64;
        assert!((osc.cos_value()[0] - phase.cos()).abs() < 1e-12);
        assert!((osc.value()[0] - phase.sin()).abs() < 1e-12);
    }

    #[test]
    fn test_sin_produce_matches_quadrature() {
        let mut a = SinGenerator::<f32, 4>::new(0.0, 0.3);
        let mut b = SinGenerator::<f32, 4>::new(0.0, 0.3);

        let mut sin = [0.0f32; 11];
        a.produce(&mut sin);
        let mut cos2 = [0.0f32; 11];
        let mut sin2 = [0.0f32; 11];
        b.produce_quadrature(&mut cos2, &mut sin2);

        assert_eq!(sin, sin2);
        assert_eq!(a.cos_value(), b.cos_value());
    }

    #[test]
    fn test_sin_resync_is_exact() {
        let mut osc = SinGenerator::<f32, 4>::new(0.0, 0.01);
        osc.produce(&mut vec![0.0f32; 5001]);

        osc.resync(2.0);
        let out: [f32; 4] = osc.produce_array();
        for (i, &v) in out.iter().enumerate() {
            assert_eq!(v, (i as f32 * 0.01 + 2.0).sin());
        }
    }

    #[test]
    #[should_panic(expected = "cosine and sine buffers must have the same length")]
    fn test_sin_quadrature_length_mismatch() {
        let mut osc = SinGenerator::<f32, 4>::new(0.0, 0.1);
        osc.produce_quadrature(&mut [0.0; 3], &mut [0.0; 4]);
    }
}
