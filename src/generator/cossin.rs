//! Interleaved cosine/sine oscillator
//!
//! Lanes come in pairs `[cos(x), sin(x)]`, so a batch of width `W` holds
//! `W / 2` consecutive phases. Advancing a batch is a 2D rotation of every
//! pair by `Δ = (W / 2) * step`, done with the half-angle form
//!
//! ```text
//! cos(x + Δ) = c - (α·c + β·s)
//! sin(x + Δ) = s - (α·s - β·c)      α = 2·sin²(Δ/2), β = sin(Δ)
//! ```
//!
//! which needs only multiplies and adds per batch.

use super::{width_of, BatchGenerator, Recurrence, WidthCheck};
use crate::batch::{lane_index, Batch};
use num_traits::Float;

/// Interleaved `cos, sin` pairs at phase `start + step * n`
///
/// `W` counts lanes, so each batch covers `W / 2` phases. `W` must be even.
pub type CosSinGenerator<T, const W: usize> = BatchGenerator<CosSin<T, W>, T, W>;

/// Pairwise rotation stepping
///
/// Rotation only works on whole `[cos, sin]` pairs, so the recurrence keeps a
/// pair-aligned batch of its own. After a request that ends between the two
/// lanes of a pair, the visible batch is that aligned batch viewed one lane
/// further along.
#[derive(Debug, Clone, Copy)]
pub struct CosSin<T, const W: usize> {
    step: T,
    alpha: T,
    /// Negated `sin(Δ)`, matching the lane signs of `subadd`
    beta: T,
    /// Pair-aligned batch starting at the pair of the first unconsumed lane
    aligned: Batch<T, W>,
    /// Whether the cosine lane of the first pair is already consumed
    skew: bool,
}

impl<T: Float, const W: usize> CosSin<T, W> {
    fn rotate(&self, v: Batch<T, W>) -> Batch<T, W> {
        v - (v * self.alpha).subadd(v.swap_pairs() * self.beta)
    }

    /// The unconsumed lanes as seen by the caller
    fn view(&self) -> Batch<T, W> {
        if self.skew {
            self.aligned.splice(self.rotate(self.aligned), 1)
        } else {
            self.aligned
        }
    }
}

impl<T: Float, const W: usize> CosSinGenerator<T, W> {
    /// Create an interleaved cos/sin generator
    ///
    /// # Example
    /// ```
    /// use lanegen::generator::{CosSinGenerator, Generator};
    ///
    /// let mut osc = CosSinGenerator::<f64, 4>::new(0.0, std::f64::consts::FRAC_PI_2);
    /// let pairs: [f64; 4] = osc.produce_array();
    /// assert_eq!(pairs[0], 1.0); // cos(0)
    /// assert_eq!(pairs[1], 0.0); // sin(0)
    /// assert!((pairs[3] - 1.0).abs() < 1e-15); // sin(π/2)
    /// ```
    pub fn new(start: T, step: T) -> Self {
        let () = WidthCheck::<W>::EVEN;
        let two = T::one() + T::one();
        let delta = width_of::<T, W>() / two * step;
        let half = (delta / two).sin();
        let recurrence = CosSin {
            step,
            alpha: two * half * half,
            beta: -delta.sin(),
            aligned: Batch::splat(T::zero()),
            skew: false,
        };
        Self::with_recurrence(start, recurrence)
    }
}

impl<T, const W: usize> super::sealed::Sealed for CosSin<T, W> {}

impl<T: Float, const W: usize> Recurrence<T, W> for CosSin<T, W> {
    const LANES_PER_ELEMENT: usize = 2;

    fn step(&self) -> T {
        self.step
    }

    fn sync(&mut self, start: T) -> Batch<T, W> {
        let step = self.step;
        self.aligned = Batch::from_fn(|lane| {
            let phase = start + step * lane_index(lane / 2);
            if lane % 2 == 0 {
                phase.cos()
            } else {
                phase.sin()
            }
        });
        self.skew = false;
        self.aligned
    }

    fn next(&mut self, value: &mut Batch<T, W>) {
        self.aligned = self.rotate(self.aligned);
        *value = self.view();
    }

    fn shift(&mut self, value: &mut Batch<T, W>, n: usize) {
        let total = n + usize::from(self.skew);
        let whole_pairs = total & !1;
        if whole_pairs > 0 {
            self.aligned = self.aligned.splice(self.rotate(self.aligned), whole_pairs);
        }
        self.skew = total % 2 == 1;
        *value = self.view();
    }
}
