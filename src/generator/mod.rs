//! Batch-oriented sequence generators
//!
//! Every generator keeps the next `W` unconsumed elements of its sequence in a
//! look-ahead [`Batch`] and advances it with a cheap recurrence instead of
//! re-evaluating `exp`/`sin`/`cos` for every element. Requests of any length
//! are served by a shared width-adaptation engine that narrows, shifts, or
//! splits them against the internal width.

pub mod anchor;
pub mod any;
pub mod cossin;
mod engine;
pub mod exp;
pub mod linear;
pub mod sin;

pub use anchor::Anchored;
pub use any::{AnyGenerator, GeneratorKind};
pub use cossin::CosSinGenerator;
pub use exp::{Exp2Generator, ExpGenerator};
pub use linear::LinearGenerator;
pub use sin::SinGenerator;

use crate::batch::{lane_index, Batch};
use num_traits::{Float, FloatConst, Zero};

/// Internal width used by the free factory functions
pub const DEFAULT_WIDTH: usize = 8;

/// Pull-based producer of an infinite numeric sequence
pub trait Generator {
    type Sample: Float;

    /// Fill `out` with the next `out.len()` elements of the sequence
    ///
    /// Afterwards the generator is positioned immediately after the last
    /// element written. Any length is accepted, including zero.
    fn produce(&mut self, out: &mut [Self::Sample]);

    /// Restart the sequence at `start` using direct evaluation
    ///
    /// Discards accumulated recurrence drift and resets [`position`](Self::position).
    fn resync(&mut self, start: Self::Sample);

    /// Re-evaluate the look-ahead state directly at the current position
    ///
    /// Unlike [`resync`](Self::resync) the logical position is kept. Returns
    /// `false` (and does nothing) when the position falls inside an element,
    /// which can only happen for generators with several lanes per element.
    fn reanchor(&mut self) -> bool;

    /// Lanes consumed since the last resync
    fn position(&self) -> u64;

    /// Phase of logical element 0 since the last resync
    fn start(&self) -> Self::Sample;

    /// Per-element increment
    fn step(&self) -> Self::Sample;

    /// Internal batch width in lanes
    fn width(&self) -> usize;

    /// Number of output lanes making up one logical element
    fn lanes_per_element(&self) -> usize {
        1
    }

    /// Restart from the start phase of the last resync
    fn reset(&mut self) {
        let start = self.start();
        self.resync(start);
    }

    /// Produce the next `N` elements as an array
    fn produce_array<const N: usize>(&mut self) -> [Self::Sample; N]
    where
        Self: Sized,
    {
        let mut out = [<Self::Sample as Zero>::zero(); N];
        self.produce(&mut out);
        out
    }
}

/// State shared by every generator variant
#[derive(Debug, Clone, Copy)]
pub struct GeneratorCore<T, const W: usize> {
    /// The next `W` unconsumed lanes
    pub(crate) value: Batch<T, W>,
    pub(crate) start: T,
    pub(crate) position: u64,
}

mod sealed {
    pub trait Sealed {}
}

/// Variant-specific stepping rule
///
/// `sync` evaluates a batch directly, `next` advances a batch by exactly `W`
/// lanes, and `shift` advances by `n < W` lanes. Sealed: generators are only
/// built from the recurrences defined in this crate.
///
/// ```compile_fail
/// use lanegen::batch::Batch;
/// use lanegen::generator::Recurrence;
///
/// struct Constant;
///
/// impl Recurrence<f32, 4> for Constant {
///     fn step(&self) -> f32 { 0.0 }
///     fn sync(&mut self, start: f32) -> Batch<f32, 4> { Batch::splat(start) }
///     fn next(&mut self, _value: &mut Batch<f32, 4>) {}
/// }
/// ```
pub trait Recurrence<T: Float, const W: usize>: sealed::Sealed {
    /// Output lanes per logical element
    const LANES_PER_ELEMENT: usize = 1;

    /// Per-element increment
    fn step(&self) -> T;

    /// Direct evaluation of lanes `0..W` starting at phase `start`
    fn sync(&mut self, start: T) -> Batch<T, W>;

    /// Replace `value` with the batch that follows it
    fn next(&mut self, value: &mut Batch<T, W>);

    /// Advance `value` by `n` lanes, keeping the unconsumed tail
    fn shift(&mut self, value: &mut Batch<T, W>, n: usize) {
        let old = *value;
        self.next(value);
        *value = old.splice(*value, n);
    }
}

/// A generator of width `W` driven by recurrence `R`
#[derive(Debug, Clone)]
pub struct BatchGenerator<R, T, const W: usize> {
    pub(crate) core: GeneratorCore<T, W>,
    pub(crate) recurrence: R,
}

struct WidthCheck<const W: usize>;

impl<const W: usize> WidthCheck<W> {
    const POSITIVE: () = assert!(W > 0, "generator width must be positive");
    const EVEN: () = assert!(
        W > 0 && W % 2 == 0,
        "interleaved generators need an even, positive width"
    );
}

impl<R, T, const W: usize> BatchGenerator<R, T, W>
where
    R: Recurrence<T, W>,
    T: Float,
{
    /// Build a generator and sync it to `start`
    pub(crate) fn with_recurrence(start: T, mut recurrence: R) -> Self {
        let () = WidthCheck::<W>::POSITIVE;
        let value = recurrence.sync(start);
        Self {
            core: GeneratorCore {
                value,
                start,
                position: 0,
            },
            recurrence,
        }
    }

    /// The look-ahead batch: the next `W` lanes `produce` will hand out
    pub fn value(&self) -> &Batch<T, W> {
        &self.core.value
    }

    pub fn recurrence(&self) -> &R {
        &self.recurrence
    }

    /// Phase of logical element `element` relative to the last resync
    pub fn phase_at(&self, element: u64) -> T {
        let index = T::from(element).unwrap_or_else(T::infinity);
        self.core.start + self.recurrence.step() * index
    }
}

impl<R, T, const W: usize> Generator for BatchGenerator<R, T, W>
where
    R: Recurrence<T, W>,
    T: Float,
{
    type Sample = T;

    fn produce(&mut self, out: &mut [T]) {
        engine::fill(self, out);
    }

    fn resync(&mut self, start: T) {
        self.core.start = start;
        self.core.position = 0;
        self.core.value = self.recurrence.sync(start);
    }

    fn reanchor(&mut self) -> bool {
        let lanes = R::LANES_PER_ELEMENT as u64;
        if self.core.position % lanes != 0 {
            return false;
        }
        let phase = self.phase_at(self.core.position / lanes);
        self.core.value = self.recurrence.sync(phase);
        true
    }

    fn position(&self) -> u64 {
        self.core.position
    }

    fn start(&self) -> T {
        self.core.start
    }

    fn step(&self) -> T {
        self.recurrence.step()
    }

    fn width(&self) -> usize {
        W
    }

    fn lanes_per_element(&self) -> usize {
        R::LANES_PER_ELEMENT
    }
}

/// `W` as the element type
pub(crate) fn width_of<T: Float, const W: usize>() -> T {
    lane_index(W)
}

/// Linear ramp `start + step * n`
pub fn linear<T: Float>(start: T, step: T) -> LinearGenerator<T, DEFAULT_WIDTH> {
    LinearGenerator::new(start, step)
}

/// Exponential ramp `exp(start + step * n)`
pub fn exp<T: Float + FloatConst>(start: T, step: T) -> ExpGenerator<T, DEFAULT_WIDTH> {
    ExpGenerator::new(start, step)
}

/// Exponential ramp `exp2(start + step * n)`
pub fn exp2<T: Float + FloatConst>(start: T, step: T) -> Exp2Generator<T, DEFAULT_WIDTH> {
    Exp2Generator::new(start, step)
}

/// Interleaved `cos, sin` pairs at phase `start + step * n`
pub fn cos_sin<T: Float>(start: T, step: T) -> CosSinGenerator<T, DEFAULT_WIDTH> {
    CosSinGenerator::new(start, step)
}

/// Sine oscillator `sin(start + step * n)` with a companion cosine channel
pub fn sin<T: Float>(start: T, step: T) -> SinGenerator<T, DEFAULT_WIDTH> {
    SinGenerator::new(start, step)
}
