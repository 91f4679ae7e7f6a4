//! Exponential ramps
//!
//! `exp(start + step * n)` and `exp2(start + step * n)` share one recurrence:
//! stepping a batch forward by `W` elements multiplies every lane by the same
//! constant `base^(step * W)`, so each batch costs one multiply-add per lane.
//!
//! The multiplier is fixed at construction and rounding compounds
//! multiplicatively from batch to batch. Use [`Generator::resync`] or
//! [`Anchored`](super::Anchored) to bound the drift over long runs.
//!
//! [`Generator::resync`]: super::Generator::resync

use super::{width_of, BatchGenerator, Recurrence};
use crate::batch::Batch;
use num_traits::{Float, FloatConst};
use std::marker::PhantomData;

/// `exp(start + step * n)`
pub type ExpGenerator<T, const W: usize> = BatchGenerator<Exponential<T, Natural>, T, W>;

/// `exp2(start + step * n)`
pub type Exp2Generator<T, const W: usize> = BatchGenerator<Exponential<T, Binary>, T, W>;

/// Base of an exponential ramp
pub trait ExpBase {
    /// `base^x`
    fn pow<T: Float + FloatConst>(x: T) -> T;

    /// `base^x - 1`, accurate for small `x`
    fn pow_m1<T: Float + FloatConst>(x: T) -> T;
}

/// Base e
#[derive(Debug, Clone, Copy)]
pub struct Natural;

/// Base 2
#[derive(Debug, Clone, Copy)]
pub struct Binary;

impl ExpBase for Natural {
    fn pow<T: Float + FloatConst>(x: T) -> T {
        x.exp()
    }

    fn pow_m1<T: Float + FloatConst>(x: T) -> T {
        x.exp_m1()
    }
}

impl ExpBase for Binary {
    fn pow<T: Float + FloatConst>(x: T) -> T {
        x.exp2()
    }

    fn pow_m1<T: Float + FloatConst>(x: T) -> T {
        (x * T::LN_2()).exp_m1()
    }
}

/// Multiplicative stepping: `value += value * vstep`
#[derive(Debug, Clone, Copy)]
pub struct Exponential<T, B> {
    step: T,
    /// `base^(step * W) - 1`
    vstep: T,
    base: PhantomData<B>,
}

impl<T, B> Exponential<T, B> {
    /// Batch growth factor minus one
    pub fn vstep(&self) -> T
    where
        T: Copy,
    {
        self.vstep
    }
}

impl<T, B, const W: usize> BatchGenerator<Exponential<T, B>, T, W>
where
    T: Float + FloatConst,
    B: ExpBase,
{
    /// Create an exponential ramp generator
    ///
    /// `step` is the increment of the exponent between consecutive elements.
    ///
    /// # Example
    /// ```
    /// use lanegen::generator::{ExpGenerator, Generator};
    ///
    /// let mut env = ExpGenerator::<f64, 4>::new(0.0, -0.5);
    /// let decay: [f64; 3] = env.produce_array();
    /// assert_eq!(decay[0], 1.0);
    /// assert!((decay[2] - (-1.0f64).exp()).abs() < 1e-12);
    /// ```
    pub fn new(start: T, step: T) -> Self {
        let vstep = B::pow_m1(step * width_of::<T, W>());
        Self::with_recurrence(
            start,
            Exponential {
                step,
                vstep,
                base: PhantomData,
            },
        )
    }
}

impl<T, B> super::sealed::Sealed for Exponential<T, B> {}

impl<T, B, const W: usize> Recurrence<T, W> for Exponential<T, B>
where
    T: Float + FloatConst,
    B: ExpBase,
{
    fn step(&self) -> T {
        self.step
    }

    fn sync(&mut self, start: T) -> Batch<T, W> {
        (Batch::enumerate() * self.step + start).map(B::pow)
    }

    fn next(&mut self, value: &mut Batch<T, W>) {
        *value = *value + *value * self.vstep;
    }
}
