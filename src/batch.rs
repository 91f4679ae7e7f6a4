//! Fixed-width lane groups
//!
//! A `Batch<T, W>` is an ordered group of `W` values processed together.
//! Generators keep their look-ahead state in batches and hand lanes out
//! of them on request.

use num_traits::Float;
use std::ops::{Add, Index, Mul, Sub};

/// Fixed-width ordered group of `W` lanes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Batch<T, const W: usize>([T; W]);

impl<T: Float, const W: usize> Batch<T, W> {
    /// Batch with every lane set to `value`
    pub fn splat(value: T) -> Self {
        Self([value; W])
    }

    /// Batch whose lane `i` is `f(i)`
    pub fn from_fn(f: impl FnMut(usize) -> T) -> Self {
        Self(std::array::from_fn(f))
    }

    /// `[0, 1, 2, …, W-1]`
    pub fn enumerate() -> Self {
        Self::from_fn(lane_index)
    }

    /// Apply `f` to every lane
    pub fn map(self, mut f: impl FnMut(T) -> T) -> Self {
        Self::from_fn(|i| f(self.0[i]))
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn as_array(&self) -> &[T; W] {
        &self.0
    }

    pub fn into_array(self) -> [T; W] {
        self.0
    }

    /// Lanes `n..W` of `self` followed by lanes `0..n` of `next`
    ///
    /// This is the view of the sequence `n` lanes further along when `next`
    /// is the batch that follows `self`.
    pub fn splice(self, next: Self, n: usize) -> Self {
        debug_assert!(n <= W, "splice offset {} exceeds width {}", n, W);
        Self::from_fn(|i| if i + n < W { self.0[i + n] } else { next.0[i + n - W] })
    }

    /// Exchange every adjacent pair of lanes (`2k` with `2k + 1`)
    pub fn swap_pairs(self) -> Self {
        debug_assert!(W % 2 == 0, "pair operations need an even width");
        Self::from_fn(|i| self.0[i ^ 1])
    }

    /// Even lanes `self - other`, odd lanes `self + other`
    pub fn subadd(self, other: Self) -> Self {
        Self::from_fn(|i| {
            if i % 2 == 0 {
                self.0[i] - other.0[i]
            } else {
                self.0[i] + other.0[i]
            }
        })
    }
}

/// Converts a lane index to the element type.
///
/// Every float type can represent small integers exactly, so this never
/// falls back.
pub(crate) fn lane_index<T: Float>(i: usize) -> T {
    T::from(i).unwrap_or_else(T::nan)
}

impl<T, const W: usize> Index<usize> for Batch<T, W> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.0[index]
    }
}

impl<T: Float, const W: usize> Add for Batch<T, W> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_fn(|i| self.0[i] + rhs.0[i])
    }
}

impl<T: Float, const W: usize> Sub for Batch<T, W> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::from_fn(|i| self.0[i] - rhs.0[i])
    }
}

impl<T: Float, const W: usize> Mul for Batch<T, W> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::from_fn(|i| self.0[i] * rhs.0[i])
    }
}

impl<T: Float, const W: usize> Add<T> for Batch<T, W> {
    type Output = Self;

    fn add(self, rhs: T) -> Self {
        self.map(|x| x + rhs)
    }
}

impl<T: Float, const W: usize> Mul<T> for Batch<T, W> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self {
        self.map(|x| x * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumerate() {
        let b = Batch::<f32, 4>::enumerate();
        assert_eq!(b.as_array(), &[0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_splice() {
        let old = Batch::<f32, 4>::enumerate();
        let next = old + 4.0;

        assert_eq!(old.splice(next, 1).as_array(), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(old.splice(next, 3).as_array(), &[3.0, 4.0, 5.0, 6.0]);
        // Degenerate offsets
        assert_eq!(old.splice(next, 0), old);
        assert_eq!(old.splice(next, 4), next);
    }

    #[test]
    fn test_swap_pairs_and_subadd() {
        let a = Batch::<f64, 4>::from_fn(|i| (i + 1) as f64); // [1, 2, 3, 4]
        assert_eq!(a.swap_pairs().as_array(), &[2.0, 1.0, 4.0, 3.0]);

        let b = Batch::<f64, 4>::splat(10.0);
        assert_eq!(a.subadd(b).as_array(), &[-9.0, 12.0, -7.0, 14.0]);
    }

    #[test]
    fn test_arithmetic() {
        let a = Batch::<f32, 2>::from_fn(|i| i as f32 + 1.0); // [1, 2]
        let b = Batch::<f32, 2>::splat(3.0);

        assert_eq!((a + b).as_array(), &[4.0, 5.0]);
        assert_eq!((a - b).as_array(), &[-2.0, -1.0]);
        assert_eq!((a * b).as_array(), &[3.0, 6.0]);
        assert_eq!((a * 2.0).as_array(), &[2.0, 4.0]);
        assert_eq!(a[1], 2.0);
    }
}
