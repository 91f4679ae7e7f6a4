use super::{width_of, BatchGenerator, Recurrence};
use crate::batch::Batch;
use num_traits::Float;

/// Linear ramp `start + step * n`, `W` lanes at a time
pub type LinearGenerator<T, const W: usize> = BatchGenerator<Linear<T>, T, W>;

/// Additive stepping: every lane moves forward by `step * W` per batch
#[derive(Debug, Clone, Copy)]
pub struct Linear<T> {
    step: T,
    /// Increment for a whole batch
    vstep: T,
}

impl<T: Float, const W: usize> LinearGenerator<T, W> {
    /// Create a linear ramp generator
    ///
    /// # Arguments
    /// * `start` - Value of element 0
    /// * `step` - Increment between consecutive elements
    ///
    /// # Example
    /// ```
    /// use lanegen::generator::{Generator, LinearGenerator};
    ///
    /// let mut ramp = LinearGenerator::<f32, 4>::new(0.0, 1.0);
    /// let mut frame = [0.0f32; 6];
    /// ramp.produce(&mut frame);
    /// assert_eq!(frame, [0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    /// ```
    pub fn new(start: T, step: T) -> Self {
        let vstep = step * width_of::<T, W>();
        Self::with_recurrence(start, Linear { step, vstep })
    }
}

impl<T> super::sealed::Sealed for Linear<T> {}

impl<T: Float, const W: usize> Recurrence<T, W> for Linear<T> {
    fn step(&self) -> T {
        self.step
    }

    fn sync(&mut self, start: T) -> Batch<T, W> {
        Batch::enumerate() * self.step + start
    }

    fn next(&mut self, value: &mut Batch<T, W>) {
        *value = *value + self.vstep;
    }
}

#[cfg(test)]
mod tests {
    use crate::generator::{Generator, LinearGenerator};

    #[test]
    fn test_linear_full_batches() {
        let mut ramp = LinearGenerator::<f32, 4>::new(0.0, 1.0);

        assert_eq!(ramp.produce_array::<4>(), [0.0, 1.0, 2.0, 3.0]);
        assert_eq!(ramp.produce_array::<4>(), [4.0, 5.0, 6.0, 7.0]);
        assert_eq!(ramp.produce_array::<4>(), [8.0, 9.0, 10.0, 11.0]);
        assert_eq!(ramp.position(), 12);
    }

    #[test]
    fn test_linear_narrow_requests() {
        let mut halves = LinearGenerator::<f32, 4>::new(0.0, 1.0);
        let mut whole = LinearGenerator::<f32, 4>::new(0.0, 1.0);

        let a = halves.produce_array::<2>();
        let b = halves.produce_array::<2>();
        let full = whole.produce_array::<4>();

        assert_eq!(a, [0.0, 1.0]);
        assert_eq!(b, [2.0, 3.0]);
        assert_eq!([a, b].concat(), full.to_vec());

        // Both generators now sit at the same place in the sequence
        assert_eq!(halves.position(), whole.position());
        assert_eq!(halves.value(), whole.value());
    }

    #[test]
    fn test_linear_negative_step() {
        let mut ramp = LinearGenerator::<f64, 2>::new(1.0, -0.25);
        assert_eq!(ramp.produce_array::<5>(), [1.0, 0.75, 0.5, 0.25, 0.0]);
    }

    #[test]
    fn test_linear_resync() {
        let mut ramp = LinearGenerator::<f32, 4>::new(0.0, 1.0);
        ramp.produce_array::<7>();

        ramp.resync(100.0);
        assert_eq!(ramp.position(), 0);
        assert_eq!(ramp.start(), 100.0);
        assert_eq!(ramp.produce_array::<4>(), [100.0, 101.0, 102.0, 103.0]);
    }
}
