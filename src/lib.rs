//! Vectorized generators of numeric sequences
//!
//! Linear ramps, exponential ramps (base e and base 2) and sine/cosine
//! oscillators, produced a fixed-width batch at a time. Each generator steps
//! its batch forward with a cheap recurrence and serves requests of any
//! length; [`generator::Generator::resync`] restores exact values whenever
//! accumulated rounding matters.
//!
//! ```
//! use lanegen::generator::{self, Generator};
//!
//! let mut osc = generator::sin(0.0f32, std::f32::consts::PI / 50.0);
//! let mut frame = [0.0f32; 100];
//! osc.produce(&mut frame);
//! assert!((frame[25] - 1.0).abs() < 1e-5);
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod generator;

pub use config::GeneratorConfig;
pub use error::{GeneratorError, Result};
