//! Closed set of generator variants behind one type

use super::{
    CosSinGenerator, Exp2Generator, ExpGenerator, Generator, LinearGenerator, SinGenerator,
};
use crate::error::GeneratorError;
use num_traits::{Float, FloatConst};
use std::fmt;
use std::str::FromStr;

/// Names the generator variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneratorKind {
    Linear,
    Exp,
    Exp2,
    CosSin,
    Sin,
}

impl GeneratorKind {
    pub const ALL: [GeneratorKind; 5] = [
        GeneratorKind::Linear,
        GeneratorKind::Exp,
        GeneratorKind::Exp2,
        GeneratorKind::CosSin,
        GeneratorKind::Sin,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GeneratorKind::Linear => "linear",
            GeneratorKind::Exp => "exp",
            GeneratorKind::Exp2 => "exp2",
            GeneratorKind::CosSin => "cossin",
            GeneratorKind::Sin => "sin",
        }
    }

    /// Output lanes per logical element
    pub fn lanes_per_element(self) -> usize {
        match self {
            GeneratorKind::CosSin => 2,
            _ => 1,
        }
    }

    /// Direct evaluation of output lane `lane` of a sequence starting at `start`
    ///
    /// This is the value a freshly synced generator of this kind would
    /// produce at `lane` without any recurrence error, computed in `f64`.
    pub fn exact_lane(self, start: f64, step: f64, lane: u64) -> f64 {
        let element = lane / self.lanes_per_element() as u64;
        let phase = start + step * element as f64;
        match self {
            GeneratorKind::Linear => phase,
            GeneratorKind::Exp => phase.exp(),
            GeneratorKind::Exp2 => phase.exp2(),
            GeneratorKind::CosSin if lane % 2 == 0 => phase.cos(),
            GeneratorKind::CosSin | GeneratorKind::Sin => phase.sin(),
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GeneratorKind {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GeneratorKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GeneratorError::UnknownKind(s.to_string()))
    }
}

/// Any generator variant, dispatched by `match`
///
/// `W` must be even, since the interleaved variant is one of the options.
#[derive(Debug, Clone)]
pub enum AnyGenerator<T, const W: usize> {
    Linear(LinearGenerator<T, W>),
    Exp(ExpGenerator<T, W>),
    Exp2(Exp2Generator<T, W>),
    CosSin(CosSinGenerator<T, W>),
    Sin(SinGenerator<T, W>),
}

impl<T: Float + FloatConst, const W: usize> AnyGenerator<T, W> {
    /// Create a generator of the given kind
    pub fn new(kind: GeneratorKind, start: T, step: T) -> Self {
        match kind {
            GeneratorKind::Linear => AnyGenerator::Linear(LinearGenerator::new(start, step)),
            GeneratorKind::Exp => AnyGenerator::Exp(ExpGenerator::new(start, step)),
            GeneratorKind::Exp2 => AnyGenerator::Exp2(Exp2Generator::new(start, step)),
            GeneratorKind::CosSin => AnyGenerator::CosSin(CosSinGenerator::new(start, step)),
            GeneratorKind::Sin => AnyGenerator::Sin(SinGenerator::new(start, step)),
        }
    }

    pub fn kind(&self) -> GeneratorKind {
        match self {
            AnyGenerator::Linear(_) => GeneratorKind::Linear,
            AnyGenerator::Exp(_) => GeneratorKind::Exp,
            AnyGenerator::Exp2(_) => GeneratorKind::Exp2,
            AnyGenerator::CosSin(_) => GeneratorKind::CosSin,
            AnyGenerator::Sin(_) => GeneratorKind::Sin,
        }
    }
}

macro_rules! dispatch {
    ($self:expr, $gen:ident => $body:expr) => {
        match $self {
            AnyGenerator::Linear($gen) => $body,
            AnyGenerator::Exp($gen) => $body,
            AnyGenerator::Exp2($gen) => $body,
            AnyGenerator::CosSin($gen) => $body,
            AnyGenerator::Sin($gen) => $body,
        }
    };
}

impl<T: Float + FloatConst, const W: usize> Generator for AnyGenerator<T, W> {
    type Sample = T;

    fn produce(&mut self, out: &mut [T]) {
        dispatch!(self, gen => gen.produce(out))
    }

    fn resync(&mut self, start: T) {
        dispatch!(self, gen => gen.resync(start))
    }

    fn reanchor(&mut self) -> bool {
        dispatch!(self, gen => gen.reanchor())
    }

    fn position(&self) -> u64 {
        dispatch!(self, gen => gen.position())
    }

    fn start(&self) -> T {
        dispatch!(self, gen => gen.start())
    }

    fn step(&self) -> T {
        dispatch!(self, gen => gen.step())
    }

    fn width(&self) -> usize {
        W
    }

    fn lanes_per_element(&self) -> usize {
        dispatch!(self, gen => gen.lanes_per_element())
    }
}
