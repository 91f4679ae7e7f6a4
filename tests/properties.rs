//! Sequence properties shared by every generator kind

use lanegen::generator::{AnyGenerator, Generator, GeneratorKind, LinearGenerator, SinGenerator};
use num_traits::Zero;
use std::f64::consts::PI;

fn generator(kind: GeneratorKind, start: f64, step: f64) -> AnyGenerator<f64, 4> {
    AnyGenerator::new(kind, start, step)
}

fn produce_vec<G: Generator>(gen: &mut G, len: usize) -> Vec<G::Sample> {
    let mut out = vec![<G::Sample as Zero>::zero(); len];
    gen.produce(&mut out);
    out
}

#[test]
fn test_linear_batches_are_exact() {
    let mut ramp = LinearGenerator::<f32, 4>::new(0.0, 1.0);
    for batch in 0..100 {
        let base = (batch * 4) as f32;
        assert_eq!(
            ramp.produce_array::<4>(),
            [base, base + 1.0, base + 2.0, base + 3.0]
        );
    }
}

#[test]
fn test_request_sizes_do_not_change_the_sequence() {
    let sizes = [1usize, 2, 3, 5, 8, 13, 21, 7, 4, 1, 9];
    let total: usize = sizes.iter().sum();

    for kind in GeneratorKind::ALL {
        let mut pieces = generator(kind, 0.1, 0.03);
        let mut whole = generator(kind, 0.1, 0.03);

        let mut joined = Vec::with_capacity(total);
        for &len in &sizes {
            joined.extend(produce_vec(&mut pieces, len));
        }
        let reference = produce_vec(&mut whole, total);

        assert_eq!(joined, reference, "{}", kind);
        assert_eq!(pieces.position(), whole.position());
        assert_eq!(pieces.position(), total as u64);
    }
}

#[test]
fn test_wide_request_is_concatenation() {
    for kind in GeneratorKind::ALL {
        let mut wide = generator(kind, -0.5, 0.2);
        let mut narrow = generator(kind, -0.5, 0.2);

        let ten = produce_vec(&mut wide, 10);
        let mut parts = produce_vec(&mut narrow, 4);
        parts.extend(produce_vec(&mut narrow, 4));
        parts.extend(produce_vec(&mut narrow, 2));

        assert_eq!(ten, parts, "{}", kind);
    }
}

#[test]
fn test_first_batch_after_resync_is_exact() {
    for kind in GeneratorKind::ALL {
        let mut gen = generator(kind, 0.0, 0.01);
        // Arbitrary history, ending off the batch grid
        produce_vec(&mut gen, 1234);
        produce_vec(&mut gen, 3);

        gen.resync(0.75);
        let out: [f64; 4] = gen.produce_array();
        let fresh: [f64; 4] = generator(kind, 0.75, 0.01).produce_array();
        assert_eq!(out, fresh, "{}", kind);

        for (lane, &v) in out.iter().enumerate() {
            let exact = kind.exact_lane(0.75, 0.01, lane as u64);
            assert!((v - exact).abs() <= 1e-15 * exact.abs().max(1.0), "{}", kind);
        }
    }
}

#[test]
fn test_oscillators_stay_on_unit_circle() {
    let step = PI / 100.0;
    let samples = 100_000;

    let mut pairs = generator(GeneratorKind::CosSin, 0.0, step);
    let interleaved = produce_vec(&mut pairs, 2 * samples);
    for (n, pair) in interleaved.chunks_exact(2).enumerate() {
        let mag = pair[0] * pair[0] + pair[1] * pair[1];
        assert!((mag - 1.0).abs() < 1e-9, "cossin magnitude² {} at {}", mag, n);
    }

    let mut osc = SinGenerator::<f64, 4>::new(0.0, step);
    let mut cos = vec![0.0f64; samples];
    let mut sin = vec![0.0f64; samples];
    osc.produce_quadrature(&mut cos, &mut sin);
    for n in 0..samples {
        let mag = cos[n] * cos[n] + sin[n] * sin[n];
        assert!((mag - 1.0).abs() < 1e-9, "sin magnitude² {} at {}", mag, n);
    }
}

#[test]
fn test_oscillators_track_phase() {
    let step = PI / 100.0;

    let mut pairs = generator(GeneratorKind::CosSin, 0.0, step);
    let interleaved = produce_vec(&mut pairs, 2 * 5000);
    let mut osc = generator(GeneratorKind::Sin, 0.0, step);
    let sines = produce_vec(&mut osc, 5000);

    for n in 0..5000 {
        let phase = n as f64 * step;
        assert!((interleaved[2 * n] - phase.cos()).abs() < 1e-9);
        assert!((interleaved[2 * n + 1] - phase.sin()).abs() < 1e-9);
        assert!((sines[n] - phase.sin()).abs() < 1e-9);
    }
}

#[test]
fn test_exponential_drift_is_bounded() {
    let mut gen = AnyGenerator::<f32, 4>::new(GeneratorKind::Exp, 0.0, 0.01);
    let out = produce_vec(&mut gen, 4 * 1000);

    let worst = out
        .iter()
        .enumerate()
        .map(|(n, &v)| {
            let exact = GeneratorKind::Exp.exact_lane(0.0, 0.01f32 as f64, n as u64);
            ((v as f64 - exact) / exact).abs()
        })
        .fold(0.0, f64::max);
    assert!(worst < 1e-5, "relative drift {}", worst);

    gen.resync(0.0);
    assert_eq!(gen.produce_array::<1>(), [1.0]);
}

#[test]
fn test_nan_propagates() {
    for kind in GeneratorKind::ALL {
        let mut gen = generator(kind, f64::NAN, 0.1);
        let out = produce_vec(&mut gen, 13);
        assert!(out.iter().all(|v| v.is_nan()), "{}", kind);
    }
}

#[test]
fn test_dynamic_dispatch() {
    let mut gens: Vec<Box<dyn Generator<Sample = f32>>> = Vec::new();
    for kind in GeneratorKind::ALL {
        gens.push(Box::new(AnyGenerator::<f32, 8>::new(kind, 0.0, 0.1)));
    }

    let mut frame = [0.0f32; 20];
    for gen in &mut gens {
        gen.produce(&mut frame);
        assert_eq!(gen.position(), 20);
        assert_eq!(gen.width(), 8);
    }
}
