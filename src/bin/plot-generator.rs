//! Plot a generator's output against direct evaluation
//!
//! Usage: plot-generator --kind sin --step 0.05 --samples 2000 output.svg

use clap::Parser;
use lanegen::generator::{Generator, GeneratorKind};
use lanegen::{GeneratorConfig, GeneratorError};
use plotters::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

const WIDTH: usize = 8;
const FRAME_SIZE: usize = 64;

#[derive(Debug, Parser)]
#[command(name = "plot-generator", about = "Plot generator output and its drift to SVG")]
struct Args {
    /// Generator kind: linear, exp, exp2, cossin or sin
    #[arg(long, default_value = "sin")]
    kind: GeneratorKind,

    /// Phase of element 0
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    start: f64,

    /// Per-element increment
    #[arg(long, default_value_t = 0.05, allow_negative_numbers = true)]
    step: f64,

    /// Number of output values to generate
    #[arg(long, default_value_t = 2000)]
    samples: usize,

    /// Re-anchor every this many values
    #[arg(long)]
    resync_interval: Option<u64>,

    /// Output SVG path
    output: String,
}

impl Args {
    fn config(&self) -> GeneratorConfig {
        GeneratorConfig {
            kind: self.kind,
            start: self.start,
            step: self.step,
            resync_interval: self.resync_interval,
        }
    }
}

/// Generate frame by frame, the way a streaming consumer would
fn generate(args: &Args) -> Result<Vec<f32>, GeneratorError> {
    if args.samples == 0 {
        return Err(GeneratorError::InvalidSampleCount);
    }

    let mut gen = args.config().build::<f32, WIDTH>()?;
    let mut samples = vec![0.0f32; args.samples];
    for frame in samples.chunks_mut(FRAME_SIZE) {
        gen.produce(frame);
    }
    Ok(samples)
}

fn exact_samples(args: &Args) -> Vec<f64> {
    (0..args.samples as u64)
        .map(|lane| args.kind.exact_lane(args.start, args.step, lane))
        .collect()
}

/// Largest absolute and relative deviation from the exact sequence
fn measure_drift(samples: &[f32], exact: &[f64]) -> (f64, f64) {
    samples
        .iter()
        .zip(exact)
        .fold((0.0f64, 0.0f64), |(abs, rel), (&s, &e)| {
            let diff = (s as f64 - e).abs();
            let scale = e.abs().max(f64::MIN_POSITIVE);
            (abs.max(diff), rel.max(diff / scale))
        })
}

fn create_plot(
    args: &Args,
    samples: &[f32],
    exact: &[f64],
) -> Result<(), Box<dyn std::error::Error>> {
    let root = SVGBackend::new(&args.output, (800, 400)).into_drawing_area();
    root.fill(&WHITE)?;

    let finite = || samples.iter().map(|&s| s as f64).chain(exact.iter().copied()).filter(|v| v.is_finite());
    let y_min = finite().fold(f64::INFINITY, f64::min);
    let y_max = finite().fold(f64::NEG_INFINITY, f64::max);
    let (y_min, y_max) = if y_min < y_max {
        let pad = (y_max - y_min) * 0.05;
        (y_min - pad, y_max + pad)
    } else {
        (y_min - 1.0, y_max + 1.0)
    };

    let title = format!(
        "{}: start={}, step={}, width={}",
        args.kind, args.start, args.step, WIDTH
    );

    let mut chart = ChartBuilder::on(&root)
        .caption(&title, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..samples.len() as f64, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Lane")
        .y_desc("Value")
        .x_labels(10)
        .y_labels(10)
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            exact.iter().enumerate().map(|(i, &v)| (i as f64, v)),
            RED.stroke_width(1),
        ))?
        .label("direct")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart
        .draw_series(LineSeries::new(
            samples.iter().enumerate().map(|(i, &v)| (i as f64, v as f64)),
            BLUE.stroke_width(2),
        ))?
        .label("recurrence")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    println!("Generator Plot");
    println!("==============");
    println!("  Kind: {}", args.kind);
    println!("  Start: {}", args.start);
    println!("  Step: {}", args.step);
    println!("  Samples: {}", args.samples);
    match args.resync_interval {
        Some(interval) => println!("  Resync every: {} values", interval),
        None => println!("  Resync every: never"),
    }
    println!();

    print!("  Generating... ");
    let samples = generate(&args)?;
    let exact = exact_samples(&args);
    println!("done ({} values)", samples.len());

    let (abs_drift, rel_drift) = measure_drift(&samples, &exact);
    println!(
        "  Max drift: {:.3e} absolute, {:.3e} relative",
        abs_drift, rel_drift
    );
    info!(abs_drift, rel_drift, "measured drift");

    print!("  Creating plot... ");
    create_plot(&args, &samples, &exact)?;
    println!("done");

    println!();
    println!("Output: {}", args.output);

    Ok(())
}
