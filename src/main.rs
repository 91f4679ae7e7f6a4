use lanegen::generator::{self, CosSinGenerator, Generator, LinearGenerator, SinGenerator};
use tracing_subscriber::EnvFilter;

fn print_frame(label: &str, frame: &[f32]) {
    print!("  {:<14} [", label);
    for (i, &sample) in frame.iter().enumerate() {
        if i > 0 {
            print!(", ");
        }
        print!("{:.3}", sample);
    }
    println!("]");
}

fn demo_linear() {
    println!("\n=== Linear Generator Demo ===\n");

    let mut ramp = LinearGenerator::<f32, 4>::new(0.0, 1.0);
    println!("Configuration:");
    println!("  Start: 0, Step: 1, Width: {} lanes", ramp.width());
    println!();

    for _ in 0..3 {
        let frame: [f32; 4] = ramp.produce_array();
        print_frame("produce(4)", &frame);
    }
    println!("  Position: {}", ramp.position());
}

fn demo_width_adaptation() {
    println!("\n=== Width Adaptation Demo ===\n");

    // Same sequence served in frames narrower and wider than the batch
    let mut ramp = LinearGenerator::<f32, 4>::new(0.0, 1.0);
    for size in [2usize, 2, 3, 10, 1] {
        let mut frame = vec![0.0f32; size];
        ramp.produce(&mut frame);
        print_frame(&format!("produce({})", size), &frame);
    }
    println!("  Position: {}", ramp.position());
}

fn demo_exponential() {
    println!("\n=== Exponential Generator Demo ===\n");

    let mut env = generator::exp(0.0f32, 0.01);
    let mut frame = vec![0.0f32; 4000];
    env.produce(&mut frame);

    let worst = frame
        .iter()
        .enumerate()
        .map(|(n, &v)| {
            let exact = (0.01f32 as f64 * n as f64).exp();
            ((v as f64 - exact) / exact).abs()
        })
        .fold(0.0, f64::max);
    println!("  4000 samples of exp(0.01 n), width {}", env.width());
    println!("  Last sample: {:.3}", frame[3999]);
    println!("  Max relative drift: {:.3e}", worst);

    env.resync(0.0);
    let fresh: [f32; 4] = env.produce_array();
    print_frame("after resync", &fresh);
}

fn demo_oscillators() {
    println!("\n=== Oscillator Demo ===\n");

    let step = std::f32::consts::PI / 4.0;

    let mut pairs = CosSinGenerator::<f32, 4>::new(0.0, step);
    let mut frame = [0.0f32; 8];
    pairs.produce(&mut frame);
    print_frame("cos/sin pairs", &frame);

    let mut osc = SinGenerator::<f32, 4>::new(0.0, step);
    let mut cos = [0.0f32; 8];
    let mut sin = [0.0f32; 8];
    osc.produce_quadrature(&mut cos, &mut sin);
    print_frame("cos channel", &cos);
    print_frame("sin channel", &sin);

    let worst = cos
        .iter()
        .zip(&sin)
        .map(|(c, s)| (c * c + s * s - 1.0).abs())
        .fold(0.0f32, f32::max);
    println!("  Max |cos² + sin² - 1|: {:.3e}", worst);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Lanegen Sequence Generators");
    println!("===========================");

    demo_linear();
    demo_width_adaptation();
    demo_exponential();
    demo_oscillators();

    println!("\n===========================");
    println!("All demos complete!");
}
