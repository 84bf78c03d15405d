//! Scripted drag: grab one root of x¹⁰ - 1 and pull it outward.

use gauss_lucas::interact::Anchored;
use gauss_lucas::{Explorer, Polynomial, defaults};

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let polynomial = Polynomial::unity(defaults::ROOT_COUNT);
    let mut explorer = Explorer::new(&polynomial)?;

    let start = explorer.handles()[0].anchor();
    if !explorer.press(start) {
        eprintln!("press missed the first root");
        return Ok(());
    }

    for step in 1..=10 {
        let cursor = start * (1.0 + 0.1 * step as f64);
        let Some(frame) = explorer.motion(cursor)? else {
            break;
        };
        println!(
            "step {:2}: root 0 at ({:.3}, {:.3}), hull {} vertices, derivative hull {} vertices",
            step,
            cursor.x,
            cursor.y,
            frame.hull.len(),
            frame.derivative_hull.len(),
        );
        println!("         p(x) = {}", frame.polynomial.display(defaults::DISPLAY_PRECISION));
    }

    explorer.release();
    Ok(())
}
