use gauss_lucas::{defaults, parse};

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::io::stderr)
        .init();

    let source = std::env::args()
        .nth(1)
        .unwrap_or_else(|| format!("x^{} - 1", defaults::ROOT_COUNT));

    let polynomial = parse(&source)?;
    println!("p(x)  = {}", polynomial);
    let frame = gauss_lucas::explore(&source)?;
    println!("p'(x) = {}", frame.derivative);

    println!("\nroots:");
    for r in &frame.roots {
        println!("  {:.4}", r);
    }
    println!("derivative roots:");
    for r in &frame.derivative_roots {
        println!("  {:.4}", r);
    }

    println!("\nhull ({} vertices):", frame.hull.len());
    for v in frame.hull.vertices() {
        println!("  ({:.4}, {:.4})", v.x, v.y);
    }
    println!("derivative hull ({} vertices):", frame.derivative_hull.len());
    for v in frame.derivative_hull.vertices() {
        println!("  ({:.4}, {:.4})", v.x, v.y);
    }
    Ok(())
}
