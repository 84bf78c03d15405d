//! Explore the Gauss–Lucas theorem interactively.
//!
//! The roots of a polynomial's derivative always lie inside the convex hull
//! of the polynomial's own roots. This crate rebuilds both hulls every time a
//! root moves, so a front end can drag roots around and watch the derivative
//! roots follow.
//!
//! ```
//! let frame = gauss_lucas::explore("x^10 - 1").unwrap();
//! assert_eq!(frame.roots.len(), 10);
//! assert_eq!(frame.derivative_roots.len(), 9);
//! ```

use num_complex::Complex64;
use pest_derive::Parser;

pub mod defaults;
pub mod errors;
pub mod geometry;
pub mod hull;
pub mod interact;
pub mod log;
pub mod parse;
pub mod pipeline;
pub mod polynomial;
pub mod solver;

pub use errors::{Error, ParseError};
pub use hull::{Hull, convex_hull, convex_hull_complex};
pub use interact::{Explorer, ExplorerOptions};
pub use parse::parse;
pub use pipeline::{Frame, recompute, recompute_with};
pub use polynomial::Polynomial;
pub use solver::{CompanionSolver, RootSolver, SolverOptions};

#[derive(Parser)]
#[grammar = "polynomial.pest"]
pub struct PolynomialParser;

/// Parse an expression, find its roots and build the first frame.
///
/// Returns the frame on success, or an error with diagnostics.
pub fn explore(source: &str) -> Result<Frame, miette::Report> {
    let polynomial = parse::parse(source)?;
    let roots: Vec<Complex64> = polynomial.roots()?;
    Ok(recompute(&roots)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pest::Parser;

    #[test]
    fn parse_simple_power() {
        let result = PolynomialParser::parse(Rule::program, "x^2");
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn parse_implicit_product() {
        let result = PolynomialParser::parse(Rule::program, "2(x - 1)(x + i)");
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn parse_rejects_dangling_operator() {
        let result = PolynomialParser::parse(Rule::program, "x +");
        assert!(result.is_err());
    }

    #[test]
    fn explore_unity() {
        let frame = explore("x^10 - 1").unwrap();
        assert_eq!(frame.hull.len(), 10);
        assert_eq!(frame.derivative_roots.len(), 9);
        for r in &frame.derivative_roots {
            assert!(r.norm() < 1e-6, "derivative root {r} not at origin");
        }
    }

    #[test]
    fn explore_constant_fails() {
        let err = explore("3").unwrap_err();
        assert!(err.to_string().contains("invalid input"));
    }

    #[test]
    fn explore_reports_parse_errors() {
        assert!(explore("x ^").is_err());
    }
}
