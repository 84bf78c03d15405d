//! Recompute everything derived from the current root positions
//!
//! Called once per drag-motion event. Nothing is cached between calls: the
//! polynomial, its derivative, the derivative's roots and both hulls are
//! rebuilt from the positions every time.

use num_complex::Complex64;

use crate::errors::Result;
use crate::geometry::points_of;
use crate::hull::{Hull, convex_hull};
use crate::log::debug;
use crate::polynomial::Polynomial;
use crate::solver::{CompanionSolver, RootSolver};

/// Geometry for one redraw
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Product of `(x - r)` over the root positions
    pub polynomial: Polynomial,
    /// Derivative of `polynomial`
    pub derivative: Polynomial,
    /// The root positions this frame was built from, in input order
    pub roots: Vec<Complex64>,
    /// Roots of the derivative in solver order; marker `i` pairs with entry `i`
    pub derivative_roots: Vec<Complex64>,
    /// Hull of `roots`
    pub hull: Hull,
    /// Hull of `derivative_roots`; empty when the derivative has no roots
    pub derivative_hull: Hull,
}

/// Rebuild a frame with the default [`CompanionSolver`]
pub fn recompute(roots: &[Complex64]) -> Result<Frame> {
    recompute_with(&CompanionSolver::default(), roots)
}

/// Rebuild a frame, finding derivative roots with `solver`.
///
/// An empty root list fails with `InvalidInput` from the hull; solver
/// failures surface as `NumericDegeneracy`. Either way no partial frame is
/// produced.
pub fn recompute_with<S: RootSolver + ?Sized>(solver: &S, roots: &[Complex64]) -> Result<Frame> {
    let polynomial = Polynomial::from_roots(roots);
    let derivative = polynomial.derivative();
    let derivative_roots = derivative.roots_with(solver)?;

    let hull = convex_hull(&points_of(roots))?;
    let derivative_hull = if derivative_roots.is_empty() {
        Hull::default()
    } else {
        convex_hull(&points_of(&derivative_roots))?
    };

    debug!(
        degree = polynomial.degree(),
        hull = hull.len(),
        derivative_hull = derivative_hull.len(),
        "frame recomputed"
    );

    Ok(Frame {
        polynomial,
        derivative,
        roots: roots.to_vec(),
        derivative_roots,
        hull,
        derivative_hull,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn empty_roots_are_invalid() {
        assert!(matches!(recompute(&[]), Err(Error::InvalidInput { .. })));
    }

    #[test]
    fn single_root_has_no_derivative_hull() {
        let frame = recompute(&[c(0.5, 0.5)]).unwrap();
        assert_eq!(frame.polynomial.degree(), 1);
        assert!(frame.derivative_roots.is_empty());
        assert!(frame.derivative_hull.is_empty());
        assert_eq!(frame.hull.len(), 1);
    }

    #[test]
    fn two_roots_derivative_at_midpoint() {
        let frame = recompute(&[c(-1.0, 0.0), c(1.0, 2.0)]).unwrap();
        assert_eq!(frame.derivative_roots.len(), 1);
        assert!((frame.derivative_roots[0] - c(0.0, 1.0)).norm() < 1e-12);
        assert_eq!(frame.derivative_hull.len(), 1);
    }

    #[test]
    fn triangle_frame() {
        let roots = [c(0.0, 0.0), c(3.0, 0.0), c(0.0, 3.0)];
        let frame = recompute(&roots).unwrap();
        assert_eq!(frame.polynomial.degree(), 3);
        assert_eq!(frame.derivative.degree(), 2);
        assert_eq!(frame.derivative_roots.len(), 2);
        assert_eq!(frame.hull.len(), 3);
        assert_eq!(frame.roots, roots.to_vec());
        for r in &frame.derivative_roots {
            assert!(frame.hull.contains(crate::geometry::to_point(*r), 1e-9));
        }
    }

    #[test]
    fn nan_root_is_degenerate() {
        let err = recompute(&[c(0.0, 0.0), c(f64::NAN, 0.0), c(1.0, 1.0)]).unwrap_err();
        assert!(matches!(err, Error::NumericDegeneracy { .. }));
    }
}
