//! Numeric root finding via companion matrix eigendecomposition
//!
//! For p(x) = c₀ + c₁x + ... + cₙxⁿ, normalized to monic form by dividing
//! through by cₙ, the companion matrix
//!
//! ```text
//! C = [ 0   0   ...  0  -a₀  ]
//!     [ 1   0   ...  0  -a₁  ]
//!     [ 0   1   ...  0  -a₂  ]
//!     [ .   .   ...  .   .   ]
//!     [ 0   0   ...  1  -aₙ₋₁]
//! ```
//!
//! has the roots of p as its eigenvalues. They are read off the diagonal of a
//! complex Schur decomposition.
//!
//! For xⁿ - c the companion matrix is a scaled cyclic shift and the shifted
//! QR iteration never splits it. When the decomposition stalls the roots are
//! found instead by Aberth–Ehrlich iteration, seeded on a circle.

use std::f64::consts::TAU;

use nalgebra::DMatrix;
use nalgebra::linalg::Schur;
use num_complex::Complex64;

use crate::defaults;
use crate::errors::{Error, Result};
use crate::log::{debug, warn};

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// Angular offset of the Aberth seeds, so they never line up with the roots
/// of xⁿ - c
const SEED_ANGLE: f64 = 0.4;

/// A dense polynomial root finder.
///
/// Implementations return every root counted with multiplicity. The order of
/// the returned roots is whatever the method produces and callers must not
/// assume it is sorted.
pub trait RootSolver {
    /// Roots of the polynomial whose coefficients are given highest degree
    /// first. Leading zeros are ignored; a constant has no roots.
    fn find_roots(&self, descending: &[Complex64]) -> Result<Vec<Complex64>>;
}

impl<S: RootSolver + ?Sized> RootSolver for &S {
    fn find_roots(&self, descending: &[Complex64]) -> Result<Vec<Complex64>> {
        (**self).find_roots(descending)
    }
}

/// Tuning for [`CompanionSolver`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverOptions {
    /// Convergence threshold of the Schur iteration
    pub epsilon: f64,
    /// Iterations allowed before either method is declared stuck
    pub max_iterations: usize,
    /// Relative step size at which an Aberth root counts as converged
    pub tolerance: f64,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            epsilon: defaults::SOLVER_EPSILON,
            max_iterations: defaults::SOLVER_MAX_ITERATIONS,
            tolerance: defaults::ROOT_TOLERANCE,
        }
    }
}

/// Eigenvalues of the companion matrix, computed with nalgebra
#[derive(Debug, Clone, Copy, Default)]
pub struct CompanionSolver {
    options: SolverOptions,
}

impl CompanionSolver {
    pub fn new(options: SolverOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> SolverOptions {
        self.options
    }
}

impl RootSolver for CompanionSolver {
    fn find_roots(&self, descending: &[Complex64]) -> Result<Vec<Complex64>> {
        if descending.iter().any(|c| !c.is_finite()) {
            return Err(Error::degenerate("polynomial has a NaN or infinite coefficient"));
        }

        // Leading zeros do not change the polynomial.
        let first = descending.iter().position(|c| *c != ZERO);
        let Some(first) = first else {
            return Ok(Vec::new());
        };
        let trimmed = &descending[first..];

        // Trailing zeros are factors of x: each contributes an exact zero root.
        let last = trimmed
            .iter()
            .rposition(|c| *c != ZERO)
            .unwrap_or(0);
        let zero_roots = trimmed.len() - 1 - last;
        let core = &trimmed[..=last];

        let mut roots = match core.len() {
            0 | 1 => Vec::new(),
            2 => vec![-core[1] / core[0]],
            _ => match companion_eigenvalues(core, self.options) {
                Some(roots) => roots,
                None => {
                    warn!(degree = core.len() - 1, "schur iteration stalled, using aberth");
                    aberth(core, self.options)?
                }
            },
        };
        roots.extend(std::iter::repeat_n(ZERO, zero_roots));

        if let Some(bad) = roots.iter().position(|r| !r.is_finite()) {
            warn!(index = bad, "solver produced a non-finite root");
            return Err(Error::degenerate(format!(
                "root solver produced a non-finite root at index {bad}"
            )));
        }

        debug!(degree = trimmed.len() - 1, found = roots.len(), "roots found");
        Ok(roots)
    }
}

/// Eigenvalues of the companion matrix of `core` (highest degree first,
/// non-zero at both ends, at least three coefficients).
///
/// `None` when the Schur iteration does not converge.
fn companion_eigenvalues(core: &[Complex64], options: SolverOptions) -> Option<Vec<Complex64>> {
    let degree = core.len() - 1;
    let leading = core[0];

    let mut companion = DMatrix::<Complex64>::zeros(degree, degree);
    for i in 1..degree {
        companion[(i, i - 1)] = ONE;
    }
    // Row i of the last column holds -aᵢ, where aᵢ multiplies xⁱ.
    for i in 0..degree {
        companion[(i, degree - 1)] = -core[degree - i] / leading;
    }

    let schur = Schur::try_new(companion, options.epsilon, options.max_iterations)?;
    let eigenvalues = schur.eigenvalues()?;
    Some(eigenvalues.iter().copied().collect())
}

/// All roots of `core` at once by Aberth–Ehrlich iteration.
///
/// Seeds sit on the circle of radius |a₀|^(1/n), the geometric mean of the
/// root moduli. Each sweep updates roots in place and freezes those whose
/// step fell below `options.tolerance` relative to their size.
fn aberth(core: &[Complex64], options: SolverOptions) -> Result<Vec<Complex64>> {
    let degree = core.len() - 1;
    let leading = core[0];
    let monic: Vec<Complex64> = core.iter().map(|&c| c / leading).collect();

    let radius = monic[degree].norm().powf(1.0 / degree as f64);
    let mut roots: Vec<Complex64> = (0..degree)
        .map(|k| Complex64::from_polar(radius, TAU * k as f64 / degree as f64 + SEED_ANGLE))
        .collect();
    let mut converged = vec![false; degree];

    for _ in 0..options.max_iterations {
        for i in 0..degree {
            if converged[i] {
                continue;
            }
            let z = roots[i];
            let (value, slope) = value_and_slope(&monic, z);
            if value == ZERO {
                converged[i] = true;
                continue;
            }
            let repulsion: Complex64 = roots
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, &w)| ONE / (z - w))
                .sum();
            let step = ONE / (slope / value - repulsion);
            if !step.is_finite() {
                return Err(Error::degenerate("aberth step is not finite"));
            }
            roots[i] = z - step;
            if step.norm() <= options.tolerance * (1.0 + z.norm()) {
                converged[i] = true;
            }
        }
        if converged.iter().all(|&done| done) {
            debug!(degree, "aberth converged");
            return Ok(roots);
        }
    }

    Err(Error::degenerate(format!(
        "root iteration did not converge within {} steps",
        options.max_iterations
    )))
}

/// p(z) and p'(z) in one Horner pass over descending coefficients
fn value_and_slope(descending: &[Complex64], z: Complex64) -> (Complex64, Complex64) {
    descending.iter().fold((ZERO, ZERO), |(value, slope), &c| {
        (value * z + c, slope * z + value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    fn real(values: &[f64]) -> Vec<Complex64> {
        values.iter().map(|&v| c(v, 0.0)).collect()
    }

    fn sorted_re(mut roots: Vec<Complex64>) -> Vec<f64> {
        roots.sort_by(|a, b| a.re.partial_cmp(&b.re).unwrap());
        roots.iter().map(|r| r.re).collect()
    }

    #[test]
    fn constant_has_no_roots() {
        let solver = CompanionSolver::default();
        assert!(solver.find_roots(&real(&[4.0])).unwrap().is_empty());
        assert!(solver.find_roots(&real(&[0.0, 0.0])).unwrap().is_empty());
    }

    #[test]
    fn linear_is_closed_form() {
        let roots = CompanionSolver::default().find_roots(&real(&[2.0, -3.0])).unwrap();
        assert_eq!(roots, vec![c(1.5, 0.0)]);
    }

    #[test]
    fn cubic_with_real_roots() {
        // (x - 1)(x - 2)(x - 3) = x³ - 6x² + 11x - 6
        let roots = CompanionSolver::default()
            .find_roots(&real(&[1.0, -6.0, 11.0, -6.0]))
            .unwrap();
        assert_eq!(roots.len(), 3);
        for (got, want) in sorted_re(roots.clone()).into_iter().zip([1.0, 2.0, 3.0]) {
            assert!((got - want).abs() < 1e-9, "{got} vs {want}");
        }
        assert!(roots.iter().all(|r| r.im.abs() < 1e-9));
    }

    #[test]
    fn quadratic_with_complex_roots() {
        // x² + 1
        let roots = CompanionSolver::default()
            .find_roots(&real(&[1.0, 0.0, 1.0]))
            .unwrap();
        assert_eq!(roots.len(), 2);
        assert!(roots.iter().any(|r| (*r - c(0.0, 1.0)).norm() < 1e-12));
        assert!(roots.iter().any(|r| (*r - c(0.0, -1.0)).norm() < 1e-12));
    }

    #[test]
    fn factors_of_x_become_exact_zeros() {
        // 10x⁹
        let mut coeffs = real(&[10.0]);
        coeffs.extend(real(&[0.0; 9]));
        let roots = CompanionSolver::default().find_roots(&coeffs).unwrap();
        assert_eq!(roots, vec![ZERO; 9]);
    }

    fn unity(n: usize) -> Vec<Complex64> {
        let mut coeffs = real(&[1.0]);
        coeffs.extend(vec![ZERO; n - 1]);
        coeffs.push(c(-1.0, 0.0));
        coeffs
    }

    fn assert_roots_of_unity(roots: &[Complex64], n: usize) {
        assert_eq!(roots.len(), n);
        for k in 0..n {
            let want = Complex64::from_polar(1.0, TAU * k as f64 / n as f64);
            assert!(
                roots.iter().any(|r| (*r - want).norm() < 1e-10),
                "{want} missing from {roots:?}"
            );
        }
    }

    #[test]
    fn roots_of_unity() {
        for n in [6, 10, 20] {
            let roots = CompanionSolver::default().find_roots(&unity(n)).unwrap();
            assert_roots_of_unity(&roots, n);
        }
    }

    #[test]
    fn aberth_on_cyclic_companion() {
        let roots = aberth(&unity(10), SolverOptions::default()).unwrap();
        assert_roots_of_unity(&roots, 10);

        // x⁸ - 2: every root has modulus 2^(1/8)
        let mut coeffs = unity(8);
        coeffs[8] = c(-2.0, 0.0);
        let roots = aberth(&coeffs, SolverOptions::default()).unwrap();
        assert_eq!(roots.len(), 8);
        for r in &roots {
            assert!((r.norm() - 2f64.powf(0.125)).abs() < 1e-12);
            assert!((r.powu(8) - c(2.0, 0.0)).norm() < 1e-10);
        }
    }

    #[test]
    fn aberth_matches_real_roots() {
        let roots = aberth(&real(&[1.0, -6.0, 11.0, -6.0]), SolverOptions::default()).unwrap();
        for (got, want) in sorted_re(roots.clone()).into_iter().zip([1.0, 2.0, 3.0]) {
            assert!((got - want).abs() < 1e-10, "{got} vs {want}");
        }
        assert!(roots.iter().all(|r| r.im.abs() < 1e-10));
    }

    #[test]
    fn value_and_slope_by_horner() {
        // x³ - 2x + 5 at 2: value 9, slope 10
        let (value, slope) = value_and_slope(&real(&[1.0, 0.0, -2.0, 5.0]), c(2.0, 0.0));
        assert_eq!(value, c(9.0, 0.0));
        assert_eq!(slope, c(10.0, 0.0));
    }

    #[test]
    fn leading_zeros_ignored() {
        let roots = CompanionSolver::default()
            .find_roots(&real(&[0.0, 0.0, 1.0, -2.0]))
            .unwrap();
        assert_eq!(roots, vec![c(2.0, 0.0)]);
    }

    #[test]
    fn nan_coefficient_is_degenerate() {
        let err = CompanionSolver::default()
            .find_roots(&[c(1.0, 0.0), c(f64::NAN, 0.0), c(1.0, 0.0)])
            .unwrap_err();
        assert!(matches!(err, Error::NumericDegeneracy { .. }));
    }
}
