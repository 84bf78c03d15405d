//! Single-variable polynomials over the complex numbers
//!
//! A [`Polynomial`] is an immutable coefficient list, lowest power first, with
//! trailing zeros stripped. Arithmetic comes from the standard operator traits
//! on both owned values and references, so expressions read like the math:
//!
//! ```
//! use gauss_lucas::Polynomial;
//!
//! let x = Polynomial::x();
//! let f = (&x - 1.0) + x.power(6);
//! assert_eq!(f.degree(), 6);
//! assert_eq!(f.to_string(), "-1+x+x⁶");
//! ```

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_complex::Complex64;

use crate::defaults;
use crate::errors::{Error, Result};
use crate::geometry::to_point;
use crate::hull::{Hull, convex_hull};
use crate::solver::{CompanionSolver, RootSolver};

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// A polynomial c₀ + c₁x + ... + cₙxⁿ with complex coefficients
#[derive(Debug, Clone)]
pub struct Polynomial {
    /// Never empty; the last entry is non-zero unless this is the zero polynomial
    coefficients: Vec<Complex64>,
}

impl Polynomial {
    /// Build from coefficients, lowest power first.
    ///
    /// Trailing zeros are dropped. An empty sequence is an
    /// [`Error::InvalidInput`].
    pub fn new<I>(coefficients: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Complex64>,
    {
        let coefficients: Vec<Complex64> = coefficients.into_iter().map(Into::into).collect();
        if coefficients.is_empty() {
            return Err(Error::invalid("polynomial needs at least one coefficient"));
        }
        Ok(Self::from_vec(coefficients))
    }

    /// Strip trailing zeros from a non-empty coefficient list
    fn from_vec(mut coefficients: Vec<Complex64>) -> Self {
        while coefficients.len() > 1 && coefficients.last() == Some(&ZERO) {
            coefficients.pop();
        }
        if coefficients.is_empty() {
            coefficients.push(ZERO);
        }
        Self { coefficients }
    }

    /// The zero polynomial
    pub fn zero() -> Self {
        Self::constant(ZERO)
    }

    /// The constant 1
    pub fn one() -> Self {
        Self::constant(ONE)
    }

    /// A constant polynomial
    pub fn constant(value: impl Into<Complex64>) -> Self {
        Self::from_vec(vec![value.into()])
    }

    /// The monomial `x`
    pub fn x() -> Self {
        Self {
            coefficients: vec![ZERO, ONE],
        }
    }

    /// `xⁿ - 1`, whose roots are the n-th roots of unity
    pub fn unity(n: usize) -> Self {
        let mut coefficients = vec![ZERO; n + 1];
        coefficients[0] -= ONE;
        coefficients[n] += ONE;
        Self::from_vec(coefficients)
    }

    /// The product of `(x - r)` over all roots.
    ///
    /// Built by multiplying linear factors one at a time, starting from
    /// `(x - r₀)·1`, so the rounding matches a hand-written product. No roots
    /// gives the constant 1.
    pub fn from_roots(roots: &[Complex64]) -> Self {
        let x = Self::x();
        let mut factors = roots.iter().map(|&r| &x - r);
        let Some(first) = factors.next() else {
            return Self::one();
        };
        factors.fold(first * ONE, |acc, factor| &acc * &factor)
    }

    /// Coefficients, lowest power first
    pub fn coefficients(&self) -> &[Complex64] {
        &self.coefficients
    }

    /// Coefficients, highest power first, as root solvers expect them
    pub fn descending(&self) -> Vec<Complex64> {
        self.coefficients.iter().rev().copied().collect()
    }

    /// Degree; the zero polynomial has degree 0
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Coefficient of the highest power
    pub fn leading(&self) -> Complex64 {
        self.coefficients[self.coefficients.len() - 1]
    }

    pub fn is_zero(&self) -> bool {
        self.coefficients.as_slice() == [ZERO]
    }

    /// Whether this is exactly the monomial `x`
    pub fn is_x(&self) -> bool {
        self.coefficients.as_slice() == [ZERO, ONE]
    }

    /// Multiply by `x`: shift every coefficient up one power
    fn shifted(&self) -> Self {
        if self.is_zero() {
            return self.clone();
        }
        let mut coefficients = Vec::with_capacity(self.coefficients.len() + 1);
        coefficients.push(ZERO);
        coefficients.extend_from_slice(&self.coefficients);
        Self { coefficients }
    }

    fn scaled(&self, factor: Complex64) -> Self {
        Self::from_vec(self.coefficients.iter().map(|&c| c * factor).collect())
    }

    fn convolve(&self, other: &Self) -> Self {
        let mut out = vec![ZERO; self.coefficients.len() + other.coefficients.len() - 1];
        // Accumulate self·xⁱ·otherᵢ for increasing i.
        for (i, &b) in other.coefficients.iter().enumerate() {
            for (j, &a) in self.coefficients.iter().enumerate() {
                out[i + j] += a * b;
            }
        }
        Self::from_vec(out)
    }

    /// Raise to a non-negative integer power by repeated multiplication.
    /// `power(0)` is the constant 1 for every base.
    pub fn power(&self, n: u32) -> Self {
        (0..n).fold(Self::one(), |acc, _| &acc * self)
    }

    /// Evaluate at `value` with Horner's scheme
    pub fn evaluate(&self, value: impl Into<Complex64>) -> Complex64 {
        let value = value.into();
        self.coefficients
            .iter()
            .rev()
            .fold(ZERO, |acc, &c| acc * value + c)
    }

    /// The formal derivative. Constants differentiate to zero.
    pub fn derivative(&self) -> Self {
        if self.coefficients.len() == 1 {
            return Self::zero();
        }
        Self::from_vec(
            self.coefficients
                .iter()
                .enumerate()
                .skip(1)
                .map(|(i, &c)| c * i as f64)
                .collect(),
        )
    }

    /// Roots using the default [`CompanionSolver`]
    pub fn roots(&self) -> Result<Vec<Complex64>> {
        self.roots_with(&CompanionSolver::default())
    }

    /// Roots using the given solver, with multiplicity, in solver order
    pub fn roots_with<S: RootSolver + ?Sized>(&self, solver: &S) -> Result<Vec<Complex64>> {
        solver.find_roots(&self.descending())
    }

    /// Convex hull of the roots in the complex plane.
    ///
    /// A constant has no roots, which makes this an [`Error::InvalidInput`].
    pub fn root_hull(&self) -> Result<Hull> {
        let points: Vec<_> = self.roots()?.into_iter().map(to_point).collect();
        convex_hull(&points)
    }

    /// Coefficient-wise comparison within `tolerance`
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        let n = self.coefficients.len().max(other.coefficients.len());
        (0..n).all(|i| {
            let a = self.coefficients.get(i).copied().unwrap_or(ZERO);
            let b = other.coefficients.get(i).copied().unwrap_or(ZERO);
            (a - b).norm() <= tolerance
        })
    }

    /// Text rendering with coefficients rounded to `precision` decimals
    pub fn display(&self, precision: usize) -> PolynomialDisplay<'_> {
        PolynomialDisplay {
            polynomial: self,
            precision,
        }
    }
}

impl Default for Polynomial {
    fn default() -> Self {
        Self::zero()
    }
}

/// Equal when the difference is exactly the zero polynomial
impl PartialEq for Polynomial {
    fn eq(&self, other: &Self) -> bool {
        (self - other).is_zero()
    }
}

impl From<Complex64> for Polynomial {
    fn from(value: Complex64) -> Self {
        Self::constant(value)
    }
}

impl From<f64> for Polynomial {
    fn from(value: f64) -> Self {
        Self::constant(value)
    }
}

// ============================================================================
// Arithmetic
// ============================================================================

impl Add<&Polynomial> for &Polynomial {
    type Output = Polynomial;
    fn add(self, rhs: &Polynomial) -> Polynomial {
        let (long, short) = if self.coefficients.len() >= rhs.coefficients.len() {
            (&self.coefficients, &rhs.coefficients)
        } else {
            (&rhs.coefficients, &self.coefficients)
        };
        let mut sum = long.clone();
        for (s, &c) in sum.iter_mut().zip(short.iter()) {
            *s += c;
        }
        Polynomial::from_vec(sum)
    }
}

impl Add<Complex64> for &Polynomial {
    type Output = Polynomial;
    fn add(self, rhs: Complex64) -> Polynomial {
        let mut coefficients = self.coefficients.clone();
        coefficients[0] += rhs;
        Polynomial::from_vec(coefficients)
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;
    fn neg(self) -> Polynomial {
        Polynomial::from_vec(self.coefficients.iter().map(|&c| -c).collect())
    }
}

impl Neg for Polynomial {
    type Output = Polynomial;
    fn neg(self) -> Polynomial {
        -&self
    }
}

impl Sub<&Polynomial> for &Polynomial {
    type Output = Polynomial;
    fn sub(self, rhs: &Polynomial) -> Polynomial {
        self + &(-rhs)
    }
}

impl Sub<Complex64> for &Polynomial {
    type Output = Polynomial;
    fn sub(self, rhs: Complex64) -> Polynomial {
        self + (-rhs)
    }
}

impl Mul<&Polynomial> for &Polynomial {
    type Output = Polynomial;
    fn mul(self, rhs: &Polynomial) -> Polynomial {
        if rhs.is_x() {
            self.shifted()
        } else if self.is_x() {
            rhs.shifted()
        } else {
            self.convolve(rhs)
        }
    }
}

impl Mul<Complex64> for &Polynomial {
    type Output = Polynomial;
    fn mul(self, rhs: Complex64) -> Polynomial {
        self.scaled(rhs)
    }
}

/// Owned and mixed-ownership forms of a by-reference polynomial operator
macro_rules! forward_poly_ops {
    ($($trait:ident::$method:ident),* $(,)?) => {
        $(
            impl $trait<Polynomial> for Polynomial {
                type Output = Polynomial;
                fn $method(self, rhs: Polynomial) -> Polynomial {
                    <&Polynomial as $trait<&Polynomial>>::$method(&self, &rhs)
                }
            }
            impl $trait<&Polynomial> for Polynomial {
                type Output = Polynomial;
                fn $method(self, rhs: &Polynomial) -> Polynomial {
                    <&Polynomial as $trait<&Polynomial>>::$method(&self, rhs)
                }
            }
            impl $trait<Polynomial> for &Polynomial {
                type Output = Polynomial;
                fn $method(self, rhs: Polynomial) -> Polynomial {
                    <&Polynomial as $trait<&Polynomial>>::$method(self, &rhs)
                }
            }
        )*
    };
}

forward_poly_ops!(Add::add, Sub::sub, Mul::mul);

/// Scalar operands on either side, for complex and real scalars
macro_rules! scalar_poly_ops {
    ($($scalar:ty),*) => {
        $(
            impl Add<$scalar> for &Polynomial {
                type Output = Polynomial;
                fn add(self, rhs: $scalar) -> Polynomial { self + Complex64::from(rhs) }
            }
            impl Sub<$scalar> for &Polynomial {
                type Output = Polynomial;
                fn sub(self, rhs: $scalar) -> Polynomial { self - Complex64::from(rhs) }
            }
            impl Mul<$scalar> for &Polynomial {
                type Output = Polynomial;
                fn mul(self, rhs: $scalar) -> Polynomial { self * Complex64::from(rhs) }
            }
        )*
    };
}

scalar_poly_ops!(f64);

macro_rules! owned_scalar_ops {
    ($($scalar:ty),*) => {
        $(
            impl Add<$scalar> for Polynomial {
                type Output = Polynomial;
                fn add(self, rhs: $scalar) -> Polynomial { &self + rhs }
            }
            impl Sub<$scalar> for Polynomial {
                type Output = Polynomial;
                fn sub(self, rhs: $scalar) -> Polynomial { &self - rhs }
            }
            impl Mul<$scalar> for Polynomial {
                type Output = Polynomial;
                fn mul(self, rhs: $scalar) -> Polynomial { &self * rhs }
            }
            impl Add<&Polynomial> for $scalar {
                type Output = Polynomial;
                fn add(self, rhs: &Polynomial) -> Polynomial { rhs + self }
            }
            impl Add<Polynomial> for $scalar {
                type Output = Polynomial;
                fn add(self, rhs: Polynomial) -> Polynomial { &rhs + self }
            }
            impl Sub<&Polynomial> for $scalar {
                type Output = Polynomial;
                fn sub(self, rhs: &Polynomial) -> Polynomial { &(-rhs) + self }
            }
            impl Sub<Polynomial> for $scalar {
                type Output = Polynomial;
                fn sub(self, rhs: Polynomial) -> Polynomial { &(-rhs) + self }
            }
            impl Mul<&Polynomial> for $scalar {
                type Output = Polynomial;
                fn mul(self, rhs: &Polynomial) -> Polynomial { rhs * self }
            }
            impl Mul<Polynomial> for $scalar {
                type Output = Polynomial;
                fn mul(self, rhs: Polynomial) -> Polynomial { &rhs * self }
            }
        )*
    };
}

owned_scalar_ops!(f64, Complex64);

// ============================================================================
// Display
// ============================================================================

/// Renders a polynomial in ascending powers, e.g. `-1+x¹⁰` or `(1+2i)x-3x²`
pub struct PolynomialDisplay<'a> {
    polynomial: &'a Polynomial,
    precision: usize,
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.display(defaults::DISPLAY_PRECISION), f)
    }
}

impl fmt::Display for PolynomialDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        for (power, &c) in self.polynomial.coefficients.iter().enumerate() {
            let re = round_to(c.re, self.precision);
            let im = round_to(c.im, self.precision);
            if re == 0.0 && im == 0.0 {
                continue;
            }
            let term = format_term(re, im, power, self.precision);
            if !out.is_empty() && !term.starts_with('-') {
                out.push('+');
            }
            out.push_str(&term);
        }
        if out.is_empty() {
            out.push('0');
        }
        f.write_str(&out)
    }
}

fn round_to(value: f64, precision: usize) -> f64 {
    let scale = 10f64.powi(precision as i32);
    (value * scale).round() / scale
}

/// Format a rounded number, dropping a trailing `.0` and zero decimals
fn format_number(value: f64, precision: usize) -> String {
    let text = format!("{:.*}", precision, value);
    let text = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    };
    if text == "-0" { "0".to_string() } else { text }
}

fn format_term(re: f64, im: f64, power: usize, precision: usize) -> String {
    let monomial = match power {
        0 => String::new(),
        1 => "x".to_string(),
        n => format!("x{}", superscript(n)),
    };

    if im == 0.0 {
        return if power == 0 {
            format_number(re, precision)
        } else if re == 1.0 {
            monomial
        } else if re == -1.0 {
            format!("-{monomial}")
        } else {
            format!("{}{monomial}", format_number(re, precision))
        };
    }

    let imaginary = format!("{}i", format_number(im.abs(), precision));
    let coefficient = if re == 0.0 {
        let sign = if im < 0.0 { "-" } else { "" };
        format!("({sign}{imaginary})")
    } else {
        let sign = if im < 0.0 { '-' } else { '+' };
        format!("({}{sign}{imaginary})", format_number(re, precision))
    };
    format!("{coefficient}{monomial}")
}

fn superscript(n: usize) -> String {
    const DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];
    n.to_string()
        .bytes()
        .map(|b| DIGITS[(b - b'0') as usize])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    fn p(coeffs: &[f64]) -> Polynomial {
        Polynomial::new(coeffs.iter().copied()).unwrap()
    }

    #[test]
    fn empty_is_invalid() {
        let err = Polynomial::new(Vec::<f64>::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
    }

    #[test]
    fn trailing_zeros_stripped() {
        let poly = p(&[1.0, 2.0, 0.0, 0.0]);
        assert_eq!(poly.coefficients(), &[c(1.0, 0.0), c(2.0, 0.0)]);
        assert_eq!(poly.degree(), 1);
        assert!(p(&[0.0, 0.0]).is_zero());
        assert_eq!(p(&[0.0, 0.0]).coefficients().len(), 1);
    }

    #[test]
    fn add_pads_and_strips() {
        let a = p(&[1.0, 2.0, 3.0]);
        let b = p(&[1.0, 0.0, -3.0]);
        assert_eq!((&a + &b).coefficients(), &[c(2.0, 0.0), c(2.0, 0.0)]);
        assert_eq!((&a + 4.0).coefficients()[0], c(5.0, 0.0));
    }

    #[test]
    fn multiply_by_x_shifts() {
        let a = p(&[1.0, 2.0]);
        let x = Polynomial::x();
        assert_eq!((&a * &x).coefficients(), &[c(0.0, 0.0), c(1.0, 0.0), c(2.0, 0.0)]);
        assert_eq!((&x * &a).coefficients(), (&a * &x).coefficients());
        assert!((&Polynomial::zero() * &x).is_zero());
    }

    #[test]
    fn convolution() {
        // (1 + x)(1 - x) = 1 - x²
        let product = p(&[1.0, 1.0]) * p(&[1.0, -1.0]);
        assert_eq!(product, p(&[1.0, 0.0, -1.0]));
        assert_eq!(product.degree(), 2);
        assert!((p(&[1.0, 1.0]) * Polynomial::zero()).is_zero());
    }

    #[test]
    fn scalar_on_either_side() {
        let a = p(&[1.0, 1.0]);
        assert_eq!(2.0 * &a, p(&[2.0, 2.0]));
        assert_eq!(1.0 - &a, p(&[0.0, -1.0]));
        assert_eq!(&a * c(0.0, 1.0), Polynomial::new([c(0.0, 1.0), c(0.0, 1.0)]).unwrap());
    }

    #[test]
    fn power_zero_is_one() {
        assert_eq!(p(&[3.0, 7.0]).power(0), Polynomial::one());
        assert_eq!(Polynomial::zero().power(0), Polynomial::one());
        assert_eq!(Polynomial::x().power(3), p(&[0.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn horner_evaluation() {
        let f = p(&[-1.0, 0.0, 1.0]);
        assert_eq!(f.evaluate(3.0), c(8.0, 0.0));
        assert_eq!(f.evaluate(c(0.0, 1.0)), c(-2.0, 0.0));
    }

    #[test]
    fn derivative_of_polynomial_and_constant() {
        assert_eq!(p(&[5.0, 3.0, 2.0, 1.0]).derivative(), p(&[3.0, 4.0, 3.0]));
        assert!(p(&[7.0]).derivative().is_zero());
        assert_eq!(Polynomial::unity(10).derivative(), {
            let mut coeffs = vec![0.0; 10];
            coeffs[9] = 10.0;
            p(&coeffs)
        });
    }

    #[test]
    fn from_roots_builds_monic_product() {
        let f = Polynomial::from_roots(&[c(1.0, 0.0), c(2.0, 0.0)]);
        assert_eq!(f, p(&[2.0, -3.0, 1.0]));
        assert_eq!(Polynomial::from_roots(&[]), Polynomial::one());
    }

    #[test]
    fn unity_polynomial() {
        assert_eq!(Polynomial::unity(3), p(&[-1.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn roots_of_constant_are_empty() {
        assert!(Polynomial::constant(3.0).roots().unwrap().is_empty());
    }

    #[test]
    fn root_hull_of_constant_is_invalid() {
        assert!(matches!(
            Polynomial::one().root_hull(),
            Err(Error::InvalidInput { .. })
        ));
    }

    #[test]
    fn approx_eq_tolerates_noise() {
        let a = p(&[1.0, 2.0]);
        let b = p(&[1.0 + 1e-12, 2.0]);
        assert_ne!(a, b);
        assert!(a.approx_eq(&b, 1e-9));
        assert!(!a.approx_eq(&p(&[1.0, 2.0, 1e-3]), 1e-9));
    }

    #[test]
    fn display_snapshots() {
        insta::assert_snapshot!(Polynomial::unity(10), @"-1+x¹⁰");
        insta::assert_snapshot!(p(&[0.0, 0.0, 10.0]), @"10x²");
        insta::assert_snapshot!(p(&[2.0, -1.0, 1.0]), @"2-x+x²");
        insta::assert_snapshot!(p(&[-1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0]), @"-1+x+x⁶");
        insta::assert_snapshot!(Polynomial::zero(), @"0");
        insta::assert_snapshot!(p(&[0.333333, -2.5]), @"0.33-2.5x");
        insta::assert_snapshot!(
            Polynomial::new([c(0.0, 0.0), c(1.0, 2.0), c(0.0, -1.0)]).unwrap(),
            @"(1+2i)x+(-1i)x²"
        );
    }

    #[test]
    fn display_precision_is_configurable() {
        let f = p(&[0.123456, 1.0]);
        assert_eq!(f.display(4).to_string(), "0.1235+x");
        assert_eq!(f.display(0).to_string(), "x");
    }
}
