//! Default settings for the solver, display and interaction layers

/// Decimal places kept when rendering coefficients as text
pub const DISPLAY_PRECISION: usize = 2;

/// Convergence threshold handed to the Schur decomposition
pub const SOLVER_EPSILON: f64 = f64::EPSILON;

/// Iteration cap for the Schur decomposition and the fallback root iteration
pub const SOLVER_MAX_ITERATIONS: usize = 10_000;

/// Relative step size at which the fallback root iteration stops
pub const ROOT_TOLERANCE: f64 = 1e-14;

/// Cross product, relative to both edge lengths, below which three points
/// count as collinear
pub const COLLINEAR_TOLERANCE: f64 = 1e-12;

/// Radius of a root marker, in plane units
pub const MARKER_RADIUS: f64 = 0.02;

/// Number of roots in the start-up polynomial `xⁿ - 1`
pub const ROOT_COUNT: usize = 10;

/// Largest exponent accepted by the expression parser
pub const MAX_EXPONENT: u32 = 256;

/// Largest degree an expression may build up to
pub const MAX_DEGREE: usize = 1024;
