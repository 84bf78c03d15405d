//! Press/motion/release controller over the recompute pipeline

use glam::DVec2;
use num_complex::Complex64;

use super::handle::{Anchored, Handle, Marker};
use super::session::DragSession;
use crate::defaults;
use crate::errors::Result;
use crate::geometry::{to_complex, to_point};
use crate::log::debug;
use crate::pipeline::{Frame, recompute_with};
use crate::polynomial::Polynomial;
use crate::solver::{CompanionSolver, RootSolver};

/// Settings for an [`Explorer`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplorerOptions {
    /// Hit radius of root and derivative-root markers
    pub marker_radius: f64,
}

impl Default for ExplorerOptions {
    fn default() -> Self {
        Self {
            marker_radius: defaults::MARKER_RADIUS,
        }
    }
}

/// Draggable roots of a polynomial, with the derived geometry kept current.
///
/// At most one drag is live at a time. A press while dragging is ignored,
/// and motion without a live drag does nothing.
#[derive(Debug)]
pub struct Explorer<S: RootSolver = CompanionSolver> {
    handles: Vec<Handle>,
    derivative_markers: Vec<Marker>,
    frame: Frame,
    session: Option<DragSession>,
    solver: S,
    options: ExplorerOptions,
}

impl Explorer {
    /// One marker per root of `polynomial`, found with the default solver
    pub fn new(polynomial: &Polynomial) -> Result<Self> {
        Self::with_solver(polynomial, CompanionSolver::default(), ExplorerOptions::default())
    }
}

impl<S: RootSolver> Explorer<S> {
    pub fn with_solver(polynomial: &Polynomial, solver: S, options: ExplorerOptions) -> Result<Self> {
        let roots = polynomial.roots_with(&solver)?;
        Self::from_roots(&roots, solver, options)
    }

    /// One marker per given root position
    pub fn from_roots(roots: &[Complex64], solver: S, options: ExplorerOptions) -> Result<Self> {
        let frame = recompute_with(&solver, roots)?;
        let handles = roots
            .iter()
            .map(|&r| Marker::new(to_point(r), options.marker_radius).into())
            .collect();
        let derivative_markers = frame
            .derivative_roots
            .iter()
            .map(|&r| Marker::new(to_point(r), options.marker_radius))
            .collect();
        Ok(Self {
            handles,
            derivative_markers,
            frame,
            session: None,
            solver,
            options,
        })
    }

    /// The most recent geometry
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Root handles, in root order
    pub fn handles(&self) -> &[Handle] {
        &self.handles
    }

    /// Derivative-root markers, paired with the frame's derivative roots by index
    pub fn derivative_markers(&self) -> &[Marker] {
        &self.derivative_markers
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Start dragging the handle under `cursor`, nearest anchor first.
    ///
    /// Returns whether a drag started.
    pub fn press(&mut self, cursor: DVec2) -> bool {
        if self.session.is_some() {
            return false;
        }
        let hit = self
            .handles
            .iter()
            .enumerate()
            .filter(|(_, h)| h.contains(cursor))
            .min_by(|(_, a), (_, b)| {
                a.anchor()
                    .distance_squared(cursor)
                    .total_cmp(&b.anchor().distance_squared(cursor))
            })
            .map(|(i, _)| i);
        let Some(index) = hit else {
            return false;
        };

        self.handles[index].grab(cursor);
        let origins = self.handles.iter().map(|h| h.anchor()).collect();
        self.session = DragSession::begin(origins, index, cursor);
        debug!(index, "drag started");
        self.session.is_some()
    }

    /// Apply a cursor move to the live drag and recompute.
    ///
    /// Returns `Ok(None)` when nothing is being dragged. On error the handles
    /// and the previous frame are left as they were.
    pub fn motion(&mut self, cursor: DVec2) -> Result<Option<&Frame>> {
        let Some(session) = self.session.as_mut() else {
            return Ok(None);
        };
        session.moved_to(cursor);
        let selected = session.selected();
        let current = session.current();
        let roots: Vec<Complex64> = session.positions().into_iter().map(to_complex).collect();

        let frame = recompute_with(&self.solver, &roots)?;
        self.handles[selected].set_anchor(current);
        self.pair_derivative_markers(&frame.derivative_roots);
        self.frame = frame;
        Ok(Some(&self.frame))
    }

    /// End the live drag, handing back its session
    pub fn release(&mut self) -> Option<DragSession> {
        let session = self.session.take();
        if session.is_some() {
            debug!("drag released");
        }
        session
    }

    /// Move marker `i` to derivative root `i`. Identity across frames is only
    /// the solver's output order.
    fn pair_derivative_markers(&mut self, roots: &[Complex64]) {
        self.derivative_markers.truncate(roots.len());
        for (marker, &root) in self.derivative_markers.iter_mut().zip(roots) {
            marker.set_anchor(to_point(root));
        }
        let radius = self.options.marker_radius;
        let known = self.derivative_markers.len();
        self.derivative_markers
            .extend(roots[known..].iter().map(|&r| Marker::new(to_point(r), radius)));
    }
}
