//! Planar convex hull by monotone chain
//!
//! Points are sorted by x then y, and the lower and upper chains are built
//! with a stack that pops every vertex not making a clear left turn. A
//! nearly collinear triple counts as straight (see
//! [`turns_left`](crate::geometry::turns_left)), so edge points are dropped
//! and float noise along a line cannot flip the result. The finished cycle
//! is rotated so it begins at the vertex that sorts first by angle from the
//! origin, then by decreasing distance.

use std::cmp::Ordering;

use glam::DVec2;
use num_complex::Complex64;

use crate::errors::{Error, Result};
use crate::geometry::{all_finite, dedup_points, origin_angle, to_complex, turns_left};
use crate::log::trace;

/// Ordered vertices of a convex hull, counter-clockwise, without repeating
/// the first vertex at the end.
///
/// Hulls of one or two distinct points hold those points as given.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Hull {
    vertices: Vec<DVec2>,
}

impl Hull {
    /// The vertices in hull order
    pub fn vertices(&self) -> &[DVec2] {
        &self.vertices
    }

    /// Number of vertices
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// True for the empty hull, used when there is nothing to wrap
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertices as complex numbers
    pub fn to_complex(&self) -> Vec<Complex64> {
        self.vertices.iter().copied().map(to_complex).collect()
    }

    /// Consume the hull, returning its vertices
    pub fn into_vertices(self) -> Vec<DVec2> {
        self.vertices
    }

    /// Whether `p` lies inside or on the closed hull, allowing `tolerance`
    /// of slack across each edge.
    ///
    /// For one- and two-vertex hulls this is distance to the point or segment.
    pub fn contains(&self, p: DVec2, tolerance: f64) -> bool {
        match self.vertices.as_slice() {
            [] => false,
            [a] => a.distance(p) <= tolerance,
            [a, b] => segment_distance(*a, *b, p) <= tolerance,
            vs => vs.iter().zip(vs.iter().cycle().skip(1)).all(|(&a, &b)| {
                let edge = b - a;
                let len = edge.length();
                // signed distance to the left of the edge
                edge.perp_dot(p - a) / len >= -tolerance
            }),
        }
    }
}

fn segment_distance(a: DVec2, b: DVec2, p: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return a.distance(p);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (a + ab * t).distance(p)
}

/// Convex hull of a set of points.
///
/// Duplicate points are collapsed first. An empty set is an
/// [`Error::InvalidInput`]; non-finite coordinates are an
/// [`Error::NumericDegeneracy`]. Points lying on a hull edge are not vertices.
pub fn convex_hull(points: &[DVec2]) -> Result<Hull> {
    let distinct = dedup_points(points);
    if distinct.is_empty() {
        return Err(Error::invalid("convex hull of an empty point set"));
    }
    if !all_finite(&distinct) {
        return Err(Error::degenerate("point set contains NaN or infinite coordinates"));
    }
    if distinct.len() <= 2 {
        return Ok(Hull { vertices: distinct });
    }

    let mut sorted = distinct;
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));

    let mut lower: Vec<DVec2> = Vec::with_capacity(sorted.len());
    for &p in &sorted {
        push_turning_left(&mut lower, p);
    }
    let mut upper: Vec<DVec2> = Vec::with_capacity(sorted.len());
    for &p in sorted.iter().rev() {
        push_turning_left(&mut upper, p);
    }

    // Each chain ends where the other starts.
    lower.pop();
    upper.pop();
    let mut vertices = lower;
    vertices.extend(upper);
    prune_flat_vertices(&mut vertices);
    trace!(points = sorted.len(), vertices = vertices.len(), "hull built");

    let first = seed_index(&vertices);
    vertices.rotate_left(first);
    Ok(Hull { vertices })
}

/// Convex hull of complex numbers, read as points in the plane
pub fn convex_hull_complex(values: &[Complex64]) -> Result<Hull> {
    convex_hull(&crate::geometry::points_of(values))
}

/// Push `p` onto a chain after popping every vertex that would not turn left
fn push_turning_left(chain: &mut Vec<DVec2>, p: DVec2) {
    while let &[.., o, a] = chain.as_slice() {
        if turns_left(o, a, p) {
            break;
        }
        chain.pop();
    }
    chain.push(p);
}

/// Remove vertices that do not turn left with their cyclic neighbours.
///
/// The sweep never tests the two joints where the chains meet, and near
/// collinear input can leave a flat vertex there.
fn prune_flat_vertices(vertices: &mut Vec<DVec2>) {
    let mut i = 0;
    while vertices.len() > 2 && i < vertices.len() {
        let n = vertices.len();
        let prev = vertices[(i + n - 1) % n];
        let next = vertices[(i + 1) % n];
        if turns_left(prev, vertices[i], next) {
            i += 1;
        } else {
            vertices.remove(i);
            i = i.saturating_sub(1);
        }
    }
}

/// Index of the vertex that comes first by origin angle, then by decreasing
/// distance from the origin
fn seed_index(vertices: &[DVec2]) -> usize {
    let key = |p: &DVec2| (origin_angle(*p), -p.length());
    vertices
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            let (aa, ad) = key(a);
            let (ba, bd) = key(b);
            aa.partial_cmp(&ba)
                .unwrap_or(Ordering::Equal)
                .then(ad.partial_cmp(&bd).unwrap_or(Ordering::Equal))
        })
        .map(|(i, _)| i)
        .unwrap_or(0)
}
