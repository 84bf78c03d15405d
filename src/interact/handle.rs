//! Draggable handle shapes
//!
//! Each shape knows how to:
//! - report the anchor point a drag moves
//! - move that anchor
//! - hit-test a cursor position

use enum_dispatch::enum_dispatch;
use glam::DVec2;

/// Common behavior for every draggable shape
#[enum_dispatch]
pub trait Anchored {
    /// The point a drag displaces
    fn anchor(&self) -> DVec2;

    /// Move the anchor to `to`
    fn set_anchor(&mut self, to: DVec2);

    /// Whether `cursor` is on the shape
    fn contains(&self, cursor: DVec2) -> bool;

    /// Called when a press lands on the shape, before the anchor is read.
    /// Shapes with several candidate anchors pick one here.
    fn grab(&mut self, _cursor: DVec2) {}
}

/// A filled circle; the anchor is its center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub center: DVec2,
    pub radius: f64,
}

impl Marker {
    pub fn new(center: DVec2, radius: f64) -> Self {
        Self { center, radius }
    }
}

impl Anchored for Marker {
    fn anchor(&self) -> DVec2 {
        self.center
    }

    fn set_anchor(&mut self, to: DVec2) {
        self.center = to;
    }

    fn contains(&self, cursor: DVec2) -> bool {
        self.center.distance(cursor) <= self.radius
    }
}

/// An axis-aligned rectangle; the anchor is its lower-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub corner: DVec2,
    pub size: DVec2,
}

impl Anchored for Tile {
    fn anchor(&self) -> DVec2 {
        self.corner
    }

    fn set_anchor(&mut self, to: DVec2) {
        self.corner = to;
    }

    fn contains(&self, cursor: DVec2) -> bool {
        let rel = cursor - self.corner;
        rel.x >= 0.0 && rel.y >= 0.0 && rel.x <= self.size.x && rel.y <= self.size.y
    }
}

/// A closed polygon; the anchor is whichever vertex was nearest the press
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    vertices: Vec<DVec2>,
    selected: usize,
}

impl Outline {
    /// An outline over `vertices`, anchored at the first one until grabbed.
    /// Returns `None` for an empty vertex list.
    pub fn new(vertices: Vec<DVec2>) -> Option<Self> {
        if vertices.is_empty() {
            None
        } else {
            Some(Self {
                vertices,
                selected: 0,
            })
        }
    }

    pub fn vertices(&self) -> &[DVec2] {
        &self.vertices
    }

    /// Index of the vertex the anchor refers to
    pub fn selected(&self) -> usize {
        self.selected
    }
}

impl Anchored for Outline {
    fn anchor(&self) -> DVec2 {
        self.vertices[self.selected]
    }

    fn set_anchor(&mut self, to: DVec2) {
        self.vertices[self.selected] = to;
    }

    /// Even-odd point-in-polygon test
    fn contains(&self, cursor: DVec2) -> bool {
        let n = self.vertices.len();
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let (a, b) = (self.vertices[i], self.vertices[j]);
            if (a.y > cursor.y) != (b.y > cursor.y)
                && cursor.x < (b.x - a.x) * (cursor.y - a.y) / (b.y - a.y) + a.x
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    fn grab(&mut self, cursor: DVec2) {
        self.selected = self
            .vertices
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                a.distance_squared(cursor)
                    .total_cmp(&b.distance_squared(cursor))
            })
            .map(|(i, _)| i)
            .unwrap_or(0);
    }
}

/// Any draggable shape
#[enum_dispatch(Anchored)]
#[derive(Debug, Clone, PartialEq)]
pub enum Handle {
    Marker,
    Tile,
    Outline,
}
