//! The state of one drag, from press to release

use glam::DVec2;

/// Snapshot taken when a drag starts.
///
/// Positions are captured once at press time; every motion event is applied
/// as a displacement from the press point, so rounding does not accumulate
/// over a long drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    origins: Vec<DVec2>,
    selected: usize,
    press: DVec2,
    displacement: DVec2,
}

impl DragSession {
    /// Start a drag of `origins[selected]` at cursor position `press`.
    /// Returns `None` when `selected` is out of range.
    pub fn begin(origins: Vec<DVec2>, selected: usize, press: DVec2) -> Option<Self> {
        if selected >= origins.len() {
            return None;
        }
        Some(Self {
            origins,
            selected,
            press,
            displacement: DVec2::ZERO,
        })
    }

    /// Record the cursor position of a motion event
    pub fn moved_to(&mut self, cursor: DVec2) {
        self.displacement = cursor - self.press;
    }

    /// Index of the point being dragged
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Cumulative cursor displacement since the press
    pub fn displacement(&self) -> DVec2 {
        self.displacement
    }

    /// Positions at the moment of the press
    pub fn origins(&self) -> &[DVec2] {
        &self.origins
    }

    /// Where the dragged point is now
    pub fn current(&self) -> DVec2 {
        self.origins[self.selected] + self.displacement
    }

    /// All positions, with the dragged one displaced
    pub fn positions(&self) -> Vec<DVec2> {
        let mut positions = self.origins.clone();
        positions[self.selected] = self.current();
        positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn out_of_range_selection() {
        assert!(DragSession::begin(vec![DVec2::ZERO], 1, DVec2::ZERO).is_none());
    }

    #[test]
    fn displacement_is_from_press_not_last_motion() {
        let mut s = DragSession::begin(vec![dvec2(1.0, 0.0), dvec2(0.0, 1.0)], 1, dvec2(0.0, 1.0))
            .unwrap();
        s.moved_to(dvec2(0.5, 1.0));
        s.moved_to(dvec2(0.25, 1.5));
        assert_eq!(s.displacement(), dvec2(0.25, 0.5));
        assert_eq!(s.positions(), vec![dvec2(1.0, 0.0), dvec2(0.25, 1.5)]);
        assert_eq!(s.origins()[1], dvec2(0.0, 1.0));
    }
}
