//! Translates results-window drag gestures into persisted panel positions.

use egui::{Pos2, Vec2};
use shared::domain::PanelPosition;

pub const RESULTS_DEFAULT_SIZE: Vec2 = Vec2::new(298.0, 276.0);
pub const RESULTS_MIN_SIZE: Vec2 = Vec2::new(200.0, 100.0);
pub const RESULTS_MAX_SIZE: Vec2 = Vec2::new(600.0, 400.0);

pub fn window_pos(origin: Pos2, position: PanelPosition) -> Pos2 {
    origin + Vec2::new(position.x as f32, position.y as f32)
}

pub fn panel_offset(origin: Pos2, window_min: Pos2) -> PanelPosition {
    let offset = window_min - origin;
    PanelPosition::new(f64::from(offset.x), f64::from(offset.y))
}

/// Watches the results window across frames and reports a position once
/// per completed drag.
#[derive(Debug, Clone)]
pub struct PanelDragTracker {
    last_offset: PanelPosition,
    moved_while_down: bool,
}

impl PanelDragTracker {
    pub fn new(initial: PanelPosition) -> Self {
        Self {
            last_offset: initial,
            moved_while_down: false,
        }
    }

    /// Returns the new offset on the frame the pointer is released after the
    /// window moved.
    pub fn observe(&mut self, offset: PanelPosition, pointer_down: bool) -> Option<PanelPosition> {
        if offset != self.last_offset {
            self.last_offset = offset;
            self.moved_while_down = true;
        }

        if pointer_down || !self.moved_while_down {
            return None;
        }
        self.moved_while_down = false;
        Some(self.last_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_once_after_drag_stops() {
        let mut tracker = PanelDragTracker::new(PanelPosition::default());

        assert_eq!(tracker.observe(PanelPosition::default(), false), None);
        assert_eq!(tracker.observe(PanelPosition::new(10.0, 5.0), true), None);
        assert_eq!(tracker.observe(PanelPosition::new(40.0, 75.0), true), None);
        assert_eq!(
            tracker.observe(PanelPosition::new(40.0, 75.0), false),
            Some(PanelPosition::new(40.0, 75.0))
        );
        assert_eq!(tracker.observe(PanelPosition::new(40.0, 75.0), false), None);
    }

    #[test]
    fn clicks_without_movement_do_not_save() {
        let mut tracker = PanelDragTracker::new(PanelPosition::new(3.0, 4.0));
        assert_eq!(tracker.observe(PanelPosition::new(3.0, 4.0), true), None);
        assert_eq!(tracker.observe(PanelPosition::new(3.0, 4.0), false), None);
    }

    #[test]
    fn offsets_are_relative_to_the_results_area() {
        let origin = Pos2::new(300.0, 60.0);
        let position = PanelPosition::new(40.0, 75.0);
        let pos = window_pos(origin, position);
        assert_eq!(pos, Pos2::new(340.0, 135.0));
        assert_eq!(panel_offset(origin, pos), position);
    }
}
