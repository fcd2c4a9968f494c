use glam::Vec2;

use crate::action::ControlAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragMode {
    Rotate,
    Pan,
}

/// Tracks the pointer between events and turns drags and wheel turns into
/// [`ControlAction`]s.
///
/// Primary drag rotates, secondary or middle drag pans. Holding a pan
/// modifier (ctrl, shift, meta) turns a primary drag into a pan.
#[derive(Debug, Default)]
pub struct PointerTracker {
    drag: Option<(PointerButton, DragMode)>,
    last_position: Option<Vec2>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn button_down(&mut self, button: PointerButton, pan_modifier: bool) {
        if self.drag.is_some() {
            return;
        }
        let mode = match button {
            PointerButton::Primary if pan_modifier => DragMode::Pan,
            PointerButton::Primary => DragMode::Rotate,
            PointerButton::Secondary | PointerButton::Middle => DragMode::Pan,
        };
        tracing::debug!(?button, ?mode, "drag started");
        self.drag = Some((button, mode));
    }

    pub fn button_up(&mut self, button: PointerButton) {
        if matches!(self.drag, Some((held, _)) if held == button) {
            self.drag = None;
        }
    }

    /// Record a new pointer position. Returns an action when a drag is in
    /// progress and the pointer actually moved.
    pub fn moved(&mut self, position: Vec2) -> Option<ControlAction> {
        let previous = self.last_position.replace(position);
        let (_, mode) = self.drag?;
        let delta = position - previous?;
        let action = match mode {
            DragMode::Rotate => ControlAction::Rotate(delta),
            DragMode::Pan => ControlAction::Pan(delta),
        };
        (!action.is_noop()).then_some(action)
    }

    /// Wheel turns map straight to dolly; the sign follows the scroll axis
    /// (positive scrolls down, which moves away from the target).
    pub fn wheel(&mut self, delta_y: f32) -> Option<ControlAction> {
        let action = ControlAction::Dolly(delta_y);
        (!action.is_noop()).then_some(action)
    }

    /// Pointer left the window: finish any drag.
    pub fn left(&mut self) {
        self.drag = None;
        self.last_position = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_drag_rotates() {
        let mut tracker = PointerTracker::new();
        assert_eq!(tracker.moved(Vec2::new(10.0, 10.0)), None);
        tracker.button_down(PointerButton::Primary, false);
        assert_eq!(
            tracker.moved(Vec2::new(15.0, 8.0)),
            Some(ControlAction::Rotate(Vec2::new(5.0, -2.0)))
        );
        tracker.button_up(PointerButton::Primary);
        assert_eq!(tracker.moved(Vec2::new(30.0, 30.0)), None);
    }

    #[test]
    fn secondary_and_modified_primary_pan() {
        let mut tracker = PointerTracker::new();
        tracker.moved(Vec2::ZERO);
        tracker.button_down(PointerButton::Secondary, false);
        assert_eq!(
            tracker.moved(Vec2::new(3.0, 4.0)),
            Some(ControlAction::Pan(Vec2::new(3.0, 4.0)))
        );
        tracker.button_up(PointerButton::Secondary);

        tracker.button_down(PointerButton::Primary, true);
        assert!(matches!(
            tracker.moved(Vec2::new(4.0, 4.0)),
            Some(ControlAction::Pan(_))
        ));
    }

    #[test]
    fn releasing_other_button_keeps_drag() {
        let mut tracker = PointerTracker::new();
        tracker.button_down(PointerButton::Primary, false);
        tracker.button_down(PointerButton::Secondary, false);
        tracker.button_up(PointerButton::Secondary);
        assert!(tracker.is_dragging());
        tracker.button_up(PointerButton::Primary);
        assert!(!tracker.is_dragging());
    }

    #[test]
    fn no_motion_no_action() {
        let mut tracker = PointerTracker::new();
        tracker.moved(Vec2::new(1.0, 1.0));
        tracker.button_down(PointerButton::Primary, false);
        assert_eq!(tracker.moved(Vec2::new(1.0, 1.0)), None);
    }

    #[test]
    fn wheel_maps_to_dolly() {
        let mut tracker = PointerTracker::new();
        assert_eq!(tracker.wheel(2.0), Some(ControlAction::Dolly(2.0)));
        assert_eq!(tracker.wheel(0.0), None);
    }

    #[test]
    fn leaving_window_ends_drag() {
        let mut tracker = PointerTracker::new();
        tracker.moved(Vec2::ZERO);
        tracker.button_down(PointerButton::Primary, false);
        tracker.left();
        assert!(!tracker.is_dragging());
        assert_eq!(tracker.moved(Vec2::new(5.0, 5.0)), None);
    }
}
