use glam::Vec2;

/// A high-level camera control action.
///
/// Deltas are in logical pixels so the controls can scale them against the
/// current viewport height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlAction {
    /// Orbit around the target by a pointer drag delta.
    Rotate(Vec2),
    /// Translate the target in the view plane by a pointer drag delta.
    Pan(Vec2),
    /// Move toward (negative) or away from (positive) the target.
    Dolly(f32),
}

impl ControlAction {
    /// True when the action would not move the camera at all.
    pub fn is_noop(&self) -> bool {
        match self {
            Self::Rotate(d) | Self::Pan(d) => *d == Vec2::ZERO,
            Self::Dolly(d) => *d == 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_deltas_are_noops() {
        assert!(ControlAction::Rotate(Vec2::ZERO).is_noop());
        assert!(ControlAction::Pan(Vec2::ZERO).is_noop());
        assert!(ControlAction::Dolly(0.0).is_noop());
    }

    #[test]
    fn non_zero_deltas_are_not_noops() {
        assert!(!ControlAction::Rotate(Vec2::new(1.0, 0.0)).is_noop());
        assert!(!ControlAction::Dolly(-3.0).is_noop());
    }
}
