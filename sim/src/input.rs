/// Player input flags for one tick.
///
/// Written by the input collaborator between ticks, copied once at the top of a tick and
/// read-only for the rest of it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl InputState {
    /// Forward axis in {-1, 0, 1}. Opposite keys cancel.
    #[inline]
    pub fn forward_axis(&self) -> f32 {
        (self.forward as i8 - self.back as i8) as f32
    }

    /// Strafe axis in {-1, 0, 1}, positive to the right. Opposite keys cancel.
    #[inline]
    pub fn right_axis(&self) -> f32 {
        (self.right as i8 - self.left as i8) as f32
    }

    #[inline]
    pub fn has_direction(&self) -> bool {
        self.forward_axis() != 0.0 || self.right_axis() != 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axes_from_flags() {
        let input = InputState {
            forward: true,
            left: true,
            ..InputState::default()
        };
        assert_eq!(input.forward_axis(), 1.0);
        assert_eq!(input.right_axis(), -1.0);
        assert!(input.has_direction());
    }

    #[test]
    fn opposite_keys_cancel() {
        let input = InputState {
            forward: true,
            back: true,
            left: true,
            right: true,
            jump: false,
        };
        assert_eq!(input.forward_axis(), 0.0);
        assert_eq!(input.right_axis(), 0.0);
        assert!(!input.has_direction());
    }
}
