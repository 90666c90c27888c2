/// Round an elevation to the nearest integer, halves rounding up (toward +inf).
///
/// `2.5 -> 3`, `-2.5 -> -2`. Used for both the score and the current-elevation display.
#[inline]
pub fn round_elevation(y: f32) -> i32 {
    (y + 0.5).floor() as i32
}

/// Best rounded elevation reached so far. Never decreases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Score {
    best: i32,
}

impl Score {
    #[inline]
    pub fn value(&self) -> i32 {
        self.best
    }

    /// Feed the current elevation. Returns true if the score went up.
    pub fn observe(&mut self, elevation: f32) -> bool {
        let rounded = round_elevation(elevation);
        if rounded > self.best {
            self.best = rounded;
            return true;
        }
        false
    }
}
