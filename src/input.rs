// Pointer snapshot taken once per frame from the window.
// The reveal logic only ever sees this struct, never minifb directly.

/// Where the pointer is now, where it was last frame, and whether the left
/// button went down this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub pos: (f32, f32),
    pub prev: (f32, f32),
    pub down: bool,
    /// True only on the frame the button goes from up to down.
    pub clicked: bool,
    /// A real position has been seen; until then `pos` is a placeholder.
    pub tracking: bool,
}

impl PointerState {
    /// Roll the snapshot forward by one frame.
    /// `pos` is `None` when the window reports no position; the pointer is
    /// then treated as not having moved. The first position seen counts as
    /// both current and previous, so it never turns into travel.
    pub fn advance(&mut self, pos: Option<(f32, f32)>, down: bool) {
        self.prev = self.pos;
        if let Some(p) = pos {
            self.pos = p;
            if !self.tracking {
                self.prev = p;
                self.tracking = true;
            }
        }
        self.clicked = down && !self.down;
        self.down = down;
    }

    /// Start a fresh snapshot at `pos` with no movement and no button held.
    pub fn at(pos: (f32, f32)) -> Self {
        Self { pos, prev: pos, down: false, clicked: false, tracking: true }
    }

    /// Euclidean distance between the current and previous position.
    pub fn travel(&self) -> f64 {
        let dx = self.pos.0 as f64 - self.prev.0 as f64;
        let dy = self.pos.1 as f64 - self.prev.1 as f64;
        (dx * dx + dy * dy).sqrt()
    }
}
