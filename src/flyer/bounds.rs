//! Boundary-exit tracking
//!
//! Flyers spawn off screen and fly through the play area. A flyer is only
//! reclaimed once it has been inside the area at least once and has then
//! left it again, so a spawn position outside the area never counts as an
//! exit.

/// Visible play-area dimensions, anchored at the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
}

impl PlayArea {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Top-left corner strictly inside the area
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x > 0.0 && y > 0.0 && x < self.width && y < self.height
    }

    /// Exit test for a flyer of size `w` x `h` at `x`, `y`.
    ///
    /// The left/top edges compare against the flyer's own size while the
    /// right/bottom edges compare against the area. The two sides are not
    /// symmetric: a flyer within `w` of the left edge already counts as out.
    pub fn is_outside(&self, x: f32, y: f32, w: f32, h: f32) -> bool {
        x < w || y < h || x > self.width || y > self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryState {
    #[default]
    NotYetEntered,
    Entered,
    /// Terminal
    Exited,
}

/// Sticky enter/exit state machine
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundaryTracker {
    state: BoundaryState,
}

impl BoundaryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> BoundaryState {
        self.state
    }

    pub fn has_entered(&self) -> bool {
        self.state != BoundaryState::NotYetEntered
    }

    pub fn has_exited(&self) -> bool {
        self.state == BoundaryState::Exited
    }

    /// Advance one tick. Returns true on the tick the flyer exits.
    pub fn observe(&mut self, area: &PlayArea, x: f32, y: f32, w: f32, h: f32) -> bool {
        match self.state {
            BoundaryState::Exited => false,
            _ if area.contains(x, y) => {
                self.state = BoundaryState::Entered;
                false
            }
            BoundaryState::Entered if area.is_outside(x, y, w, h) => {
                self.state = BoundaryState::Exited;
                true
            }
            _ => false,
        }
    }
}
