/// Axis-aligned rectangles and look/travel headings.  World units are
/// pixels; y grows downward.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Strict overlap: rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// A direction expressed as unit steps on each axis, e.g. `(1, 0)` is right
/// and `(1, -1)` is up-right.  Never `(0, 0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Heading {
    dx: i8,
    dy: i8,
}

impl Heading {
    pub const RIGHT: Heading = Heading { dx: 1, dy: 0 };
    pub const LEFT: Heading = Heading { dx: -1, dy: 0 };
    pub const UP: Heading = Heading { dx: 0, dy: -1 };

    /// Build a heading from raw axis signs.  Returns `None` for `(0, 0)`.
    pub fn from_axes(dx: i8, dy: i8) -> Option<Heading> {
        let dx = dx.signum();
        let dy = dy.signum();
        if dx == 0 && dy == 0 {
            None
        } else {
            Some(Heading { dx, dy })
        }
    }

    pub fn faces_right(&self) -> bool {
        self.dx > 0
    }

    pub fn faces_left(&self) -> bool {
        self.dx < 0
    }

    /// Mirror the horizontal component.  A purely vertical heading turns
    /// right, matching how a patrolling actor picks up a direction again.
    pub fn reversed_horizontal(&self) -> Heading {
        if self.faces_right() {
            Heading::LEFT
        } else {
            Heading::RIGHT
        }
    }

    /// Velocity components for `speed` px/s; diagonals are normalised so a
    /// diagonal shot travels as fast as a straight one.
    pub fn velocity(&self, speed: f32) -> (f32, f32) {
        let (dx, dy) = (self.dx as f32, self.dy as f32);
        let len = (dx * dx + dy * dy).sqrt();
        (dx / len * speed, dy / len * speed)
    }
}

impl Default for Heading {
    fn default() -> Self {
        Heading::RIGHT
    }
}
