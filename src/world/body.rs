//! Positioned bodies. Every entity in the world is a `Body` tagged with the
//! role it plays; behavior is dispatched by the scene on `BodyKind`.

/// Role of a body in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyKind {
    /// Floor segment. Touching it ends the run.
    Ground,
    /// Landing surface. Landing refuels and scores.
    Platform,
    Player,
}

/// Axis-aligned box. `(x, y)` is the top-left corner; y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub kind: BodyKind,
}

impl Body {
    pub fn new(kind: BodyKind, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            kind,
        }
    }

    /// Build a body resting on `floor_y` (its bottom edge at `floor_y`).
    pub fn resting_on(kind: BodyKind, x: f64, floor_y: f64, width: f64, height: f64) -> Self {
        Self::new(kind, x, floor_y - height, width, height)
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    /// Strict overlap: touching edges do not count.
    pub fn overlaps(&self, other: &Body) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    pub fn overlaps_horizontally(&self, other: &Body) -> bool {
        self.left() < other.right() && self.right() > other.left()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_and_center() {
        let body = Body::new(BodyKind::Platform, 10.0, 20.0, 80.0, 15.0);
        assert_eq!(body.left(), 10.0);
        assert_eq!(body.right(), 90.0);
        assert_eq!(body.top(), 20.0);
        assert_eq!(body.bottom(), 35.0);
        assert_eq!(body.center_x(), 50.0);
        assert_eq!(body.center_y(), 27.5);
    }

    #[test]
    fn test_resting_on_places_bottom_at_floor() {
        let body = Body::resting_on(BodyKind::Platform, 0.0, 620.0, 80.0, 15.0);
        assert_eq!(body.bottom(), 620.0);
        assert_eq!(body.top(), 605.0);
    }

    #[test]
    fn test_overlap_is_strict() {
        let a = Body::new(BodyKind::Player, 0.0, 0.0, 10.0, 10.0);
        let touching = Body::new(BodyKind::Platform, 10.0, 0.0, 10.0, 10.0);
        let inside = Body::new(BodyKind::Platform, 5.0, 5.0, 10.0, 10.0);
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&inside));
        assert!(inside.overlaps(&a));
    }

    #[test]
    fn test_horizontal_overlap_ignores_height() {
        let a = Body::new(BodyKind::Player, 0.0, 0.0, 10.0, 10.0);
        let below = Body::new(BodyKind::Ground, 5.0, 500.0, 10.0, 10.0);
        assert!(a.overlaps_horizontally(&below));
        assert!(!a.overlaps(&below));
    }
}
