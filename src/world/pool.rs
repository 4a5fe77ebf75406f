//! Fixed-size body pools recycled ahead of the camera.
//!
//! A pool never grows or shrinks after construction. Members that scroll
//! more than one width past the camera's left edge are moved back in front,
//! which gives an endless world from a handful of bodies.

use super::body::Body;

#[derive(Debug, Clone)]
pub struct BodyPool {
    bodies: Vec<Body>,
    /// Index of the most recently placed member (the rightmost one).
    last_placed: usize,
}

impl BodyPool {
    /// Build a pool from its initial members. The rightmost member becomes
    /// the last-placed one. `bodies` must not be empty.
    pub fn new(bodies: Vec<Body>) -> Self {
        debug_assert!(!bodies.is_empty(), "pool needs at least one member");
        let last_placed = bodies
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.x.total_cmp(&b.x))
            .map(|(i, _)| i)
            .unwrap_or(0);
        Self {
            bodies,
            last_placed,
        }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn last_placed_index(&self) -> usize {
        self.last_placed
    }

    /// The member placed most recently, which is the rightmost one.
    pub fn last_placed(&self) -> &Body {
        &self.bodies[self.last_placed]
    }

    /// First member (in pool order) whose left edge is more than one
    /// member-width behind `scroll_x`.
    pub fn recycle_candidate(&self, scroll_x: f64) -> Option<usize> {
        self.bodies
            .iter()
            .position(|body| scroll_x - body.x > body.width)
    }

    /// Shift member `index` forward by `offset` and mark it last placed.
    pub fn advance(&mut self, index: usize, offset: f64) {
        let body = &mut self.bodies[index];
        body.x += offset;
        self.last_placed = index;
    }

    /// Move member `index` to `margin` past the last-placed member.
    pub fn place_after_last(&mut self, index: usize, margin: f64) {
        let x = self.bodies[self.last_placed].x + margin;
        let body = &mut self.bodies[index];
        body.set_position(x, body.y);
        self.last_placed = index;
    }

    /// Number of members with `after_x < x <= upto_x`.
    pub fn count_between(&self, after_x: f64, upto_x: f64) -> usize {
        self.bodies
            .iter()
            .filter(|body| body.x > after_x && body.x <= upto_x)
            .count()
    }
}
