//! HUD state owned by a run: fuel gauge and score board.

use crate::core::easing::{Easing, Tween};

/// Fuel gauge showing a fraction in `[0, 1]`. Drops are shown instantly;
/// refills animate.
#[derive(Debug, Clone)]
pub struct FuelGauge {
    shown: f64,
    animation: Option<Tween>,
}

impl Default for FuelGauge {
    fn default() -> Self {
        Self::new()
    }
}

impl FuelGauge {
    pub fn new() -> Self {
        Self {
            shown: 1.0,
            animation: None,
        }
    }

    /// Fraction currently displayed.
    pub fn shown(&self) -> f64 {
        self.shown
    }

    /// Displayed percentage, rounded. Never below 0.
    pub fn percent(&self) -> u32 {
        (self.shown * 100.0).round().max(0.0) as u32
    }

    pub fn label(&self) -> String {
        format!("{}%", self.percent())
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Show `fraction` immediately, cancelling any animation.
    pub fn set(&mut self, fraction: f64) {
        self.animation = None;
        self.shown = fraction.clamp(0.0, 1.0);
    }

    /// Animate from the shown value to `fraction`.
    pub fn animate_to(&mut self, fraction: f64, duration_ms: u64, easing: Easing) {
        let target = fraction.clamp(0.0, 1.0);
        self.animation = Some(Tween::new(self.shown, target, duration_ms, easing));
    }

    pub fn tick(&mut self, dt_ms: u64) {
        if let Some(tween) = self.animation.as_mut() {
            self.shown = tween.advance(dt_ms);
            if tween.is_finished() {
                self.animation = None;
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScoreBoard {
    score: u32,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn increase(&mut self, value: u32) {
        self.score = self.score.saturating_add(value);
    }

    pub fn label(&self) -> String {
        format!("Score: {}", self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gauge_starts_full() {
        let gauge = FuelGauge::new();
        assert_eq!(gauge.percent(), 100);
        assert_eq!(gauge.label(), "100%");
    }

    #[test]
    fn test_set_clamps_and_cancels_animation() {
        let mut gauge = FuelGauge::new();
        gauge.set(0.2);
        gauge.animate_to(1.0, 300, Easing::QuadOut);
        gauge.set(-0.5);
        assert!(!gauge.is_animating());
        assert_eq!(gauge.percent(), 0);
    }

    #[test]
    fn test_refill_animates_to_full() {
        let mut gauge = FuelGauge::new();
        gauge.set(0.25);
        gauge.animate_to(1.0, 300, Easing::QuadOut);

        gauge.tick(100);
        assert!(gauge.shown() > 0.25 && gauge.shown() < 1.0);

        gauge.tick(200);
        assert_eq!(gauge.percent(), 100);
        assert!(!gauge.is_animating());
    }

    #[test]
    fn test_score_increases_monotonically() {
        let mut board = ScoreBoard::new();
        board.increase(2);
        board.increase(0);
        board.increase(3);
        assert_eq!(board.score(), 5);
        assert_eq!(board.label(), "Score: 5");
    }
}
