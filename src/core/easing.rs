//! Easing curves for timed camera pans and HUD animations.

use serde::{Deserialize, Serialize};

/// Easing function applied to normalized progress `t` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    /// Quadratic ease-out: fast start, gentle arrival.
    #[default]
    QuadOut,
    SineInOut,
}

impl Easing {
    /// Map progress `t` to eased progress. Input outside `[0, 1]` is clamped.
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 1.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Easing::Linear => t,
            Easing::QuadOut => t * (2.0 - t),
            Easing::SineInOut => -((std::f64::consts::PI * t).cos() - 1.0) / 2.0,
        }
    }
}

/// A value animating from `from` to `to` over `duration_ms`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub duration_ms: u64,
    pub elapsed_ms: u64,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: f64, to: f64, duration_ms: u64, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration_ms,
            elapsed_ms: 0,
            easing,
        }
    }

    /// Advance by `dt_ms` and return the current value.
    pub fn advance(&mut self, dt_ms: u64) -> f64 {
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms).min(self.duration_ms);
        self.value()
    }

    pub fn value(&self) -> f64 {
        if self.duration_ms == 0 {
            return self.to;
        }
        let t = self.elapsed_ms as f64 / self.duration_ms as f64;
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::QuadOut, Easing::SineInOut] {
            assert!(easing.apply(0.0).abs() < 1e-9, "{:?} at 0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-9, "{:?} at 1", easing);
        }
    }

    #[test]
    fn test_quad_out_leads_linear() {
        assert!(Easing::QuadOut.apply(0.25) > Easing::Linear.apply(0.25));
        assert!((Easing::QuadOut.apply(0.5) - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_apply_clamps_input() {
        assert_eq!(Easing::Linear.apply(-3.0), 0.0);
        assert_eq!(Easing::Linear.apply(7.0), 1.0);
        assert_eq!(Easing::Linear.apply(f64::NAN), 1.0);
    }

    #[test]
    fn test_tween_reaches_target_and_stops() {
        let mut tween = Tween::new(0.0, 100.0, 300, Easing::QuadOut);
        let mid = tween.advance(150);
        assert!(mid > 50.0 && mid < 100.0);
        assert!(!tween.is_finished());

        assert_eq!(tween.advance(1000), 100.0);
        assert!(tween.is_finished());
        assert_eq!(tween.elapsed_ms, 300);
    }

    #[test]
    fn test_zero_duration_tween_is_instant() {
        let tween = Tween::new(5.0, 9.0, 0, Easing::Linear);
        assert_eq!(tween.value(), 9.0);
        assert!(tween.is_finished());
    }
}
