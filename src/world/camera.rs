//! Camera follow with logarithmic easing and timed recentring pans.
//!
//! Horizontal scroll only ever moves right: the pools recycle against the
//! camera's left edge, so moving back would expose recycled gaps.

use super::body::Body;
use crate::config::CameraConfig;
use crate::core::easing::{Easing, Tween};

#[derive(Debug, Clone, Copy)]
struct Pan {
    x: Tween,
    y: Tween,
}

#[derive(Debug, Clone)]
pub struct Camera {
    pub scroll_x: f64,
    pub scroll_y: f64,
    pub width: f64,
    pub height: f64,
    settings: CameraConfig,
    pan: Option<Pan>,
}

impl Camera {
    pub fn new(width: f64, height: f64, settings: CameraConfig) -> Self {
        Self {
            scroll_x: 0.0,
            scroll_y: 0.0,
            width,
            height,
            settings,
            pan: None,
        }
    }

    pub fn settings(&self) -> &CameraConfig {
        &self.settings
    }

    /// Centre of the viewport in screen space (half the width). Platform
    /// margins are measured from this, not from the scrolled world centre.
    pub fn viewport_center_x(&self) -> f64 {
        self.width / 2.0
    }

    pub fn world_center_x(&self) -> f64 {
        self.scroll_x + self.width / 2.0
    }

    pub fn world_center_y(&self) -> f64 {
        self.scroll_y + self.height / 2.0
    }

    /// Player x relative to the viewport, 0 = left edge, 1 = right edge.
    pub fn relative_x(&self, world_x: f64) -> f64 {
        (world_x - self.scroll_x) / self.width
    }

    pub fn is_panning(&self) -> bool {
        self.pan.is_some()
    }

    /// Pan so the view centre lands on `(target_x, target_y)` over
    /// `duration_ms`. A zero duration snaps on the next `tick`.
    pub fn pan(&mut self, target_x: f64, target_y: f64, duration_ms: u64, easing: Easing) {
        let to_x = (target_x - self.width / 2.0).max(self.scroll_x);
        let to_y = target_y - self.height / 2.0;
        self.pan = Some(Pan {
            x: Tween::new(self.scroll_x, to_x, duration_ms, easing),
            y: Tween::new(self.scroll_y, to_y, duration_ms, easing),
        });
    }

    /// Advance an active pan.
    pub fn tick(&mut self, dt_ms: u64) {
        let Some(pan) = self.pan.as_mut() else {
            return;
        };
        let x = pan.x.advance(dt_ms);
        let y = pan.y.advance(dt_ms);
        let finished = pan.x.is_finished() && pan.y.is_finished();

        self.scroll_x = self.scroll_x.max(x);
        self.scroll_y = y;
        if finished {
            self.pan = None;
        }
    }

    /// Follow the player. Horizontal follow is suspended while a pan is
    /// running; the vertical band keeps tracking and overrides the pan's y.
    pub fn follow(&mut self, player: &Body, last_landing_x: f64) {
        let player_x = player.center_x();
        if self.pan.is_none() && self.relative_x(player_x) > self.settings.follow_threshold {
            let target = player_x - self.width * self.settings.follow_threshold;
            let distance = (player_x - last_landing_x).abs();
            let step = ((1.0 + distance / self.width).ln() * self.settings.ease_gain)
                .clamp(self.settings.min_ease_step, 1.0);
            self.scroll_x += (target - self.scroll_x) * step;
        }

        let band_top = self.height * self.settings.vertical_band;
        self.scroll_y = (player.top() - band_top).min(0.0);
    }

    /// Forward-only recentring pan onto a landed platform.
    pub fn recenter_on(&mut self, platform: &Body) {
        if !self.settings.recenter_on_landing {
            return;
        }
        let anchor_offset = self.width * (0.5 - self.settings.recenter_anchor);
        let target_x = platform.center_x() + anchor_offset;
        if target_x - self.width / 2.0 <= self.scroll_x {
            return;
        }
        self.pan(
            target_x,
            self.world_center_y(),
            self.settings.recenter_duration_ms,
            self.settings.recenter_easing,
        );
    }
}
