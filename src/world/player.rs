//! Player controller: input → acceleration, fuel bookkeeping, integration.

use super::body::{Body, BodyKind};
use super::hud::FuelGauge;
use crate::core::constants::*;
use crate::core::easing::Easing;
use crate::core::keyboard::{Key, KeyboardState};

/// Control state, derived from floor contact and fuel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Airborne,
    /// Resting on a platform (fuel refilled each landing).
    Grounded,
    /// Airborne with no fuel: input is ignored until the next landing.
    OutOfFuel,
}

#[derive(Debug, Clone)]
pub struct PlayerController {
    pub body: Body,
    pub vx: f64,
    pub vy: f64,
    pub ax: f64,
    pub ay: f64,
    fuel: f64,
    on_floor: bool,
    /// Key that produced the last jump impulse, locked out of thrust until
    /// released.
    initializer_key: Option<Key>,
}

impl PlayerController {
    /// Spawn with the body centred on `(center_x, center_y)`.
    pub fn spawn(center_x: f64, center_y: f64, width: f64, height: f64) -> Self {
        Self {
            body: Body::new(
                BodyKind::Player,
                center_x - width / 2.0,
                center_y - height / 2.0,
                width,
                height,
            ),
            vx: 0.0,
            vy: 0.0,
            ax: 0.0,
            ay: 0.0,
            fuel: MAX_FUEL,
            on_floor: false,
            initializer_key: None,
        }
    }

    pub fn fuel(&self) -> f64 {
        self.fuel
    }

    pub fn has_fuel(&self) -> bool {
        self.fuel > FUEL_EPSILON
    }

    pub fn on_floor(&self) -> bool {
        self.on_floor
    }

    pub fn initializer_key(&self) -> Option<Key> {
        self.initializer_key
    }

    pub fn state(&self) -> PlayerState {
        if self.on_floor {
            PlayerState::Grounded
        } else if !self.has_fuel() {
            PlayerState::OutOfFuel
        } else {
            PlayerState::Airborne
        }
    }

    /// Per-tick input hook. Sets acceleration from held keys and spends
    /// fuel in proportion to its magnitude.
    pub fn pre_update(&mut self, keyboard: &mut KeyboardState, gauge: &mut FuelGauge) {
        if let Some(key) = self.initializer_key {
            if keyboard.take_release(key) {
                self.initializer_key = None;
            }
        }

        if !self.has_fuel() {
            self.ax = 0.0;
            self.ay = 0.0;
            return;
        }

        if self.on_floor && keyboard.is_down(Key::Up) && self.initializer_key.is_none() {
            self.vy = JUMP_VELOCITY;
            self.on_floor = false;
            self.initializer_key = Some(Key::Up);
            keyboard.on_release(Key::Up);
        }

        let mut ax = 0.0;
        let mut ay = 0.0;
        let mut any_down = false;
        for key in Key::ALL {
            if !keyboard.is_down(key) || self.initializer_key == Some(key) {
                continue;
            }
            any_down = true;
            match key {
                Key::Up => ay += THRUST_UP,
                Key::Left => ax -= THRUST_SIDE,
                Key::Right => ax += THRUST_SIDE,
            }
        }

        if any_down {
            self.spend_fuel(ax.hypot(ay), gauge);
        }

        self.ax = ax;
        self.ay = ay;
    }

    fn spend_fuel(&mut self, acceleration: f64, gauge: &mut FuelGauge) {
        let burned = acceleration * FUEL_PER_ACCELERATION;
        self.fuel = (self.fuel - burned).clamp(0.0, self.fuel);
        gauge.set(self.fuel / MAX_FUEL);
    }

    /// Advance velocity and position by `dt` seconds. Clears floor contact;
    /// the collision pass re-establishes it.
    pub fn integrate(&mut self, dt: f64, gravity: f64) {
        self.vx += self.ax * dt;
        self.vy += (self.ay + gravity) * dt;

        let damping = if self.on_floor {
            FLOOR_DAMPING
        } else {
            AIR_DAMPING
        };
        self.vx *= damping.powf(dt);

        self.body.x += self.vx * dt;
        self.body.y += self.vy * dt;
        self.on_floor = false;
    }

    /// Keep the body right of `min_x` (the camera's left edge).
    pub fn clamp_left(&mut self, min_x: f64) {
        if self.body.x < min_x {
            self.body.x = min_x;
            self.vx = self.vx.max(0.0);
        }
    }

    /// Resolve a landing on `platform`: rest on its top and refuel.
    pub fn land_on(&mut self, platform: &Body, gauge: &mut FuelGauge) {
        self.body.y = platform.top() - self.body.height;
        self.vy = self.vy.min(0.0);
        self.on_floor = true;

        if self.fuel != MAX_FUEL {
            self.fuel = MAX_FUEL;
            gauge.animate_to(1.0, FUEL_REFILL_ANIM_MS, Easing::QuadOut);
        }
    }

    /// Push out of a non-landing overlap (side or underside hit).
    pub fn separate_from(&mut self, other: &Body, previous: &Body) {
        if previous.top() >= other.bottom() {
            self.body.y = other.bottom();
            self.vy = self.vy.max(0.0);
        } else if previous.right() <= other.left() {
            self.body.x = other.left() - self.body.width;
            self.vx = self.vx.min(0.0);
        } else if previous.left() >= other.right() {
            self.body.x = other.right();
            self.vx = self.vx.max(0.0);
        }
    }
}
