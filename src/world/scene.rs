//! Main scene: owns every body of a run and drives the per-tick loop.
//!
//! Each fixed physics tick runs, in order:
//! 1. player pre-update (input, fuel, acceleration)
//! 2. integration and world bounds
//! 3. collision pass; landing and ground events are handled immediately
//! 4. scene update: camera pan/follow, ground recycling, platform recycling
//!
//! A run ends on the first ground contact. The scene is then discarded by
//! its owner; nothing in it survives into the next run.

use rand::Rng;

use super::body::{Body, BodyKind};
use super::camera::Camera;
use super::difficulty::{level_for_score, platform_margin, MarginTable};
use super::hud::{FuelGauge, ScoreBoard};
use super::player::PlayerController;
use super::pool::BodyPool;
use crate::config::{GameConfig, WorldConfig};
use crate::core::constants::{MAX_FRAME_DT_MS, PLAYER_SPAWN_OFFSET_X, PLAYER_SPAWN_RISE};
use crate::core::keyboard::KeyboardState;

/// Slack allowed when deciding the player was above a platform last tick.
const CONTACT_EPSILON: f64 = 1e-6;

/// Contact between the player and another body during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionEvent {
    /// Came down onto the top of platform `index`.
    Landed { platform: usize },
    /// Touched a ground segment. Terminal.
    GroundTouched { ground: usize },
}

/// The platform the player last landed on, with its x at landing time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandedPlatform {
    pub index: usize,
    pub x: f64,
}

/// What happened during one `update` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    pub steps: u32,
    pub landings: u32,
    pub points: u32,
    pub grounds_recycled: u32,
    pub platforms_recycled: u32,
    pub game_over: bool,
}

impl StepOutcome {
    fn absorb(&mut self, other: StepOutcome) {
        self.steps += other.steps;
        self.landings += other.landings;
        self.points += other.points;
        self.grounds_recycled += other.grounds_recycled;
        self.platforms_recycled += other.platforms_recycled;
        self.game_over |= other.game_over;
    }
}

#[derive(Debug, Clone)]
pub struct MainScene {
    world: WorldConfig,
    margin_table: MarginTable,
    points_per_level: u32,

    pub grounds: BodyPool,
    pub platforms: BodyPool,
    pub player: PlayerController,
    pub camera: Camera,
    pub fuel_gauge: FuelGauge,
    pub score: ScoreBoard,

    last_landed: Option<LandedPlatform>,
    game_over: bool,

    /// Sub-tick time accumulator (milliseconds).
    accumulated_time_ms: u64,
    pub tick_count: u64,
}

impl MainScene {
    /// Build a fresh run. `config` is expected to be validated.
    pub fn new(config: &GameConfig) -> Self {
        let world = config.world.clone();
        let width = world.viewport_width;
        let height = world.viewport_height;

        let grounds = BodyPool::new(
            (0..world.ground_pool_size)
                .map(|i| {
                    Body::resting_on(
                        BodyKind::Ground,
                        width * i as f64,
                        height,
                        width,
                        world.ground_height,
                    )
                })
                .collect(),
        );

        let floor_y = height - world.ground_height;
        let platforms = BodyPool::new(
            (0..world.platform_pool_size)
                .map(|i| {
                    Body::resting_on(
                        BodyKind::Platform,
                        world.platform_spacing * i as f64,
                        floor_y,
                        world.platform_width,
                        world.platform_height,
                    )
                })
                .collect(),
        );

        let player = PlayerController::spawn(
            width / 2.0 + PLAYER_SPAWN_OFFSET_X,
            height - PLAYER_SPAWN_RISE,
            world.player_width,
            world.player_height,
        );

        Self {
            camera: Camera::new(width, height, config.camera.clone()),
            margin_table: config.margin_table(),
            points_per_level: config.difficulty.points_per_level,
            world,
            grounds,
            platforms,
            player,
            fuel_gauge: FuelGauge::new(),
            score: ScoreBoard::new(),
            last_landed: None,
            game_over: false,
            accumulated_time_ms: 0,
            tick_count: 0,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn last_landed(&self) -> Option<LandedPlatform> {
        self.last_landed
    }

    pub fn world(&self) -> &WorldConfig {
        &self.world
    }

    pub fn margin_table(&self) -> &MarginTable {
        &self.margin_table
    }

    /// Current difficulty level, recomputed from the score.
    pub fn level(&self) -> u32 {
        level_for_score(self.score.score(), self.points_per_level)
    }

    /// Advance by `dt_ms` of wall time in fixed ticks. Frame time is
    /// clamped so a stall cannot explode the physics.
    pub fn update<R: Rng>(
        &mut self,
        dt_ms: u64,
        keyboard: &mut KeyboardState,
        rng: &mut R,
    ) -> StepOutcome {
        let mut outcome = StepOutcome::default();
        if self.game_over {
            return outcome;
        }

        self.accumulated_time_ms += dt_ms.min(MAX_FRAME_DT_MS);
        while self.accumulated_time_ms >= self.world.tick_ms {
            self.accumulated_time_ms -= self.world.tick_ms;
            outcome.absorb(self.step(keyboard, rng));
            if self.game_over {
                break;
            }
        }
        outcome
    }

    /// One fixed physics tick.
    pub fn step<R: Rng>(&mut self, keyboard: &mut KeyboardState, rng: &mut R) -> StepOutcome {
        let mut outcome = StepOutcome {
            steps: 1,
            ..Default::default()
        };
        if self.game_over {
            return outcome;
        }
        self.tick_count += 1;
        let dt = self.world.tick_ms as f64 / 1000.0;

        let previous = self.player.body;
        self.player.pre_update(keyboard, &mut self.fuel_gauge);
        self.player.integrate(dt, self.world.gravity);
        self.player.clamp_left(self.camera.scroll_x);

        if let Some(platform) = self.resolve_platform_contacts(&previous) {
            outcome.absorb(self.handle_collision(CollisionEvent::Landed { platform }));
        }
        if let Some(ground) = self.ground_contact() {
            outcome.absorb(self.handle_collision(CollisionEvent::GroundTouched { ground }));
            return outcome;
        }

        self.camera.tick(self.world.tick_ms);
        let landing_x = self
            .last_landed
            .map(|landed| landed.x)
            .unwrap_or_else(|| self.player.body.center_x());
        self.camera.follow(&self.player.body, landing_x);

        if self.reuse_grounds() {
            outcome.grounds_recycled += 1;
        }
        if self.reuse_platforms(rng) {
            outcome.platforms_recycled += 1;
        }

        self.fuel_gauge.tick(self.world.tick_ms);
        keyboard.tick();
        outcome
    }

    /// Separate the player from overlapping platforms. Returns the platform
    /// landed on, if the player came down onto a top surface this tick.
    fn resolve_platform_contacts(&mut self, previous: &Body) -> Option<usize> {
        let mut landed = None;
        for index in 0..self.platforms.len() {
            let Some(platform) = self.platforms.get(index).copied() else {
                continue;
            };
            if !self.player.body.overlaps(&platform) {
                continue;
            }
            if previous.bottom() <= platform.top() + CONTACT_EPSILON && self.player.vy >= 0.0 {
                if landed.is_none() {
                    landed = Some(index);
                }
                self.player.body.y = platform.top() - self.player.body.height;
            } else {
                self.player.separate_from(&platform, previous);
            }
        }
        landed
    }

    fn ground_contact(&self) -> Option<usize> {
        self.grounds
            .iter()
            .position(|ground| ground.kind == BodyKind::Ground && self.player.body.overlaps(ground))
    }

    /// Collision dispatch.
    pub fn handle_collision(&mut self, event: CollisionEvent) -> StepOutcome {
        let mut outcome = StepOutcome::default();
        match event {
            CollisionEvent::Landed { platform } => {
                let Some(body) = self.platforms.get(platform).copied() else {
                    return outcome;
                };
                let points = self.calculate_score(platform);
                self.player.land_on(&body, &mut self.fuel_gauge);
                if points > 0 {
                    self.camera.recenter_on(&body);
                }
                outcome.landings = 1;
                outcome.points = points;
            }
            CollisionEvent::GroundTouched { ground } => {
                tracing::info!(
                    ground,
                    score = self.score.score(),
                    ticks = self.tick_count,
                    "ground touched, run over"
                );
                self.game_over = true;
                outcome.game_over = true;
            }
        }
        outcome
    }

    /// Score a landing on platform `index`: the number of platforms after
    /// the previous landing x, up to and including this one. A platform
    /// counts as the same landing only if it has not been recycled since.
    pub fn calculate_score(&mut self, index: usize) -> u32 {
        let Some(landed_x) = self.platforms.get(index).map(|p| p.x) else {
            return 0;
        };

        let mut points = 0;
        if let Some(previous) = self.last_landed {
            let same_platform = previous.index == index && previous.x == landed_x;
            if !same_platform {
                let level_before = self.level();
                points = self.platforms.count_between(previous.x, landed_x) as u32;
                self.score.increase(points);
                tracing::debug!(
                    platform = index,
                    points,
                    score = self.score.score(),
                    "landed"
                );
                let level_after = self.level();
                if level_after != level_before {
                    tracing::info!(level = level_after, score = self.score.score(), "level up");
                }
            }
        }

        self.last_landed = Some(LandedPlatform { index, x: landed_x });
        points
    }

    /// Recycle at most one ground segment that has scrolled off the left.
    pub fn reuse_grounds(&mut self) -> bool {
        let Some(index) = self.grounds.recycle_candidate(self.camera.scroll_x) else {
            return false;
        };
        let span = self.grounds.bodies()[index].width * self.grounds.len() as f64;
        self.grounds.advance(index, span);
        true
    }

    /// Recycle at most one platform, placing it one level-dependent margin
    /// past the last-placed platform.
    pub fn reuse_platforms<R: Rng>(&mut self, rng: &mut R) -> bool {
        let Some(index) = self.platforms.recycle_candidate(self.camera.scroll_x) else {
            return false;
        };
        let range = self.margin_table.range_for_level(self.level());
        let margin = platform_margin(self.camera.viewport_center_x(), range, rng);
        self.platforms.place_after_last(index, margin);
        tracing::trace!(platform = index, margin, "platform recycled");
        true
    }
}
