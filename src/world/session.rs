//! Session: owns the current run and replaces it on game over.
//!
//! Run state (bodies, fuel gauge, score) lives entirely in `MainScene`.
//! Restarting drops the scene and builds a new one from the config, so no
//! per-run value can leak into the next run.

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::scene::{MainScene, StepOutcome};
use crate::config::{ConfigError, GameConfig};
use crate::core::keyboard::{Key, KeyboardState};

/// UI-agnostic input actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    /// Key press (or auto-repeat) from a terminal without release events.
    Press(Key),
    /// Key press from a terminal that reports releases.
    PressLatched(Key),
    Release(Key),
    Pause,
    Quit,
    /// Any other key (cancels a pending quit).
    Other,
}

#[derive(Debug)]
pub struct GameSession {
    config: GameConfig,
    rng: StdRng,
    pub scene: MainScene,
    pub keyboard: KeyboardState,

    /// True until the first key press of the session. Physics paused.
    pub waiting_to_start: bool,
    pub paused: bool,
    pub quit_pending: bool,
    pub should_quit: bool,

    /// Completed runs this session.
    pub runs: u32,
    pub best_score: u32,
    pub last_run_score: Option<u32>,
}

impl GameSession {
    /// Validate `config` and build the first run from it.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let scene = MainScene::new(&config);
        tracing::info!(seed = ?config.seed, "session started");
        Ok(Self {
            config,
            rng,
            scene,
            keyboard: KeyboardState::new(),
            waiting_to_start: true,
            paused: false,
            quit_pending: false,
            should_quit: false,
            runs: 0,
            best_score: 0,
            last_run_score: None,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current run number, starting at 1.
    pub fn run_number(&self) -> u32 {
        self.runs + 1
    }

    pub fn process_input(&mut self, input: GameInput) {
        if self.quit_pending {
            match input {
                GameInput::Quit => self.should_quit = true,
                GameInput::Release(key) => self.keyboard.release(key),
                _ => self.quit_pending = false,
            }
            return;
        }

        match input {
            GameInput::Press(_) | GameInput::PressLatched(_) if self.waiting_to_start => {
                // The starting press is not also a jump
                self.waiting_to_start = false;
            }
            GameInput::Press(key) => {
                if !self.paused {
                    self.keyboard.press(key);
                }
            }
            GameInput::PressLatched(key) => {
                if !self.paused {
                    self.keyboard.press_latched(key);
                }
            }
            GameInput::Release(key) => self.keyboard.release(key),
            GameInput::Pause => {
                if !self.waiting_to_start {
                    self.paused = !self.paused;
                    if self.paused {
                        self.keyboard.clear();
                    }
                }
            }
            GameInput::Quit => self.quit_pending = true,
            GameInput::Other => {}
        }
    }

    /// Advance the current run. Returns true if anything changed.
    pub fn update(&mut self, dt_ms: u64) -> bool {
        if self.waiting_to_start || self.paused || self.quit_pending {
            return false;
        }

        let outcome: StepOutcome = self.scene.update(dt_ms, &mut self.keyboard, &mut self.rng);
        if outcome.game_over {
            self.restart();
        }
        outcome.steps > 0
    }

    /// Tear down the current run and begin a fresh one.
    pub fn restart(&mut self) {
        let score = self.scene.score.score();
        self.runs += 1;
        self.best_score = self.best_score.max(score);
        self.last_run_score = Some(score);
        tracing::info!(
            run = self.runs,
            score,
            best = self.best_score,
            "run finished, restarting"
        );

        self.scene = MainScene::new(&self.config);
        self.keyboard.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        let config = GameConfig {
            seed: Some(9),
            ..Default::default()
        };
        GameSession::new(config).unwrap()
    }

    #[test]
    fn test_waits_for_first_press() {
        let mut s = session();
        assert!(!s.update(100));
        assert_eq!(s.scene.tick_count, 0);

        s.process_input(GameInput::Press(Key::Up));
        assert!(!s.waiting_to_start);
        // The start press does not register as a held key
        assert!(!s.keyboard.is_down(Key::Up));
        assert!(s.update(100));
        assert!(s.scene.tick_count > 0);
    }

    #[test]
    fn test_pause_toggles_and_freezes() {
        let mut s = session();
        s.process_input(GameInput::Press(Key::Up));
        s.process_input(GameInput::Pause);
        assert!(s.paused);
        assert!(!s.update(100));

        s.process_input(GameInput::Press(Key::Left));
        assert!(!s.keyboard.is_down(Key::Left));

        s.process_input(GameInput::Pause);
        assert!(!s.paused);
        assert!(s.update(100));
    }

    #[test]
    fn test_quit_needs_confirmation() {
        let mut s = session();
        s.process_input(GameInput::Quit);
        assert!(s.quit_pending);
        assert!(!s.should_quit);

        s.process_input(GameInput::Other);
        assert!(!s.quit_pending);

        s.process_input(GameInput::Quit);
        s.process_input(GameInput::Quit);
        assert!(s.should_quit);
    }

    #[test]
    fn test_restart_resets_run_and_keeps_stats() {
        let mut s = session();
        s.scene.score.increase(17);
        let platform = s.scene.platforms.bodies()[1];
        s.scene.player.land_on(&platform, &mut s.scene.fuel_gauge);
        s.keyboard.press(Key::Right);

        s.restart();

        assert_eq!(s.runs, 1);
        assert_eq!(s.best_score, 17);
        assert_eq!(s.last_run_score, Some(17));
        assert_eq!(s.scene.score.score(), 0);
        assert_eq!(s.scene.player.fuel(), 100.0);
        assert_eq!(s.scene.fuel_gauge.percent(), 100);
        assert!(s.scene.last_landed().is_none());
        assert!(!s.keyboard.is_down(Key::Right));
        assert_eq!(s.run_number(), 2);
    }

    #[test]
    fn test_rejects_config_without_pool_members() {
        let mut config = GameConfig::default();
        config.world.platform_pool_size = 0;
        assert!(matches!(
            GameSession::new(config),
            Err(ConfigError::PoolTooSmall {
                pool: "platform",
                size: 0
            })
        ));

        let mut config = GameConfig::default();
        config.world.ground_pool_size = 0;
        assert!(matches!(
            GameSession::new(config),
            Err(ConfigError::PoolTooSmall { pool: "ground", .. })
        ));
    }

    #[test]
    fn test_best_score_is_max_over_runs() {
        let mut s = session();
        s.scene.score.increase(5);
        s.restart();
        s.scene.score.increase(2);
        s.restart();
        assert_eq!(s.best_score, 5);
        assert_eq!(s.last_run_score, Some(2));
    }
}
