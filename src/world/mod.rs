//! The game world: bodies, pools, player, camera, HUD and the scene that
//! ties them together.

pub mod body;
pub mod camera;
pub mod difficulty;
pub mod hud;
pub mod player;
pub mod pool;
pub mod scene;
pub mod session;

pub use body::{Body, BodyKind};
pub use scene::{CollisionEvent, LandedPlatform, MainScene, StepOutcome};
pub use session::{GameInput, GameSession};
