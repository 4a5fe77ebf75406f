// Viewport (world units, y grows downward)
pub const VIEWPORT_WIDTH: f64 = 1280.0;
pub const VIEWPORT_HEIGHT: f64 = 720.0;

// Physics step
pub const PHYSICS_TICK_MS: u64 = 16;
pub const MAX_FRAME_DT_MS: u64 = 100;
pub const GRAVITY: f64 = 400.0;

// Ground pool: viewport-wide segments lying along the bottom edge
pub const GROUND_POOL_SIZE: usize = 3;
pub const GROUND_HEIGHT: f64 = 100.0;

// Platform pool: initial layout is PLATFORM_SPACING apart, resting on the ground
pub const PLATFORM_POOL_SIZE: usize = 8;
pub const PLATFORM_SPACING: f64 = 250.0;
pub const PLATFORM_WIDTH: f64 = 80.0;
pub const PLATFORM_HEIGHT: f64 = 15.0;

// Player body and spawn (spawn is the body centre)
pub const PLAYER_WIDTH: f64 = 60.0;
pub const PLAYER_HEIGHT: f64 = 100.0;
pub const PLAYER_SPAWN_OFFSET_X: f64 = -300.0;
pub const PLAYER_SPAWN_RISE: f64 = 400.0;

// Thrust (units/s^2) and jump impulse (units/s)
pub const THRUST_UP: f64 = -800.0;
pub const THRUST_SIDE: f64 = 250.0;
pub const JUMP_VELOCITY: f64 = -420.0;

// Horizontal damping factors, applied as factor^dt_seconds
pub const AIR_DAMPING: f64 = 0.9;
pub const FLOOR_DAMPING: f64 = 0.00001;

// Fuel
pub const MAX_FUEL: f64 = 100.0;
pub const FUEL_PER_ACCELERATION: f64 = 1.0 / 1000.0;
pub const FUEL_EPSILON: f64 = 1e-6;
pub const FUEL_REFILL_ANIM_MS: u64 = 300;

// Difficulty
pub const POINTS_PER_LEVEL: u32 = 10;

// Camera
pub const CAMERA_FOLLOW_THRESHOLD: f64 = 0.5;
pub const CAMERA_EASE_GAIN: f64 = 0.35;
pub const CAMERA_MIN_EASE_STEP: f64 = 0.05;
pub const CAMERA_VERTICAL_BAND: f64 = 0.2;
pub const CAMERA_RECENTER_ANCHOR: f64 = 0.3;
pub const CAMERA_RECENTER_MS: u64 = 600;

// Terminal key-repeat bridge, in physics ticks. The first press must
// outlast the OS repeat delay (commonly 250-600 ms) before repeats arrive;
// repeats come every 30-50 ms after that. Delays past ~640 ms still drop
// the key for a moment before the first repeat.
pub const INPUT_FIRST_PRESS_HOLD_TICKS: u32 = 40;
pub const INPUT_HOLD_TICKS: u32 = 12;
