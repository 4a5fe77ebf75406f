//! Shared constants, easing and keyboard state.

pub mod constants;
pub mod easing;
pub mod keyboard;

pub use constants::*;
pub use easing::{Easing, Tween};
pub use keyboard::{Key, KeyboardState};
