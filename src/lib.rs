//! Skyhop - terminal endless platformer.
//!
//! The library holds the simulation and rendering; `main.rs` owns the
//! terminal and the frame loop.

pub mod build_info;
pub mod config;
pub mod core;
pub mod input;
pub mod ui;
pub mod utils;
pub mod world;
