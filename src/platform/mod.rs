//! Platform abstraction layer
//!
//! Whatever drives the game (window loop, test harness, headless autopilot)
//! reports key state through `InputState`.

pub mod input;

pub use input::{InputState, Key};
