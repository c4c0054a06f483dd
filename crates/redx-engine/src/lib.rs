//! RED X engine crate.
//!
//! Opens one window, draws a fixed red X on black exactly once, then polls
//! events until quit under a loop driver chosen at startup.

pub mod coords;
pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scheduler;
pub mod window;
