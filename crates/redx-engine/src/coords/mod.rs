//! Coordinate types shared by the shape geometry and the renderer.
//!
//! Canonical CPU space:
//! - integer pixels of the drawing surface
//! - origin top-left
//! - +X right, +Y down
//!
//! The line renderer converts to NDC in its shader using a viewport uniform.

mod point;
mod viewport;

pub use point::{Point, Segment};
pub use viewport::Viewport;
