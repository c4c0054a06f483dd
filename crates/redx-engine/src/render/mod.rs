//! Rendering subsystem.
//!
//! - `shape` computes the fixed X as line segments (pure, no GPU).
//! - `lines` batches segments and draws them with a wgpu line-list pipeline.
//!
//! Convention: CPU geometry is in surface pixels (top-left origin, +Y down);
//! the vertex shader converts to NDC using a viewport uniform.

mod lines;
mod shape;

pub use lines::{LineBatch, LineRenderer};
pub use shape::CrossShape;
