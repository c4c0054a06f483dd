//! Color model shared by the canvas contract and the renderer.

mod color;

pub use color::Color;
