//! Graphics collaborator contract and the wgpu device layer.
//!
//! This module is responsible for:
//! - the `Backend` / `Canvas` / `EventSource` seams the program is written against
//! - creating the wgpu Instance/Adapter/Device/Queue and configuring the Surface
//! - the immediate-mode `LineCanvas` drawing surface built on top of them

mod backend;
mod canvas;
mod error;
mod gpu;
mod init;
mod surface;

#[cfg(test)]
pub(crate) mod fake;

pub use backend::{Backend, Canvas, EventSource};
pub use canvas::LineCanvas;
pub use error::{BackendError, SurfaceErrorAction};
pub use gpu::{Gpu, GpuFrame};
pub use init::GpuInit;
