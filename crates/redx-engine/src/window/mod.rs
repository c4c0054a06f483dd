//! winit + wgpu platform backend.
//!
//! Owns the `winit` EventLoop, creates the window and its wgpu canvas, and
//! implements both scheduling hosts on top of the loop:
//! - pumping (`pump_app_events`) for the self-driven driver
//! - the loop's own run (`run_app_on_demand`) as a frame host
//!
//! Both extensions are available on desktop targets (Windows, macOS, X11,
//! Wayland) and Android. Neither exists on the web, so this backend is not a
//! browser host.

mod backend;

pub use backend::WinitBackend;
