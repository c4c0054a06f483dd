//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types. Backends
//! translate platform events into [`Event`]s; the scheduler only acts on
//! [`Event::Quit`].

mod event;

pub use event::Event;
