//! Loop scheduling.
//!
//! After the single render, the program only polls events. How ticks are
//! scheduled is a [`LoopDriver`] picked once at startup:
//! - [`SelfDriven`]: owns a blocking poll-then-sleep loop.
//! - [`HostCooperative`]: hands a frame callback to a [`FrameHost`] and lets
//!   the host decide when to call it.

mod host;
mod native;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::device::EventSource;
use crate::input::Event;

pub use host::{FrameControl, FrameHost, HostCooperative};
pub use native::SelfDriven;

/// Loop state machine. `Stopped` is terminal.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum LoopState {
    #[default]
    Running,
    Stopped,
}

impl LoopState {
    #[inline]
    pub fn is_running(self) -> bool {
        self == LoopState::Running
    }
}

/// Drains the events queued right now and applies them to `state`.
///
/// Never blocks and never renders. A quit event moves the state to `Stopped`;
/// everything else is ignored. Once `Stopped`, ticks are no-ops and leave the
/// queue untouched.
pub fn poll_tick<E>(state: &mut LoopState, events: &mut E) -> LoopState
where
    E: EventSource + ?Sized,
{
    if !state.is_running() {
        return *state;
    }

    events.pump_events();

    while let Some(event) = events.poll_event() {
        match event {
            Event::Quit => {
                if state.is_running() {
                    log::info!("quit requested");
                }
                *state = LoopState::Stopped;
            }
            Event::Other { kind } => log::trace!("ignoring {kind} event"),
        }
    }

    *state
}

/// Strategy that schedules ticks until one reports [`LoopState::Stopped`].
///
/// Implementations never run `tick` again after it returned `Stopped`, and
/// never run two ticks at once.
pub trait LoopDriver<B> {
    fn name(&self) -> &'static str;

    fn drive(&mut self, backend: &mut B, tick: &mut dyn FnMut(&mut B) -> LoopState);
}

/// Which [`LoopDriver`] to use.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum LoopMode {
    #[default]
    SelfDriven,
    HostCooperative,
}

impl LoopMode {
    /// Builds the driver for this mode.
    pub fn driver<B: FrameHost>(self, poll_interval: Duration) -> Box<dyn LoopDriver<B>> {
        match self {
            LoopMode::SelfDriven => Box::new(SelfDriven::new(poll_interval)),
            LoopMode::HostCooperative => Box::new(HostCooperative::new()),
        }
    }
}

impl fmt::Display for LoopMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LoopMode::SelfDriven => "self-driven",
            LoopMode::HostCooperative => "host-cooperative",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown loop mode `{0}` (expected `self-driven` or `host-cooperative`)")]
pub struct ParseLoopModeError(String);

impl FromStr for LoopMode {
    type Err = ParseLoopModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "self-driven" | "native" => Ok(LoopMode::SelfDriven),
            "host-cooperative" | "host" => Ok(LoopMode::HostCooperative),
            _ => Err(ParseLoopModeError(s.to_string())),
        }
    }
}
