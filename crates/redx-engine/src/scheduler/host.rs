use super::{LoopDriver, LoopState};

/// Answer of a frame callback to its host.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameControl {
    /// Keep invoking the callback.
    Continue,
    /// Deregister the callback; it must not be invoked again.
    Cancel,
}

/// Host-managed frame scheduler.
///
/// The host owns the loop: it invokes `frame` at a cadence of its choosing,
/// one invocation at a time, and returns once the callback cancels itself or
/// the host stops on its own.
///
/// The only host shipped is `WinitBackend`, which runs frames on winit's
/// desktop `run_app_on_demand`. There is no browser host (such as winit's web
/// `spawn_app`): it would need async wgpu setup, which the blocking
/// `create_canvas` cannot do.
pub trait FrameHost {
    fn run_frames(&mut self, frame: &mut dyn FnMut(&mut Self) -> FrameControl);
}

/// Registers the tick with a [`FrameHost`]. Never blocks or sleeps itself.
#[derive(Debug, Clone, Default)]
pub struct HostCooperative {
    frames: u64,
}

impl HostCooperative {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame callbacks received during the last `drive`.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl<B: FrameHost> LoopDriver<B> for HostCooperative {
    fn name(&self) -> &'static str {
        "host-cooperative"
    }

    fn drive(&mut self, backend: &mut B, tick: &mut dyn FnMut(&mut B) -> LoopState) {
        let frames = &mut self.frames;
        *frames = 0;

        let mut cancelled = false;
        backend.run_frames(&mut |host| {
            if cancelled {
                return FrameControl::Cancel;
            }
            *frames += 1;
            match tick(host) {
                LoopState::Running => FrameControl::Continue,
                LoopState::Stopped => {
                    cancelled = true;
                    FrameControl::Cancel
                }
            }
        });

        if !cancelled {
            log::info!("host stopped the frame loop");
        }
        log::debug!("host-cooperative loop exited after {} frames", self.frames);
    }
}
