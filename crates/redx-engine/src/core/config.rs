use std::time::Duration;

use crate::device::GpuInit;
use crate::scheduler::LoopMode;

/// Display surface parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSpec {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowSpec {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "Project RED X".to_string(),
        }
    }
}

/// Startup configuration. There are no command-line flags; everything is
/// fixed here except the loop strategy, which may come from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub window: WindowSpec,

    /// Bar thickness of the X, in pixels.
    pub thickness: u32,

    /// Sleep between ticks of the self-driven loop (~60 polls per second).
    pub poll_interval: Duration,

    pub loop_mode: LoopMode,

    pub gpu: GpuInit,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowSpec::default(),
            thickness: 5,
            poll_interval: Duration::from_millis(16),
            loop_mode: LoopMode::default(),
            gpu: GpuInit::default(),
        }
    }
}

impl AppConfig {
    /// Environment variable selecting the loop strategy.
    pub const LOOP_MODE_ENV: &'static str = "REDX_LOOP_MODE";

    /// Defaults, with the loop strategy taken from [`Self::LOOP_MODE_ENV`]
    /// when it is set.
    pub fn from_env() -> Self {
        Self::default().with_loop_mode_override(std::env::var(Self::LOOP_MODE_ENV).ok().as_deref())
    }

    /// Applies a textual loop mode. Unknown values keep the current mode.
    pub fn with_loop_mode_override(mut self, raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return self;
        };

        match raw.parse::<LoopMode>() {
            Ok(mode) => self.loop_mode = mode,
            Err(err) => log::warn!("{err}; using {}", self.loop_mode),
        }
        self
    }
}
