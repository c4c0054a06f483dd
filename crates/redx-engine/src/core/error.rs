use crate::device::BackendError;

/// Fatal startup failure. None is retried.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// The windowing system itself could not be started. Nothing was acquired.
    #[error("windowing system could not be initialized: {0}")]
    Platform(#[source] BackendError),

    /// The window could not be created. Nothing was acquired.
    #[error("window could not be created: {0}")]
    DisplaySurface(#[source] BackendError),

    /// The renderer could not be created. The window was already released.
    #[error("renderer could not be created: {0}")]
    DrawingSurface(#[source] BackendError),
}

impl InitError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            InitError::Platform(_) | InitError::DisplaySurface(_) | InitError::DrawingSurface(_) => 1,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            InitError::Platform(e) | InitError::DisplaySurface(e) | InitError::DrawingSurface(e) => {
                e.detail()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_includes_library_detail() {
        let err = InitError::DrawingSurface(BackendError::new("no adapter"));
        assert_eq!(err.to_string(), "renderer could not be created: no adapter");
        assert_eq!(err.detail(), "no adapter");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn every_startup_failure_exits_with_one() {
        let platform = InitError::Platform(BackendError::new("no display server"));
        assert_eq!(
            platform.to_string(),
            "windowing system could not be initialized: no display server"
        );
        assert_eq!(platform.detail(), "no display server");

        for err in [
            platform,
            InitError::DisplaySurface(BackendError::new("x")),
            InitError::DrawingSurface(BackendError::new("x")),
        ] {
            assert_eq!(err.exit_code(), 1, "{err}");
        }
    }
}
