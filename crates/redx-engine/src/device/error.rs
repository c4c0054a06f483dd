/// Failure reported by the windowing/graphics library.
///
/// Carries the library's own failure detail so it can be shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{detail}")]
pub struct BackendError {
    detail: String,
}

impl BackendError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl From<anyhow::Error> for BackendError {
    fn from(err: anyhow::Error) -> Self {
        // Alternate formatting keeps the whole context chain.
        Self::new(format!("{err:#}"))
    }
}

/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; presenting again may succeed.
    Reconfigured,
    /// Transient error; drop the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM).
    Fatal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anyhow_chain_is_kept_in_detail() {
        let err = anyhow::anyhow!("no adapter").context("failed to create wgpu device");
        let be = BackendError::from(err);
        assert_eq!(be.detail(), "failed to create wgpu device: no adapter");
        assert_eq!(be.to_string(), be.detail());
    }
}
