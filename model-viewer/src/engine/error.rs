use thiserror::Error;

/// Failures surfaced by the viewer session and its loaders.
///
/// None of these are fatal to the host page; the session logs them and
/// falls back to idle.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("failed to load model '{path}': {reason}")]
    AssetLoad { path: String, reason: String },

    #[error("model '{path}' contains no scenes")]
    EmptyModel { path: String },

    #[error("no container available to mount the viewer into")]
    MissingContainer,

    #[error("settings can only be changed while the viewer is idle")]
    NotIdle,

    #[error("invalid viewer settings: {0}")]
    InvalidSettings(#[from] serde_json::Error),
}
