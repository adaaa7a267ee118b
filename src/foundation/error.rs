/// Convenience result type used across planviz.
pub type PlanvizResult<T> = Result<T, PlanvizError>;

/// Top-level error taxonomy.
///
/// The per-frame rendering core never returns these; they are produced only where the engine
/// touches IO or parses external input (traces, configuration, assets, rasterization).
#[derive(thiserror::Error, Debug)]
pub enum PlanvizError {
    /// Invalid user-provided trace, configuration or request.
    #[error("validation error: {0}")]
    Validation(String),

    /// Asset lookup or decoding failures.
    #[error("asset error: {0}")]
    Asset(String),

    /// Errors while producing output pixels or documents.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PlanvizError {
    /// Build a [`PlanvizError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PlanvizError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`PlanvizError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`PlanvizError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for PlanvizError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
