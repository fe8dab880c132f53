use thiserror::Error;

/// Error taxonomy for mapper resolution and dispatch.
///
/// The resolver recovers nothing itself; the `try_map` family on
/// [`crate::EntityMapper`] folds everything downstream of the argument guard
/// into `None` instead.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("no mapper registered for type {0}")]
    MapperNotFound(String),

    #[error("conversion failed: {0}")]
    Conversion(#[from] anyhow::Error),
}

impl MapError {
    /// Shorthand for a mapper-raised conversion failure with a plain message.
    pub fn conversion(msg: impl Into<String>) -> Self {
        Self::Conversion(anyhow::anyhow!(msg.into()))
    }
}
