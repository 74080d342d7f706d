use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// Caller input (dates, format) was unusable.
    #[error("invalid report request: {0}")]
    Validation(String),

    /// The document could not be assembled or encoded.
    #[error("report generation failed: {0}")]
    Generation(String),
}

impl ReportError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn generation(msg: impl Into<String>) -> Self {
        Self::Generation(msg.into())
    }
}
