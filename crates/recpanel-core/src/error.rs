use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid recommendation type: {0}")]
    InvalidRecommendationType(String),
    #[error("record id is required")]
    MissingRecordId,
}
