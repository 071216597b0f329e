use support_common::error::CommonError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("failed to load FAQs: {0}")]
    LoadFailure(#[from] CommonError),

    #[error("unknown category: {0}")]
    UnknownCategory(String),
}
