use thiserror::Error;

/// Failure modes surfaced to the initialization caller.
///
/// Date parse failures never reach here: the expiration check absorbs
/// them and fails open. An empty slide selection is a normal outcome,
/// not an error.
#[derive(Debug, Clone, Error)]
pub enum BannerError {
    /// The query succeeded but no active record matches the identifier.
    #[error("no banner configuration found for '{0}'")]
    NotFound(String),

    /// The dataset service call itself failed.
    #[error("dataset query failed: {0}")]
    QueryFailed(String),
}

pub type Result<T> = std::result::Result<T, BannerError>;
