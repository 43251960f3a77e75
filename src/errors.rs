use axum::response::IntoResponse;
use http::StatusCode;
use thiserror::Error;

/// Failures surfaced by the aggregation pipeline.
///
/// A missing stock row and a missing history file are both `NotFound`;
/// callers can only tell them apart by the message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),
    #[error("{context}: {source}")]
    SourceUnavailable {
        context: String,
        #[source]
        source: SourceError,
    },
}

/// The underlying store or filesystem failure behind `SourceUnavailable`.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl AppError {
    pub fn source_unavailable(context: impl Into<String>, source: impl Into<SourceError>) -> Self {
        AppError::SourceUnavailable {
            context: context.into(),
            source: source.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
            err @ AppError::SourceUnavailable { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let response = AppError::NotFound("stock not found for ticker ZZZ".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_source_unavailable_carries_context() {
        let err = AppError::source_unavailable("listing stocks", sqlx::Error::PoolTimedOut);
        assert!(!err.is_not_found());
        assert!(err.to_string().starts_with("listing stocks: database error"));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
