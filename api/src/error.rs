use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use hostwatch_common::views::ApiErrorResponse;
use hostwatch_db::storage::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Body must be JSON.")]
    BodyNotJson,

    #[error("Could not create the host.")]
    CreateHost(#[source] StoreError),

    #[error("Could not fetch the hosts.")]
    FetchHosts(#[source] StoreError),

    #[error("Something went wrong on our end. Please try again later.")]
    Storage(#[from] StoreError),
}

impl ApiError {
    fn store_error(&self) -> Option<&StoreError> {
        match self {
            Self::BodyNotJson => None,
            Self::CreateHost(se) | Self::FetchHosts(se) | Self::Storage(se) => Some(se),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.store_error() {
            None => StatusCode::BAD_REQUEST,
            Some(se) => se
                .status_code()
                .and_then(|code| StatusCode::from_u16(code).ok())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}

impl From<ApiError> for ApiErrorResponse {
    fn from(err: ApiError) -> Self {
        ApiErrorResponse::new(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status_code = self.status_code();

        let Some(se) = self.store_error() else {
            return (status_code, Json(ApiErrorResponse::from(self))).into_response();
        };
        tracing::error!(error = %se, %status_code, "{}", self);

        // Store failures go out as text/plain around a JSON-shaped body.
        let mut response = (status_code, Json(ApiErrorResponse::from(self))).into_response();
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        response
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use serde_json::json;

    use super::*;

    async fn render(err: ApiError) -> (StatusCode, Option<String>, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, content_type, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_body_not_json_is_a_json_400() {
        let (status, content_type, body) = render(ApiError::BodyNotJson).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(body, json!({ "body": "Body must be JSON." }));
    }

    #[tokio::test]
    async fn test_store_errors_use_declared_status() {
        let err = ApiError::CreateHost(StoreError::Rejected {
            status_code: 422,
            reason: "validation failed".into(),
        });
        let (status, content_type, body) = render(err).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(content_type.as_deref(), Some("text/plain"));
        assert_eq!(body, json!({ "body": "Could not create the host." }));
    }

    #[tokio::test]
    async fn test_store_errors_default_to_500() {
        let err = ApiError::FetchHosts(StoreError::from(Box::<dyn std::error::Error + Send + Sync>::from("cursor died")));
        let (status, content_type, body) = render(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(content_type.as_deref(), Some("text/plain"));
        assert_eq!(body, json!({ "body": "Could not fetch the hosts." }));
    }

    #[test]
    fn test_invalid_declared_status_falls_back_to_500() {
        let err = ApiError::CreateHost(StoreError::Rejected {
            status_code: 42,
            reason: "nonsense".into(),
        });

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_detail_never_reaches_the_body() {
        let err = ApiError::Storage(StoreError::from(Box::<dyn std::error::Error + Send + Sync>::from("secret detail")));
        let body = ApiErrorResponse::from(err).body;

        assert!(!body.contains("secret detail"));
    }
}
