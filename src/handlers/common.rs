use crate::{
    config::AppConfig,
    errors::ApiError,
    ApiResponse,
};
use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Standard success response
pub fn success_response<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success(data))
}

/// Standard created response
pub fn created_response<T: Serialize>(data: T) -> (StatusCode, Json<ApiResponse<T>>) {
    (StatusCode::CREATED, Json(ApiResponse::success(data)))
}

/// Standard no content response
pub fn no_content_response() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Validate request input
pub fn validate_input<T: Validate>(input: &T) -> Result<(), ApiError> {
    input
        .validate()
        .map_err(|e| ApiError::ValidationError(format!("Validation failed: {}", e)))
}

/// `limit` / `offset` query parameters for list operations
#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Maximum number of records (defaults to the configured page size)
    pub limit: Option<u64>,
    /// Number of records to skip
    pub offset: Option<u64>,
}

impl PaginationParams {
    /// Limit clamped to the configured bounds, and the offset.
    pub fn resolve(&self, config: &AppConfig) -> (u64, u64) {
        (config.page_size(self.limit), self.offset.unwrap_or(0))
    }
}

/// Body of the `*/names/rank` endpoints.
///
/// When `names` is omitted every stored record of that kind is ranked.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RankRequest<N> {
    pub names: Option<Vec<N>>,
    pub search: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults_come_from_config() {
        let config = AppConfig::new(
            "sqlite::memory:".into(),
            "127.0.0.1".into(),
            0,
            "development".into(),
        );

        let params = PaginationParams::default();
        assert_eq!(params.resolve(&config), (50, 0));

        let params = PaginationParams {
            limit: Some(100_000),
            offset: Some(20),
        };
        assert_eq!(params.resolve(&config), (500, 20));
    }

    #[test]
    fn rank_request_names_are_optional() {
        let request: RankRequest<crate::dto::BrandNames> =
            serde_json::from_str(r#"{"search":"lav"}"#).unwrap();
        assert!(request.names.is_none());
        assert_eq!(request.search, "lav");
    }
}
