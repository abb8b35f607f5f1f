use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::StoryError;
use crate::services::{GameStoreError, IllustrationError, ImageLoadError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found")]
    NotFound,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    ImageLoad(#[from] ImageLoadError),

    #[error(transparent)]
    Story(#[from] StoryError),

    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),

    #[error("Storage error: {0}")]
    Storage(#[from] GameStoreError),

    #[error("Illustration is still loading (invocation {0})")]
    Loading(u64),

    #[error("Illustration failed: {0}")]
    IllustrationFailed(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<IllustrationError> for ApiError {
    fn from(e: IllustrationError) -> Self {
        match e {
            IllustrationError::Load(e) => ApiError::ImageLoad(e),
            IllustrationError::Palette(e) => ApiError::BadRequest(e.to_string()),
            IllustrationError::Render(e) => ApiError::Render(e),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Invalid source image: {0}")]
    Source(#[from] hires_filter::StylizeError),

    #[error("Render task failed: {0}")]
    Task(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ImageLoad(_) => StatusCode::BAD_GATEWAY,
            ApiError::Story(StoryError::UnknownNode(_)) => StatusCode::NOT_FOUND,
            ApiError::Story(StoryError::InvalidChoice { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Story(StoryError::GameOver(_)) => StatusCode::CONFLICT,
            ApiError::Loading(_) => StatusCode::CONFLICT,
            ApiError::IllustrationFailed(_) => StatusCode::BAD_GATEWAY,
            ApiError::Render(_) | ApiError::Storage(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_not_found() {
        assert_eq!(ApiError::NotFound.to_string(), "Not found");
    }

    #[test]
    fn test_api_error_bad_request() {
        let error = ApiError::BadRequest("missing src".to_string());
        assert_eq!(error.to_string(), "Bad request: missing src");
    }

    #[test]
    fn test_api_error_image_load_is_transparent() {
        let error: ApiError = ImageLoadError::new("cover.png", "file not found").into();
        assert_eq!(
            error.to_string(),
            "Failed to load image cover.png: file not found"
        );
    }

    #[test]
    fn test_api_error_loading() {
        assert_eq!(
            ApiError::Loading(7).to_string(),
            "Illustration is still loading (invocation 7)"
        );
    }

    #[test]
    fn test_render_error_png_encode() {
        let error = RenderError::PngEncode("Encoding failed".to_string());
        assert_eq!(error.to_string(), "PNG encode error: Encoding failed");
    }

    #[test]
    fn test_api_error_from_illustration_error() {
        let error: ApiError = IllustrationError::Load(ImageLoadError::new("a", "b")).into();
        assert!(matches!(error, ApiError::ImageLoad(_)));

        let error: ApiError = IllustrationError::Render(RenderError::Task("x".into())).into();
        assert!(matches!(error, ApiError::Render(_)));
    }

    #[test]
    fn test_api_error_into_response_status_codes() {
        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ApiError::BadRequest("x".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::ImageLoad(ImageLoadError::new("a", "b")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let response = ApiError::Story(StoryError::UnknownNode("x".into())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ApiError::Story(StoryError::InvalidChoice {
            node_id: "start".into(),
            index: 9,
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::Loading(1).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = ApiError::IllustrationFailed("x".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let response = ApiError::Internal("x".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
