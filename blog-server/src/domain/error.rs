use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::domain::post::{PostDraft, PostView};

/// A create or edit that failed validation, with the user's input so the
/// form can be shown again.
#[derive(Debug, Clone, Serialize)]
pub struct Rejected {
    #[serde(rename = "error")]
    pub message: String,
    pub form: PostDraft,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<PostView>,
}

impl fmt::Display for Rejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("post not found: {0}")]
    PostNotFound(u64),
    #[error("{0}")]
    Validation(Box<Rejected>),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        DomainError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::Storage(format!("malformed posts document: {err}"))
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        match self {
            DomainError::PostNotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            DomainError::Storage(_) | DomainError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let DomainError::Validation(rejected) = self {
            return HttpResponse::build(self.status_code()).json(rejected);
        }

        let message = self.to_string();
        let details = match self {
            DomainError::PostNotFound(id) => Some(json!({ "resource": id })),
            _ => None,
        };
        let body = ErrorBody {
            error: message.as_str(),
            details,
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn not_found_maps_to_404_with_resource() {
        let resp = DomainError::PostNotFound(7).error_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = to_bytes(resp.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["details"]["resource"], 7);
    }

    #[actix_web::test]
    async fn validation_body_carries_form() {
        let err = PostDraft::new("", "t", "c").validate(None).unwrap_err();
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = to_bytes(resp.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "Please fill in all fields.");
        assert_eq!(body["form"]["title"], "t");
        assert!(body.get("post").is_none());
    }
}
