use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::PostForm;

#[derive(Debug, Error)]
pub enum BlogClientError {
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Not found")]
    NotFound,
    #[error("Invalid post: {message}")]
    Validation { message: String, form: PostForm },
    #[error("Server error ({status}): {message}")]
    Server { status: StatusCode, message: String },
}

#[derive(Debug, Deserialize)]
struct ValidationBody {
    error: String,
    #[serde(default)]
    form: PostForm,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl BlogClientError {
    pub async fn from_http_response(resp: reqwest::Response) -> Self {
        let status = resp.status();
        match resp.text().await {
            Ok(body) => Self::from_status(status, &body),
            Err(e) => Self::RequestError(e),
        }
    }

    pub fn from_status(status: StatusCode, body: &str) -> Self {
        match status {
            StatusCode::NOT_FOUND => Self::NotFound,
            StatusCode::UNPROCESSABLE_ENTITY => match serde_json::from_str::<ValidationBody>(body) {
                Ok(v) => Self::Validation {
                    message: v.error,
                    form: v.form,
                },
                Err(_) => Self::Server {
                    status,
                    message: body.to_string(),
                },
            },
            _ => {
                let message = serde_json::from_str::<ErrorBody>(body)
                    .map(|b| b.error)
                    .unwrap_or_else(|_| body.to_string());
                Self::Server { status, message }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_status() {
        let err = BlogClientError::from_status(StatusCode::NOT_FOUND, "");
        assert!(matches!(err, BlogClientError::NotFound));
    }

    #[test]
    fn validation_body_is_decoded() {
        let body = r#"{"error":"Please fill in all fields.","form":{"author":"A","title":"","content":"C"}}"#;
        match BlogClientError::from_status(StatusCode::UNPROCESSABLE_ENTITY, body) {
            BlogClientError::Validation { message, form } => {
                assert_eq!(message, "Please fill in all fields.");
                assert_eq!(form.author, "A");
                assert_eq!(form.title, "");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn server_error_uses_error_field() {
        let body = r#"{"error":"storage error: disk full"}"#;
        match BlogClientError::from_status(StatusCode::INTERNAL_SERVER_ERROR, body) {
            BlogClientError::Server { status, message } => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(message, "storage error: disk full");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_json_body_is_kept_verbatim() {
        match BlogClientError::from_status(StatusCode::BAD_GATEWAY, "upstream down") {
            BlogClientError::Server { message, .. } => assert_eq!(message, "upstream down"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
