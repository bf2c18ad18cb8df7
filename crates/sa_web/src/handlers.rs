use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use sa_core::types::AnalyzeRequest;
use sa_core::Error;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ErrorBody {
    fn bare(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            suggestion: None,
        }
    }
}

pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<serde_json::Value>,
) -> Response {
    // absent url/provider or an unrecognized backend name is bad input
    let request: AnalyzeRequest = match serde_json::from_value(payload) {
        Ok(request) => request,
        Err(err) => {
            let (status, body) = error_body(&Error::InvalidRequest(format!(
                "Missing or invalid request parameters: {}",
                err
            )));
            return (status, Json(body)).into_response();
        }
    };

    match state.pipeline.run(request).await {
        Ok(response) => Json(response).into_response(),
        Err(err) => {
            tracing::error!(%err, "analyze request failed");
            let (status, body) = error_body(&err);
            (status, Json(body)).into_response()
        }
    }
}

pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(ErrorBody::bare("Not found"))).into_response()
}

fn error_body(err: &Error) -> (StatusCode, ErrorBody) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let body = match err {
        Error::InvalidRequest(_) | Error::UnsupportedPlatform(_) => ErrorBody::bare(err.to_string()),
        Error::Fetch { .. } | Error::Http(_) => ErrorBody {
            error: "Failed to fetch article".to_string(),
            details: Some(err.to_string()),
            suggestion: Some("请检查URL是否正确，或者文章是否需要登录访问".to_string()),
        },
        Error::InsufficientContent(details) => ErrorBody {
            error: "Insufficient content".to_string(),
            details: Some(details.clone()),
            suggestion: Some("请尝试复制文章正文后直接粘贴进行分析".to_string()),
        },
        Error::MissingCredential(_) | Error::Analysis(_) => ErrorBody {
            error: "AI analysis failed".to_string(),
            details: Some(err.to_string()),
            suggestion: None,
        },
        Error::Serialization(_) | Error::Internal(_) => ErrorBody {
            error: "Internal server error".to_string(),
            details: Some(err.to_string()),
            suggestion: None,
        },
    };

    (status, body)
}
