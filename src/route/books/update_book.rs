use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ResourceError, ResourceErrorProvider},
    extractor::{json::ApiJson, path::ApiPath, validated::Validated},
    repository::{Book, BookUpdate},
    state::{ApiState, StateProvider},
};

use super::BookPath;

/// Absent fields are left unchanged. Empty strings and a zero year are
/// also ignored, see [`BookUpdate`].
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub year_of_release: Option<u16>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateBookResponse {
    pub book: Book,
}

impl IntoResponse for UpdateBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "error_type")]
pub enum UpdateBookErrorType {
    NotFound {
        #[serde(skip)]
        id: u64,
    },
    EmptyUpdate,
}

#[derive(Debug, Serialize)]
pub struct UpdateBookErrorContext {
    pub reason: String,
}

impl ResourceErrorProvider for UpdateBookErrorType {
    type Context = UpdateBookErrorContext;

    fn headers(&self) -> Option<axum::http::HeaderMap> {
        None
    }

    fn status_code(&self) -> StatusCode {
        match self {
            UpdateBookErrorType::NotFound { .. } => StatusCode::NOT_FOUND,
            UpdateBookErrorType::EmptyUpdate => StatusCode::BAD_REQUEST,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            UpdateBookErrorType::NotFound { .. } => "Book not found",
            UpdateBookErrorType::EmptyUpdate => "Update payload is empty",
        }
    }

    fn context(&self) -> Self::Context {
        match self {
            UpdateBookErrorType::NotFound { id } => UpdateBookErrorContext {
                reason: format!("Book with id {} not found", id),
            },
            UpdateBookErrorType::EmptyUpdate => UpdateBookErrorContext {
                reason: "The update payload must set at least one field".to_string(),
            },
        }
    }
}

pub async fn update_book(
    Validated(ApiPath(path)): Validated<ApiPath<BookPath>>,
    State(state): State<ApiState>,
    ApiJson(request): ApiJson<UpdateBookRequest>,
) -> Result<UpdateBookResponse, ResourceError<UpdateBookErrorType>> {
    let update = BookUpdate {
        title: request.title,
        author: request.author,
        isbn: request.isbn,
        year_of_release: request.year_of_release,
    };

    if update.is_empty() {
        return Err(ResourceError::new(
            state.error_verbosity(),
            UpdateBookErrorType::EmptyUpdate,
        ));
    }

    let book = state
        .repository()
        .update(path.id, update)
        .await
        .ok_or_else(|| {
            ResourceError::new(
                state.error_verbosity(),
                UpdateBookErrorType::NotFound { id: path.id },
            )
        })?;

    Ok(UpdateBookResponse { book })
}
