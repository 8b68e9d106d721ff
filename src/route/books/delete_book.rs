use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::{
    error::{ResourceError, ResourceErrorProvider},
    extractor::{path::ApiPath, validated::Validated},
    state::{ApiState, StateProvider},
};

use super::BookPath;

#[derive(Debug)]
pub struct DeleteBookResponse;

impl IntoResponse for DeleteBookResponse {
    fn into_response(self) -> Response {
        StatusCode::NO_CONTENT.into_response()
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "error_type")]
pub enum DeleteBookErrorType {
    NotFound {
        #[serde(skip)]
        id: u64,
    },
}

#[derive(Debug, Serialize)]
pub struct DeleteBookErrorContext {
    pub reason: String,
}

impl ResourceErrorProvider for DeleteBookErrorType {
    type Context = DeleteBookErrorContext;

    fn headers(&self) -> Option<axum::http::HeaderMap> {
        None
    }

    fn status_code(&self) -> StatusCode {
        match self {
            DeleteBookErrorType::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            DeleteBookErrorType::NotFound { .. } => "Book not found",
        }
    }

    fn context(&self) -> Self::Context {
        match self {
            DeleteBookErrorType::NotFound { id } => DeleteBookErrorContext {
                reason: format!("Book with id {} not found", id),
            },
        }
    }
}

pub async fn delete_book(
    Validated(ApiPath(path)): Validated<ApiPath<BookPath>>,
    State(state): State<ApiState>,
) -> Result<DeleteBookResponse, ResourceError<DeleteBookErrorType>> {
    if !state.repository().delete(path.id).await {
        return Err(ResourceError::new(
            state.error_verbosity(),
            DeleteBookErrorType::NotFound { id: path.id },
        ));
    }

    Ok(DeleteBookResponse)
}
