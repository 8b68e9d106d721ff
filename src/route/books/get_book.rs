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
    extractor::{path::ApiPath, validated::Validated},
    repository::Book,
    state::{ApiState, StateProvider},
};

use super::BookPath;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetBookResponse {
    pub book: Book,
}

impl IntoResponse for GetBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "error_type")]
pub enum GetBookErrorType {
    NotFound {
        #[serde(skip)]
        id: u64,
    },
}

#[derive(Debug, Serialize)]
pub struct GetBookErrorContext {
    pub reason: String,
}

impl ResourceErrorProvider for GetBookErrorType {
    type Context = GetBookErrorContext;

    fn headers(&self) -> Option<axum::http::HeaderMap> {
        None
    }

    fn status_code(&self) -> StatusCode {
        match self {
            GetBookErrorType::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            GetBookErrorType::NotFound { .. } => "Book not found",
        }
    }

    fn context(&self) -> Self::Context {
        match self {
            GetBookErrorType::NotFound { id } => GetBookErrorContext {
                reason: format!("Book with id {} not found", id),
            },
        }
    }
}

pub async fn get_book(
    Validated(ApiPath(path)): Validated<ApiPath<BookPath>>,
    State(state): State<ApiState>,
) -> Result<GetBookResponse, ResourceError<GetBookErrorType>> {
    let book = state.repository().get(path.id).await.ok_or_else(|| {
        ResourceError::new(
            state.error_verbosity(),
            GetBookErrorType::NotFound { id: path.id },
        )
    })?;

    Ok(GetBookResponse { book })
}
