use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    extractor::{json::ApiJson, validated::Validated},
    repository::{Book, NewBook},
    state::{ApiState, StateProvider},
};

#[derive(Debug, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    #[validate(length(min = 1, message = "Must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "Must not be empty"))]
    pub author: String,
    #[validate(length(min = 1, message = "Must not be empty"))]
    pub isbn: String,
    #[serde(default)]
    pub year_of_release: u16,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateBookResponse {
    pub book: Book,
}

impl IntoResponse for CreateBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}

pub async fn create_book(
    State(state): State<ApiState>,
    Validated(ApiJson(request)): Validated<ApiJson<CreateBookRequest>>,
) -> CreateBookResponse {
    let book = state
        .repository()
        .create(NewBook {
            title: request.title,
            author: request.author,
            isbn: request.isbn,
            year_of_release: request.year_of_release,
        })
        .await;

    CreateBookResponse { book }
}
