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
    extractor::{query::ApiQuery, validated::Validated},
    repository::{Book, BookFilter, Pagination},
    state::{ApiState, StateProvider},
};

fn default_page() -> u64 {
    1
}

fn default_size() -> u64 {
    10
}

#[derive(Debug, Deserialize, JsonSchema, Validate)]
pub struct ListBooksQuery {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Must be at least 1"))]
    pub page: u64,
    #[serde(default = "default_size")]
    #[validate(range(min = 1, message = "Must be at least 1"))]
    pub size: u64,
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<u16>,
    pub borrowed: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListBooksResponse {
    pub books: Vec<Book>,
    pub pagination: Pagination,
}

impl IntoResponse for ListBooksResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub async fn list_books(
    Validated(ApiQuery(query)): Validated<ApiQuery<ListBooksQuery>>,
    State(state): State<ApiState>,
) -> ListBooksResponse {
    let filter = BookFilter {
        title: query.title,
        author: query.author,
        year_of_release: query.year,
        is_borrowed: query.borrowed,
    };

    let page = state
        .repository()
        .query(&filter, query.page as usize, query.size as usize)
        .await;

    ListBooksResponse {
        books: page.books,
        pagination: page.pagination,
    }
}
