use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::{
    error::ErrorVerbosity,
    repository::{Book, BookRepository},
    server::{router, ServerConfig},
    state::ApiState,
};

#[tokio::test]
async fn example_config_is_valid() {
    ServerConfig::from_config_file("config.example.yaml")
        .await
        .expect("Example config is not parsable");
}

fn book(id: u64, title: &str, author: &str, year_of_release: u16, is_borrowed: bool) -> Book {
    Book {
        id,
        title: title.to_string(),
        author: author.to_string(),
        year_of_release,
        isbn: format!("000-0-00-00000{}-0", id),
        is_borrowed,
    }
}

fn seeded_app() -> Router {
    let books = vec![
        book(1, "The Hobbit", "J.R.R. Tolkien", 1937, false),
        book(2, "The Fellowship of the Ring", "J.R.R. Tolkien", 1954, false),
        book(3, "The Two Towers", "J.R.R. Tolkien", 1954, true),
        book(4, "Dune", "Frank Herbert", 1965, false),
    ];

    let repository = BookRepository::with_books(books);
    let state = ApiState::new(ErrorVerbosity::Full, repository);

    router(state)
}

async fn body_json(response: Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read the response body")
        .to_bytes();

    serde_json::from_slice(&bytes).expect("Response body is not valid JSON")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("Failed to build the request")
}

fn with_json_body(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("Failed to build the request")
}

#[tokio::test]
async fn listing_filters_and_paginates() {
    let app = seeded_app();

    let response = app
        .oneshot(get("/books?author=tolkien&page=1&size=2"))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;

    assert_eq!(body["books"].as_array().expect("Expected an array").len(), 2);
    assert_eq!(body["pagination"]["totalItems"], 3);
    assert_eq!(body["pagination"]["totalPages"], 2);
    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["size"], 2);
}

#[tokio::test]
async fn listing_defaults_to_first_page_of_ten() {
    let app = seeded_app();

    let response = app.oneshot(get("/books")).await.expect("Request failed");

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;

    assert_eq!(body["books"].as_array().expect("Expected an array").len(), 4);
    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["size"], 10);
}

#[tokio::test]
async fn listing_by_borrowed_returns_only_borrowed_books() {
    let app = seeded_app();

    let response = app
        .oneshot(get("/books?borrowed=true"))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let books = body["books"].as_array().expect("Expected an array");

    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["title"], "The Two Towers");
    assert_eq!(books[0]["isBorrowed"], true);
}

#[tokio::test]
async fn listing_rejects_a_zero_page() {
    let app = seeded_app();

    let response = app
        .oneshot(get("/books?page=0"))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn listing_rejects_a_non_numeric_size() {
    let app = seeded_app();

    let response = app
        .oneshot(get("/books?size=ten"))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn getting_a_book_by_id() {
    let app = seeded_app();

    let response = app.oneshot(get("/books/1")).await.expect("Request failed");

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;

    assert_eq!(body["book"]["title"], "The Hobbit");
    assert_eq!(body["book"]["yearOfRelease"], 1937);
}

#[tokio::test]
async fn getting_an_unknown_book_is_a_not_found() {
    let app = seeded_app();

    let response = app
        .oneshot(get("/books/999"))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;

    assert_eq!(body["error_type"], "NotFound");
}

#[tokio::test]
async fn getting_a_book_with_an_invalid_id_is_a_bad_request() {
    let app = seeded_app();

    let response = app
        .oneshot(get("/books/not-a-number"))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = seeded_app();

    let response = app.oneshot(get("/books/0")).await.expect("Request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn creating_a_book_assigns_the_next_id() {
    let app = seeded_app();

    let response = app
        .oneshot(with_json_body(
            Method::POST,
            "/books",
            json!({
                "title": "The Return of the King",
                "author": "J.R.R. Tolkien",
                "isbn": "978-0-261-10237-8",
                "yearOfRelease": 1955,
            }),
        ))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;

    assert_eq!(body["book"]["id"], 5);
    assert_eq!(body["book"]["isBorrowed"], false);
}

#[tokio::test]
async fn creating_a_book_without_required_fields_is_a_bad_request() {
    let app = seeded_app();

    let response = app
        .oneshot(with_json_body(
            Method::POST,
            "/books",
            json!({ "title": "No author" }),
        ))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = seeded_app();

    let response = app
        .oneshot(with_json_body(
            Method::POST,
            "/books",
            json!({ "title": "", "author": "Someone", "isbn": "000-0-00-000000-0" }),
        ))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn updating_a_book_changes_only_the_given_fields() {
    let app = seeded_app();

    let response = app
        .oneshot(with_json_body(
            Method::PUT,
            "/books/2",
            json!({ "title": "The Fellowship of the Ring (Revised)" }),
        ))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;

    assert_eq!(body["book"]["title"], "The Fellowship of the Ring (Revised)");
    assert_eq!(body["book"]["author"], "J.R.R. Tolkien");
    assert_eq!(body["book"]["yearOfRelease"], 1954);
}

#[tokio::test]
async fn updating_with_an_empty_payload_is_a_bad_request() {
    let app = seeded_app();

    let response = app
        .oneshot(with_json_body(Method::PUT, "/books/2", json!({})))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;

    assert_eq!(body["error_type"], "EmptyUpdate");
}

#[tokio::test]
async fn updating_with_only_unrecognized_fields_is_a_bad_request() {
    let app = seeded_app();

    // Carries a key, but sets no updatable field.
    let response = app
        .oneshot(with_json_body(
            Method::PUT,
            "/books/2",
            json!({ "isBorrowed": true }),
        ))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;

    assert_eq!(body["error_type"], "EmptyUpdate");
}

#[tokio::test]
async fn updating_an_unknown_book_is_a_not_found() {
    let app = seeded_app();

    let response = app
        .oneshot(with_json_body(
            Method::PUT,
            "/books/999",
            json!({ "title": "Ghost" }),
        ))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_a_book_returns_no_content() {
    let app = seeded_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::DELETE)
                .uri("/books/4")
                .body(Body::empty())
                .expect("Failed to build the request"),
        )
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(get("/books/4")).await.expect("Request failed");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_an_unknown_book_is_a_not_found() {
    let app = seeded_app();

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::DELETE)
                .uri("/books/999")
                .body(Body::empty())
                .expect("Failed to build the request"),
        )
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn an_unknown_route_is_a_not_found() {
    let app = seeded_app();

    let response = app
        .oneshot(get("/shelves"))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;

    assert_eq!(body["error_type"], "NotFound");
}

#[tokio::test]
async fn an_unsupported_method_is_a_method_not_allowed() {
    let app = seeded_app();

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::PATCH)
                .uri("/books/1")
                .body(Body::empty())
                .expect("Failed to build the request"),
        )
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
