use schemars::JsonSchema;
use serde::Deserialize;
use validator::Validate;

pub mod app;
pub mod create_book;
pub mod delete_book;
pub mod get_book;
pub mod list_books;
pub mod update_book;

pub use app::app;

/// Path parameters for the `/books/:id` routes.
#[derive(Debug, Deserialize, JsonSchema, Validate)]
pub struct BookPath {
    #[validate(range(min = 1, message = "Must be at least 1"))]
    pub id: u64,
}
