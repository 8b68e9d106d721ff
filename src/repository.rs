use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// A book record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub year_of_release: u16,
    pub isbn: String,
    pub is_borrowed: bool,
}

/// Input for creating a book. The id and the borrowed flag are assigned by the repository.
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub year_of_release: u16,
}

/// A partial update. `None` means "leave the field unchanged".
///
/// An empty string or a zero year is also treated as "no change", matching
/// the merge semantics this service has always had on the wire.
#[derive(Debug, Clone, Default)]
pub struct BookUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub year_of_release: Option<u16>,
}

impl BookUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.isbn.is_none()
            && self.year_of_release.is_none()
    }

    fn apply(self, book: &mut Book) {
        if let Some(title) = self.title.filter(|title| !title.is_empty()) {
            book.title = title;
        }

        if let Some(author) = self.author.filter(|author| !author.is_empty()) {
            book.author = author;
        }

        if let Some(isbn) = self.isbn.filter(|isbn| !isbn.is_empty()) {
            book.isbn = isbn;
        }

        if let Some(year_of_release) = self.year_of_release.filter(|year| *year != 0) {
            book.year_of_release = year_of_release;
        }
    }
}

/// Filters for the combined query. Every filter is optional and independent.
#[derive(Debug, Clone, Default)]
pub struct BookFilter {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year_of_release: Option<u16>,
    pub is_borrowed: Option<bool>,
}

impl BookFilter {
    fn matches(&self, book: &Book) -> bool {
        if let Some(title) = &self.title {
            if !book.title.to_lowercase().contains(&title.to_lowercase()) {
                return false;
            }
        }

        if let Some(author) = &self.author {
            if !book.author.to_lowercase().contains(&author.to_lowercase()) {
                return false;
            }
        }

        if let Some(year_of_release) = self.year_of_release {
            if book.year_of_release != year_of_release {
                return false;
            }
        }

        if let Some(is_borrowed) = self.is_borrowed {
            if book.is_borrowed != is_borrowed {
                return false;
            }
        }

        true
    }
}

/// Pagination metadata returned alongside a result page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total_items: usize,
    pub total_pages: usize,
    pub page: usize,
    pub size: usize,
}

/// One page of the filtered book set.
#[derive(Debug)]
pub struct BookPage {
    pub books: Vec<Book>,
    pub pagination: Pagination,
}

#[derive(Debug, Default)]
struct Shelf {
    books: Vec<Book>,
    next_id: u64,
}

/// In-memory book store.
///
/// Owned by the API state and shared by reference with the routes.
/// Lifetime is process lifetime, there is no persistence.
#[derive(Debug)]
pub struct BookRepository {
    shelf: RwLock<Shelf>,
}

impl BookRepository {
    pub fn new() -> Self {
        Self::with_books(Vec::new())
    }

    /// Creates a repository preloaded with the given books.
    ///
    /// The id counter is seeded above the maximum preloaded id.
    pub fn with_books(books: Vec<Book>) -> Self {
        let next_id = books.iter().map(|book| book.id).max().unwrap_or(0) + 1;

        BookRepository {
            shelf: RwLock::new(Shelf { books, next_id }),
        }
    }

    /// Assigns the next id, appends the book and returns it.
    pub async fn create(&self, new_book: NewBook) -> Book {
        let mut shelf = self.shelf.write().await;

        let book = Book {
            id: shelf.next_id,
            title: new_book.title,
            author: new_book.author,
            year_of_release: new_book.year_of_release,
            isbn: new_book.isbn,
            is_borrowed: false,
        };

        shelf.next_id += 1;
        shelf.books.push(book.clone());

        book
    }

    pub async fn get(&self, id: u64) -> Option<Book> {
        let shelf = self.shelf.read().await;

        shelf.books.iter().find(|book| book.id == id).cloned()
    }

    /// Merges the update into the matching book and returns the result.
    ///
    /// `id` and the borrowed flag are never touched by this path.
    pub async fn update(&self, id: u64, update: BookUpdate) -> Option<Book> {
        let mut shelf = self.shelf.write().await;

        let book = shelf.books.iter_mut().find(|book| book.id == id)?;
        update.apply(book);

        Some(book.clone())
    }

    /// Removes the matching book. Returns whether a removal occurred.
    pub async fn delete(&self, id: u64) -> bool {
        let mut shelf = self.shelf.write().await;

        let len_before = shelf.books.len();
        shelf.books.retain(|book| book.id != id);

        shelf.books.len() != len_before
    }

    /// Applies the filters and returns the requested page in insertion order.
    ///
    /// `page` and `size` must both be at least 1, the HTTP layer rejects
    /// anything else. No bounds clamping: a page beyond range yields an
    /// empty slice with valid metadata.
    pub async fn query(&self, filter: &BookFilter, page: usize, size: usize) -> BookPage {
        let shelf = self.shelf.read().await;

        let filtered: Vec<&Book> = shelf
            .books
            .iter()
            .filter(|book| filter.matches(book))
            .collect();

        let total_items = filtered.len();
        let total_pages = total_items.div_ceil(size);

        let books = filtered
            .into_iter()
            .skip((page - 1).saturating_mul(size))
            .take(size)
            .cloned()
            .collect();

        BookPage {
            books,
            pagination: Pagination {
                total_items,
                total_pages,
                page,
                size,
            },
        }
    }
}

impl Default for BookRepository {
    fn default() -> Self {
        Self::new()
    }
}
