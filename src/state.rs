use std::{ops::Deref, sync::Arc};

use crate::{error::ErrorVerbosity, repository::BookRepository};

pub trait StateProvider {
    /// Returns the error verbosity.
    fn error_verbosity(&self) -> ErrorVerbosity;

    /// Returns the book repository.
    fn repository(&self) -> &BookRepository;
}

#[derive(Clone)]
pub struct ApiState {
    inner: Arc<ApiStateInner>,
}

impl ApiState {
    pub fn new(error_verbosity: ErrorVerbosity, repository: BookRepository) -> Self {
        Self {
            inner: Arc::new(ApiStateInner {
                error_verbosity,
                repository,
            }),
        }
    }
}

impl Deref for ApiState {
    type Target = ApiStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

pub struct ApiStateInner {
    error_verbosity: ErrorVerbosity,
    repository: BookRepository,
}

impl StateProvider for ApiState {
    fn error_verbosity(&self) -> ErrorVerbosity {
        self.inner.error_verbosity
    }

    fn repository(&self) -> &BookRepository {
        &self.inner.repository
    }
}
