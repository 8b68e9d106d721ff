use axum::extract::{FromRequest, FromRequestParts};

use crate::error::ApiError;

pub mod json;
pub mod path;
pub mod query;
pub mod validated;

pub trait ExtractorFromRequestParts<S>: FromRequestParts<S, Rejection = ApiError> {
    type Extracted;

    fn extracted(&self) -> &Self::Extracted;
}

pub trait ExtractorFromRequest<S>: FromRequest<S, Rejection = ApiError> {
    type Extracted;

    fn extracted(&self) -> &Self::Extracted;
}
