//! Shared query parameter types for API handlers.

use filmes_core::pagination::Page;
use serde::Deserialize;

/// Skip/take pagination parameters (`?skip=&take=`).
///
/// Missing values fall back to the defaults in [`filmes_core::pagination`];
/// negatives are clamped when converted into a [`Page`].
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub skip: Option<i64>,
    pub take: Option<i64>,
}

impl From<PaginationParams> for Page {
    fn from(params: PaginationParams) -> Self {
        Page::new(params.skip, params.take)
    }
}
