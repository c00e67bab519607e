//! The data context the HTTP layer talks to.
//!
//! [`MovieStore`] hides whether movies live in PostgreSQL ([`PgMovieStore`])
//! or in process memory ([`MemoryMovieStore`]). Every mutating call is
//! committed before it returns; there is no separate "save changes" step.

mod memory;
mod postgres;

use async_trait::async_trait;
use filmes_core::pagination::Page;
use filmes_core::types::DbId;

use crate::models::movie::Movie;

pub use memory::MemoryMovieStore;
pub use postgres::PgMovieStore;

/// Storage operations for movies.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Persist a new movie and return it with its assigned id.
    /// The incoming `id` is ignored.
    async fn insert(&self, movie: &Movie) -> Result<Movie, sqlx::Error>;

    /// Movies in id order, windowed by `page`.
    async fn list(&self, page: Page) -> Result<Vec<Movie>, sqlx::Error>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Movie>, sqlx::Error>;

    /// Overwrite the mutable fields of the movie with `movie.id`.
    /// Returns `false` if no such movie exists.
    async fn update(&self, movie: &Movie) -> Result<bool, sqlx::Error>;

    /// Returns `false` if no such movie exists.
    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error>;

    /// Cheap reachability probe for health checks.
    async fn ping(&self) -> Result<(), sqlx::Error>;

    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;
}
