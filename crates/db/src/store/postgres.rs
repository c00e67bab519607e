use async_trait::async_trait;
use filmes_core::pagination::Page;
use filmes_core::types::DbId;

use super::MovieStore;
use crate::models::movie::Movie;
use crate::repositories::MovieRepo;
use crate::DbPool;

/// [`MovieStore`] backed by the `movies` table.
#[derive(Debug, Clone)]
pub struct PgMovieStore {
    pool: DbPool,
}

impl PgMovieStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MovieStore for PgMovieStore {
    async fn insert(&self, movie: &Movie) -> Result<Movie, sqlx::Error> {
        MovieRepo::create(&self.pool, movie).await
    }

    async fn list(&self, page: Page) -> Result<Vec<Movie>, sqlx::Error> {
        MovieRepo::list(&self.pool, page).await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Movie>, sqlx::Error> {
        MovieRepo::find_by_id(&self.pool, id).await
    }

    async fn update(&self, movie: &Movie) -> Result<bool, sqlx::Error> {
        MovieRepo::update(&self.pool, movie).await
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        MovieRepo::delete(&self.pool, id).await
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        crate::health_check(&self.pool).await
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
