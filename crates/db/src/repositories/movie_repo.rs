//! Repository for the `movies` table.

use filmes_core::pagination::Page;
use filmes_core::types::DbId;
use sqlx::PgPool;

use crate::models::movie::Movie;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, genre, duration";

/// Provides CRUD operations for movies.
pub struct MovieRepo;

impl MovieRepo {
    /// Insert a new movie, returning the created row. `movie.id` is ignored.
    pub async fn create(pool: &PgPool, movie: &Movie) -> Result<Movie, sqlx::Error> {
        let query = format!(
            "INSERT INTO movies (title, genre, duration)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(&movie.title)
            .bind(&movie.genre)
            .bind(movie.duration)
            .fetch_one(pool)
            .await
    }

    /// Find a movie by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1");
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List movies in insertion (id) order within the given window.
    pub async fn list(pool: &PgPool, page: Page) -> Result<Vec<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies ORDER BY id OFFSET $1 LIMIT $2");
        sqlx::query_as::<_, Movie>(&query)
            .bind(page.skip)
            .bind(page.take)
            .fetch_all(pool)
            .await
    }

    /// Overwrite title, genre and duration. Returns `false` if the row is gone.
    pub async fn update(pool: &PgPool, movie: &Movie) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE movies SET title = $2, genre = $3, duration = $4 WHERE id = $1",
        )
        .bind(movie.id)
        .bind(&movie.title)
        .bind(&movie.genre)
        .bind(movie.duration)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a movie by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
