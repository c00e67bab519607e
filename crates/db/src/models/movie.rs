//! Movie entity model, DTOs and the mapping rules between them.
//!
//! The entity carries the authoritative field constraints. Every write path
//! (create, replace, patch) builds a candidate [`Movie`] and runs
//! [`Movie::validate_fields`] on it before anything reaches the store.

use std::borrow::Cow;

use chrono::Utc;
use filmes_core::error::CoreError;
use filmes_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// Id carried by a movie that has not been inserted yet.
pub const UNASSIGNED_ID: DbId = 0;

/// Longest accepted genre, in characters.
pub const GENRE_MAX_CHARS: u64 = 20;

/// Shortest accepted running time, in minutes.
pub const DURATION_MIN: i32 = 70;

/// Longest accepted running time, in minutes.
pub const DURATION_MAX: i32 = 360;

/// A row from the `movies` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Validate)]
pub struct Movie {
    pub id: DbId,
    #[validate(custom(function = "title_present"))]
    pub title: String,
    #[validate(
        custom(function = "genre_present"),
        length(max = GENRE_MAX_CHARS, message = "Genre must be at most 20 characters")
    )]
    pub genre: String,
    #[validate(range(
        min = DURATION_MIN,
        max = DURATION_MAX,
        message = "Duration must be between 70 and 360 minutes"
    ))]
    pub duration: i32,
}

fn title_present(value: &str) -> Result<(), ValidationError> {
    required(value, "Title must not be empty")
}

fn genre_present(value: &str) -> Result<(), ValidationError> {
    required(value, "Genre is required")
}

fn required(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some(Cow::Borrowed(message));
        return Err(err);
    }
    Ok(())
}

impl Movie {
    /// Check every field constraint, collecting all violations.
    pub fn validate_fields(&self) -> Result<(), CoreError> {
        self.validate().map_err(CoreError::from)
    }

    /// Overwrite all mutable fields from `update`, keeping the id.
    pub fn apply_update(&mut self, update: UpdateMovie) {
        self.title = update.title;
        self.genre = update.genre;
        self.duration = update.duration;
    }

    /// Consume `self` and return a copy with `update` applied.
    pub fn with_update(mut self, update: UpdateMovie) -> Self {
        self.apply_update(update);
        self
    }
}

/// DTO for creating a new movie. The id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateMovie {
    pub title: String,
    pub genre: String,
    pub duration: i32,
}

/// DTO for replacing a movie, and the shape partial updates are applied to.
///
/// `Default` is the value a JSON Patch `remove` falls back to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateMovie {
    pub title: String,
    pub genre: String,
    pub duration: i32,
}

/// Response DTO. `timestamp` records when the movie was read, not stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadMovie {
    pub title: String,
    pub genre: String,
    pub duration: i32,
    #[serde(rename = "timestamp")]
    pub queried_at: Timestamp,
}

impl ReadMovie {
    pub fn captured_at(movie: Movie, queried_at: Timestamp) -> Self {
        Self {
            title: movie.title,
            genre: movie.genre,
            duration: movie.duration,
            queried_at,
        }
    }
}

impl From<CreateMovie> for Movie {
    fn from(input: CreateMovie) -> Self {
        Self {
            id: UNASSIGNED_ID,
            title: input.title,
            genre: input.genre,
            duration: input.duration,
        }
    }
}

impl From<&Movie> for UpdateMovie {
    fn from(movie: &Movie) -> Self {
        Self {
            title: movie.title.clone(),
            genre: movie.genre.clone(),
            duration: movie.duration,
        }
    }
}

impl From<Movie> for ReadMovie {
    fn from(movie: Movie) -> Self {
        Self::captured_at(movie, Utc::now())
    }
}
