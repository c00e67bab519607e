use std::collections::BTreeMap;

use async_trait::async_trait;
use filmes_core::pagination::Page;
use filmes_core::types::DbId;
use tokio::sync::RwLock;

use super::MovieStore;
use crate::models::movie::Movie;

/// In-process [`MovieStore`].
///
/// Ids start at 1 and are never reused, mirroring a `BIGSERIAL` column.
/// Used when no database is configured and by the HTTP test-suite.
#[derive(Debug, Default)]
pub struct MemoryMovieStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    last_id: DbId,
    movies: BTreeMap<DbId, Movie>,
}

impl MemoryMovieStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MovieStore for MemoryMovieStore {
    async fn insert(&self, movie: &Movie) -> Result<Movie, sqlx::Error> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let stored = Movie {
            id: inner.last_id,
            ..movie.clone()
        };
        inner.movies.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn list(&self, page: Page) -> Result<Vec<Movie>, sqlx::Error> {
        let inner = self.inner.read().await;
        Ok(page.slice(inner.movies.values().cloned()).collect())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Movie>, sqlx::Error> {
        Ok(self.inner.read().await.movies.get(&id).cloned())
    }

    async fn update(&self, movie: &Movie) -> Result<bool, sqlx::Error> {
        let mut inner = self.inner.write().await;
        match inner.movies.get_mut(&movie.id) {
            Some(slot) => {
                *slot = movie.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        Ok(self.inner.write().await.movies.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::movie::UNASSIGNED_ID;

    fn movie(title: &str) -> Movie {
        Movie {
            id: UNASSIGNED_ID,
            title: title.to_string(),
            genre: "Drama".to_string(),
            duration: 120,
        }
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let store = MemoryMovieStore::new();
        let a = store.insert(&movie("A")).await.unwrap();
        let b = store.insert(&movie("B")).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(b.title, "B");
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = MemoryMovieStore::new();
        let a = store.insert(&movie("A")).await.unwrap();
        assert!(store.delete(a.id).await.unwrap());
        let b = store.insert(&movie("B")).await.unwrap();
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn list_windows_in_id_order() {
        let store = MemoryMovieStore::new();
        for title in ["A", "B", "C", "D"] {
            store.insert(&movie(title)).await.unwrap();
        }
        let titles: Vec<_> = store
            .list(Page::new(Some(1), Some(2)))
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.title)
            .collect();
        assert_eq!(titles, vec!["B", "C"]);
        assert!(store.list(Page::new(Some(4), None)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_rows() {
        let store = MemoryMovieStore::new();
        let ghost = Movie { id: 99, ..movie("X") };
        assert!(!store.update(&ghost).await.unwrap());
        assert!(!store.delete(99).await.unwrap());
        assert!(store.find_by_id(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_overwrites_fields() {
        let store = MemoryMovieStore::new();
        let mut stored = store.insert(&movie("A")).await.unwrap();
        stored.duration = 200;
        assert!(store.update(&stored).await.unwrap());
        assert_eq!(
            store.find_by_id(stored.id).await.unwrap().unwrap().duration,
            200
        );
    }
}
