//! Access layer over the catalog tables.
//!
//! Handlers only talk to these traits. [`crate::db::DbStore`] implements them
//! on top of PostgreSQL; tests swap in an in-memory store.
//! Every method is blocking and is expected to run inside `web::block`.

use crate::model::{Genre, Movie, NewMovie};

#[cfg(test)]
pub mod memory;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("Couldn't get db connection from pool: {0}")]
    Pool(#[from] r2d2::Error),
}

/// A movie together with the genre it references.
pub type MovieRow = (Movie, Genre);

pub trait MovieStore: Send + Sync {
    /// All movies, highest rate first.
    fn get_all(&self) -> StoreResult<Vec<MovieRow>>;

    /// Movies of one genre, highest rate first.
    fn get_by_genre(&self, genre_id: i32) -> StoreResult<Vec<MovieRow>>;

    fn get_by_id(&self, id: i32) -> StoreResult<Option<MovieRow>>;

    fn add(&self, movie: NewMovie) -> StoreResult<MovieRow>;

    /// Writes every field of `movie` over the row with the same id.
    /// Returns `None` when that row no longer exists.
    fn update(&self, movie: &Movie) -> StoreResult<Option<MovieRow>>;

    /// Returns `false` when there was nothing to delete.
    fn delete(&self, id: i32) -> StoreResult<bool>;
}

pub trait GenreStore: Send + Sync {
    /// All genres ordered by name.
    fn get_all(&self) -> StoreResult<Vec<Genre>>;

    fn create(&self, name: &str) -> StoreResult<Genre>;

    fn is_valid_genre(&self, id: i32) -> StoreResult<bool>;
}
