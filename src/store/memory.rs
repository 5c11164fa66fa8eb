use std::sync::{Mutex, MutexGuard};

use crate::model::{Genre, Movie, NewMovie};
use crate::store::{GenreStore, MovieRow, MovieStore, StoreResult};

#[derive(Default)]
struct Tables {
    genres: Vec<Genre>,
    movies: Vec<Movie>,
    next_genre_id: i32,
    next_movie_id: i32,
}

impl Tables {
    fn row(&self, movie: &Movie) -> Option<MovieRow> {
        self.genres
            .iter()
            .find(|g| g.id == movie.genre_id)
            .map(|genre| (movie.clone(), genre.clone()))
    }

    fn rows<'a>(&self, movies: impl Iterator<Item = &'a Movie>) -> Vec<MovieRow> {
        let mut rows: Vec<MovieRow> = movies.filter_map(|m| self.row(m)).collect();
        rows.sort_by(|(a, _), (b, _)| b.rate.total_cmp(&a.rate));
        rows
    }
}

/// Store keeping both tables in memory, with the same ordering and join
/// semantics as the database.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().expect("memory store lock poisoned")
    }

    pub fn movie_count(&self) -> usize {
        self.tables().movies.len()
    }
}

impl MovieStore for MemoryStore {
    fn get_all(&self) -> StoreResult<Vec<MovieRow>> {
        let tables = self.tables();
        Ok(tables.rows(tables.movies.iter()))
    }

    fn get_by_genre(&self, genre_id: i32) -> StoreResult<Vec<MovieRow>> {
        let tables = self.tables();
        Ok(tables.rows(tables.movies.iter().filter(|m| m.genre_id == genre_id)))
    }

    fn get_by_id(&self, id: i32) -> StoreResult<Option<MovieRow>> {
        let tables = self.tables();
        Ok(tables
            .movies
            .iter()
            .find(|m| m.id == id)
            .and_then(|m| tables.row(m)))
    }

    fn add(&self, movie: NewMovie) -> StoreResult<MovieRow> {
        let mut tables = self.tables();
        tables.next_movie_id += 1;
        let movie = Movie {
            id: tables.next_movie_id,
            title: movie.title,
            year: movie.year,
            rate: movie.rate,
            storyline: movie.storyline,
            poster: movie.poster,
            genre_id: movie.genre_id,
        };
        tables.movies.push(movie.clone());
        let row = tables
            .row(&movie)
            .expect("movie added with an unknown genre");
        Ok(row)
    }

    fn update(&self, movie: &Movie) -> StoreResult<Option<MovieRow>> {
        let mut tables = self.tables();
        match tables.movies.iter_mut().find(|m| m.id == movie.id) {
            Some(stored) => *stored = movie.clone(),
            None => return Ok(None),
        }
        Ok(tables.row(movie))
    }

    fn delete(&self, id: i32) -> StoreResult<bool> {
        let mut tables = self.tables();
        let before = tables.movies.len();
        tables.movies.retain(|m| m.id != id);
        Ok(tables.movies.len() < before)
    }
}

impl GenreStore for MemoryStore {
    fn get_all(&self) -> StoreResult<Vec<Genre>> {
        let mut genres = self.tables().genres.clone();
        genres.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(genres)
    }

    fn create(&self, name: &str) -> StoreResult<Genre> {
        let mut tables = self.tables();
        tables.next_genre_id += 1;
        let genre = Genre {
            id: tables.next_genre_id,
            name: name.to_string(),
        };
        tables.genres.push(genre.clone());
        Ok(genre)
    }

    fn is_valid_genre(&self, id: i32) -> StoreResult<bool> {
        Ok(self.tables().genres.iter().any(|g| g.id == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_movie(title: &str, rate: f64, genre_id: i32) -> NewMovie {
        NewMovie {
            title: title.to_string(),
            year: 1999,
            rate,
            storyline: "storyline".to_string(),
            poster: vec![1, 2, 3],
            genre_id,
        }
    }

    #[test]
    fn genres_are_listed_by_name() {
        let store = MemoryStore::default();
        store.create("Drama").unwrap();
        store.create("Action").unwrap();
        store.create("Comedy").unwrap();

        let names: Vec<String> = GenreStore::get_all(&store)
            .unwrap()
            .into_iter()
            .map(|g| g.name)
            .collect();
        assert_eq!(names, ["Action", "Comedy", "Drama"]);
    }

    #[test]
    fn movies_are_listed_by_descending_rate() {
        let store = MemoryStore::default();
        let drama = store.create("Drama").unwrap();
        store.add(new_movie("low", 3.0, drama.id)).unwrap();
        store.add(new_movie("high", 9.1, drama.id)).unwrap();
        store.add(new_movie("mid", 6.5, drama.id)).unwrap();

        let titles: Vec<String> = MovieStore::get_all(&store)
            .unwrap()
            .into_iter()
            .map(|(m, _)| m.title)
            .collect();
        assert_eq!(titles, ["high", "mid", "low"]);
    }

    #[test]
    fn delete_reports_missing_rows() {
        let store = MemoryStore::default();
        let drama = store.create("Drama").unwrap();
        let (movie, _) = store.add(new_movie("gone", 5.0, drama.id)).unwrap();

        assert!(store.delete(movie.id).unwrap());
        assert!(!store.delete(movie.id).unwrap());
        assert_eq!(store.get_by_id(movie.id).unwrap(), None);
    }
}
