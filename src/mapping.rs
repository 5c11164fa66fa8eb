//! Response shapes for genres and movies.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Serialize, Serializer};

use crate::model::{Genre, Movie};

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenreDetails {
    pub id: i32,
    pub name: String,
}

impl From<Genre> for GenreDetails {
    fn from(genre: Genre) -> Self {
        Self {
            id: genre.id,
            name: genre.name,
        }
    }
}

/// A movie flattened with the name of its genre.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetails {
    pub id: i32,
    pub title: String,
    pub year: i32,
    pub rate: f64,
    pub storyline: String,
    #[serde(serialize_with = "as_base64")]
    pub poster: Vec<u8>,
    pub genre_id: i32,
    pub genre_name: String,
}

impl MovieDetails {
    pub fn new(movie: Movie, genre: &Genre) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            year: movie.year,
            rate: movie.rate,
            storyline: movie.storyline,
            poster: movie.poster,
            genre_id: movie.genre_id,
            genre_name: genre.name.clone(),
        }
    }
}

impl From<(Movie, Genre)> for MovieDetails {
    fn from((movie, genre): (Movie, Genre)) -> Self {
        Self::new(movie, &genre)
    }
}

pub fn genre_list(genres: Vec<Genre>) -> Vec<GenreDetails> {
    genres.into_iter().map(GenreDetails::from).collect()
}

pub fn movie_list(rows: Vec<(Movie, Genre)>) -> Vec<MovieDetails> {
    rows.into_iter().map(MovieDetails::from).collect()
}

fn as_base64<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD.encode(bytes))
}
