use actix_multipart::form::bytes::Bytes;
use actix_multipart::form::text::Text;
use actix_multipart::form::{MultipartForm, MultipartFormConfig};
use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};
use crate::mapping::{movie_list, MovieDetails};
use crate::model::{check_length, NewMovie, STORYLINE_MAX_LEN, TITLE_MAX_LEN};
use crate::poster::{PosterError, PosterPolicy};
use crate::store::{GenreStore, MovieStore};

/// Form fields of a movie write. The poster is mandatory on create and
/// optional on update.
#[derive(MultipartForm)]
pub struct MovieForm {
    pub title: Text<String>,
    pub year: Text<i32>,
    pub storyline: Text<String>,
    pub rate: Text<f64>,
    #[multipart(rename = "genreId")]
    pub genre_id: Text<i32>,
    pub poster: Option<Bytes>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreQuery {
    pub genre_id: i32,
}

/// Posters are buffered in memory. The limit leaves room above the poster
/// ceiling so that an oversized poster still reaches [`PosterPolicy::check`].
pub fn multipart_config(policy: &PosterPolicy) -> MultipartFormConfig {
    let memory_limit = policy.max_size().saturating_mul(2);
    MultipartFormConfig::default()
        .memory_limit(memory_limit)
        .total_limit(memory_limit.saturating_add(1024 * 1024))
}

/// A browser submitting an empty file input still sends the part, with no
/// file name and no data.
fn supplied(poster: Option<Bytes>) -> Option<Bytes> {
    poster.filter(|p| !(p.data.is_empty() && p.file_name.as_deref().unwrap_or("").is_empty()))
}

fn check_poster(policy: &PosterPolicy, poster: &Bytes) -> std::result::Result<(), PosterError> {
    policy.check(poster.file_name.as_deref().unwrap_or(""), poster.data.len())
}

fn check_fields(form: &MovieForm) -> Result<()> {
    check_length("title", &form.title.0, TITLE_MAX_LEN)?;
    check_length("storyline", &form.storyline.0, STORYLINE_MAX_LEN)?;
    if !form.rate.0.is_finite() {
        return Err(ApiError::InvalidRate);
    }
    Ok(())
}

async fn ensure_genre(genres: web::Data<dyn GenreStore>, genre_id: i32) -> Result<()> {
    let valid = web::block(move || genres.is_valid_genre(genre_id)).await??;
    if !valid {
        return Err(ApiError::InvalidGenre(genre_id));
    }
    Ok(())
}

#[get("/movies")]
pub async fn get_all(movies: web::Data<dyn MovieStore>) -> Result<HttpResponse> {
    let rows = web::block(move || movies.get_all()).await??;
    Ok(HttpResponse::Ok().json(movie_list(rows)))
}

#[get("/movies/GetByGenreId")]
pub async fn get_by_genre_id(
    movies: web::Data<dyn MovieStore>,
    query: web::Query<GenreQuery>,
) -> Result<HttpResponse> {
    let genre_id = query.genre_id;
    let rows = web::block(move || movies.get_by_genre(genre_id)).await??;
    Ok(HttpResponse::Ok().json(movie_list(rows)))
}

#[get("/movies/{id}")]
pub async fn get_by_id(
    movies: web::Data<dyn MovieStore>,
    id: web::Path<i32>,
) -> Result<HttpResponse> {
    let id = id.into_inner();
    let row = web::block(move || movies.get_by_id(id))
        .await??
        .ok_or(ApiError::MovieNotFound(id))?;
    Ok(HttpResponse::Ok().json(MovieDetails::from(row)))
}

#[post("/movies")]
pub async fn create(
    movies: web::Data<dyn MovieStore>,
    genres: web::Data<dyn GenreStore>,
    policy: web::Data<PosterPolicy>,
    MultipartForm(form): MultipartForm<MovieForm>,
) -> Result<HttpResponse> {
    check_fields(&form)?;
    let poster = supplied(form.poster).ok_or(PosterError::Missing)?;
    check_poster(&policy, &poster)?;
    ensure_genre(genres, form.genre_id.0).await?;

    let new_movie = NewMovie {
        title: form.title.into_inner(),
        year: form.year.into_inner(),
        rate: form.rate.into_inner(),
        storyline: form.storyline.into_inner(),
        poster: poster.data.to_vec(),
        genre_id: form.genre_id.into_inner(),
    };
    let (movie, genre) = web::block(move || movies.add(new_movie)).await??;
    log::info!("Created movie {} ({})", movie.id, movie.title);
    Ok(HttpResponse::Ok().json(MovieDetails::new(movie, &genre)))
}

#[put("/movies/{id}")]
pub async fn update(
    movies: web::Data<dyn MovieStore>,
    genres: web::Data<dyn GenreStore>,
    policy: web::Data<PosterPolicy>,
    id: web::Path<i32>,
    MultipartForm(form): MultipartForm<MovieForm>,
) -> Result<HttpResponse> {
    let id = id.into_inner();
    let store = movies.clone();
    let (mut movie, _) = web::block(move || store.get_by_id(id))
        .await??
        .ok_or(ApiError::MovieNotFound(id))?;

    check_fields(&form)?;
    ensure_genre(genres, form.genre_id.0).await?;

    if let Some(poster) = supplied(form.poster) {
        check_poster(&policy, &poster)?;
        movie.poster = poster.data.to_vec();
    }
    movie.title = form.title.into_inner();
    movie.genre_id = form.genre_id.into_inner();
    movie.year = form.year.into_inner();
    movie.storyline = form.storyline.into_inner();
    movie.rate = form.rate.into_inner();

    let (movie, genre) = web::block(move || movies.update(&movie))
        .await??
        .ok_or(ApiError::MovieNotFound(id))?;
    log::info!("Updated movie {} ({})", movie.id, movie.title);
    Ok(HttpResponse::Ok().json(MovieDetails::new(movie, &genre)))
}

#[delete("/movies/{id}")]
pub async fn delete(
    movies: web::Data<dyn MovieStore>,
    id: web::Path<i32>,
) -> Result<HttpResponse> {
    let id = id.into_inner();
    let (row, deleted) = web::block(move || -> crate::store::StoreResult<_> {
        let row = movies.get_by_id(id)?;
        let deleted = match row {
            Some(_) => movies.delete(id)?,
            None => false,
        };
        Ok((row, deleted))
    })
    .await??;

    match row {
        Some(row) if deleted => {
            log::info!("Deleted movie {} ({})", row.0.id, row.0.title);
            Ok(HttpResponse::Ok().json(MovieDetails::from(row)))
        }
        _ => Err(ApiError::MovieNotFound(id)),
    }
}
