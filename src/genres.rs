use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};
use crate::mapping::{genre_list, GenreDetails};
use crate::model::{check_length, GENRE_NAME_MAX_LEN};
use crate::store::GenreStore;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGenre {
    pub name: String,
}

#[get("/genres")]
pub async fn get_all(genres: web::Data<dyn GenreStore>) -> Result<HttpResponse> {
    let rows = web::block(move || genres.get_all()).await??;
    Ok(HttpResponse::Ok().json(genre_list(rows)))
}

#[post("/genres")]
pub async fn create(
    genres: web::Data<dyn GenreStore>,
    new_genre: web::Json<CreateGenre>,
) -> Result<HttpResponse> {
    let name = new_genre.into_inner().name.trim().to_string();
    if name.is_empty() {
        return Err(ApiError::InvalidGenreName);
    }
    check_length("name", &name, GENRE_NAME_MAX_LEN)?;

    let genre = web::block(move || genres.create(&name)).await??;
    log::info!("Created genre {} ({})", genre.id, genre.name);
    Ok(HttpResponse::Ok().json(GenreDetails::from(genre)))
}
