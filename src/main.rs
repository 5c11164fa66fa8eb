use std::sync::Arc;

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use diesel::r2d2::ConnectionManager;
use diesel::PgConnection;
use dotenvy::dotenv;
use env_logger::Env;
use r2d2::Pool;

use crate::db::DbStore;
use crate::poster::PosterPolicy;
use crate::settings::{ServerSettings, Settings};
use crate::store::{GenreStore, MovieStore};

mod db;
mod error;
mod genres;
mod mapping;
mod model;
mod movies;
mod poster;
mod schema;
mod settings;
mod store;
#[cfg(test)]
mod test_util;

pub type DbPool = Pool<ConnectionManager<PgConnection>>;

/// Registers the shared state and the `/api` routes.
pub fn configure(
    movie_store: web::Data<dyn MovieStore>,
    genre_store: web::Data<dyn GenreStore>,
    policy: PosterPolicy,
) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(movies::multipart_config(&policy))
            .app_data(movie_store)
            .app_data(genre_store)
            .app_data(web::Data::new(policy))
            .service(
                web::scope("/api")
                    .service(genres::get_all)
                    .service(genres::create)
                    // before `/movies/{id}`, which would swallow it
                    .service(movies::get_by_genre_id)
                    .service(movies::get_all)
                    .service(movies::get_by_id)
                    .service(movies::create)
                    .service(movies::update)
                    .service(movies::delete),
            );
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let settings = Settings::load().context("Failed to load configuration")?;

    let manager = ConnectionManager::<PgConnection>::new(&settings.database.url);
    let pool = Pool::builder()
        .max_size(settings.database.pool_size)
        .build(manager)
        .context("Failed to create pool")?;

    let store = Arc::new(DbStore::new(pool));
    let movie_store: Arc<dyn MovieStore> = store.clone();
    let genre_store: Arc<dyn GenreStore> = store;
    let movie_store = web::Data::from(movie_store);
    let genre_store = web::Data::from(genre_store);
    let policy = PosterPolicy::from(&settings.poster);

    let ServerSettings { host, port } = settings.server;
    log::info!("Listening on {}:{}", host, port);

    HttpServer::new(move || {
        App::new().wrap(Logger::default()).configure(configure(
            movie_store.clone(),
            genre_store.clone(),
            policy.clone(),
        ))
    })
    .bind((host.as_str(), port))?
    .run()
    .await?;

    Ok(())
}
