use diesel::dsl::exists;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::{
    ExpressionMethods, OptionalExtension, PgConnection, QueryDsl, RunQueryDsl, SelectableHelper,
};

use crate::model::{Genre, Movie, NewGenre, NewMovie};
use crate::schema::{genres, movies};
use crate::store::{GenreStore, MovieRow, MovieStore, StoreResult};
use crate::DbPool;

type DbConnection = PooledConnection<ConnectionManager<PgConnection>>;

/// Store backed by the PostgreSQL pool. Each call checks out its own
/// connection and gives it back when done.
pub struct DbStore {
    pool: DbPool,
}

impl DbStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> StoreResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

fn genre_of(conn: &mut PgConnection, genre_id: i32) -> StoreResult<Genre> {
    let genre = genres::table
        .find(genre_id)
        .select(Genre::as_select())
        .first(conn)?;
    Ok(genre)
}

impl MovieStore for DbStore {
    fn get_all(&self) -> StoreResult<Vec<MovieRow>> {
        let mut conn = self.conn()?;
        let rows = movies::table
            .inner_join(genres::table)
            .order(movies::rate.desc())
            .select((Movie::as_select(), Genre::as_select()))
            .load::<MovieRow>(&mut conn)?;
        Ok(rows)
    }

    fn get_by_genre(&self, genre_id: i32) -> StoreResult<Vec<MovieRow>> {
        let mut conn = self.conn()?;
        let rows = movies::table
            .inner_join(genres::table)
            .filter(movies::genre_id.eq(genre_id))
            .order(movies::rate.desc())
            .select((Movie::as_select(), Genre::as_select()))
            .load::<MovieRow>(&mut conn)?;
        Ok(rows)
    }

    fn get_by_id(&self, id: i32) -> StoreResult<Option<MovieRow>> {
        let mut conn = self.conn()?;
        let row = movies::table
            .inner_join(genres::table)
            .filter(movies::id.eq(id))
            .select((Movie::as_select(), Genre::as_select()))
            .first::<MovieRow>(&mut conn)
            .optional()?;
        Ok(row)
    }

    fn add(&self, movie: NewMovie) -> StoreResult<MovieRow> {
        let mut conn = self.conn()?;
        let movie = diesel::insert_into(movies::table)
            .values(movie)
            .returning(Movie::as_returning())
            .get_result(&mut conn)?;
        let genre = genre_of(&mut conn, movie.genre_id)?;
        Ok((movie, genre))
    }

    fn update(&self, movie: &Movie) -> StoreResult<Option<MovieRow>> {
        let mut conn = self.conn()?;
        let updated = diesel::update(movies::table.find(movie.id))
            .set(movie)
            .returning(Movie::as_returning())
            .get_result(&mut conn)
            .optional()?;
        match updated {
            Some(movie) => {
                let genre = genre_of(&mut conn, movie.genre_id)?;
                Ok(Some((movie, genre)))
            }
            None => Ok(None),
        }
    }

    fn delete(&self, id: i32) -> StoreResult<bool> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(movies::table.find(id)).execute(&mut conn)?;
        Ok(deleted > 0)
    }
}

impl GenreStore for DbStore {
    fn get_all(&self) -> StoreResult<Vec<Genre>> {
        let mut conn = self.conn()?;
        let rows = genres::table
            .order(genres::name.asc())
            .select(Genre::as_select())
            .load(&mut conn)?;
        Ok(rows)
    }

    fn create(&self, name: &str) -> StoreResult<Genre> {
        let mut conn = self.conn()?;
        let genre = diesel::insert_into(genres::table)
            .values(NewGenre { name })
            .returning(Genre::as_returning())
            .get_result(&mut conn)?;
        Ok(genre)
    }

    fn is_valid_genre(&self, id: i32) -> StoreResult<bool> {
        let mut conn = self.conn()?;
        let found = diesel::select(exists(genres::table.find(id))).get_result(&mut conn)?;
        Ok(found)
    }
}
