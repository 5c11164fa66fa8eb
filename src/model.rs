use diesel::{AsChangeset, Insertable, Queryable, Selectable};

use crate::error::{ApiError, Result};
use crate::schema::*;

// Column widths of the catalog migration.
pub const GENRE_NAME_MAX_LEN: usize = 100;
pub const TITLE_MAX_LEN: usize = 250;
pub const STORYLINE_MAX_LEN: usize = 2500;

/// Lengths are counted in characters, as VARCHAR does.
pub fn check_length(field: &'static str, value: &str, max: usize) -> Result<()> {
    if value.chars().count() > max {
        return Err(ApiError::TooLong { field, max });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = genres)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = genres)]
pub struct NewGenre<'a> {
    pub name: &'a str,
}

/// A stored movie. The primary key is left out of the changeset, so an
/// update writes every other column.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, AsChangeset)]
#[diesel(table_name = movies)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub year: i32,
    pub rate: f64,
    pub storyline: String,
    pub poster: Vec<u8>,
    pub genre_id: i32,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = movies)]
pub struct NewMovie {
    pub title: String,
    pub year: i32,
    pub rate: f64,
    pub storyline: String,
    pub poster: Vec<u8>,
    pub genre_id: i32,
}
