use std::fmt::Display;
use std::sync::Arc;

use actix_web::http::header;
use actix_web::{test, web};

use crate::poster::PosterPolicy;
use crate::store::memory::MemoryStore;
use crate::store::{GenreStore, MovieStore};

const BOUNDARY: &str = "------------------------movies-api-test";

/// App wiring over an in-memory store with the default poster policy.
pub fn wiring(store: &Arc<MemoryStore>) -> impl FnOnce(&mut web::ServiceConfig) {
    let movies: Arc<dyn MovieStore> = store.clone();
    let genres: Arc<dyn GenreStore> = store.clone();
    crate::configure(
        web::Data::from(movies),
        web::Data::from(genres),
        PosterPolicy::default(),
    )
}

/// Hand-built `multipart/form-data` body.
pub struct FormBody {
    body: Vec<u8>,
}

impl FormBody {
    pub fn new() -> Self {
        Self { body: Vec::new() }
    }

    pub fn text(mut self, name: &str, value: impl Display) -> Self {
        let part = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\
             Content-Type: text/plain\r\n\r\n{value}\r\n"
        );
        self.body.extend_from_slice(part.as_bytes());
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, data: &[u8]) -> Self {
        let head = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        );
        self.body.extend_from_slice(head.as_bytes());
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn post(self, uri: &str) -> test::TestRequest {
        self.build(test::TestRequest::post(), uri)
    }

    pub fn put(self, uri: &str) -> test::TestRequest {
        self.build(test::TestRequest::put(), uri)
    }

    fn build(mut self, req: test::TestRequest, uri: &str) -> test::TestRequest {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        req.uri(uri)
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(self.body)
    }
}
