//! Upload rules for movie posters.
//!
//! The check only looks at the file name and the size. The extension is
//! trusted as sent; the bytes are never inspected.

use std::path::Path;

use crate::settings::PosterSettings;

pub const DEFAULT_ALLOWED_EXTENSIONS: [&str; 2] = [".jpg", ".png"];
/// 6 MiB, inclusive.
pub const MAX_POSTER_SIZE: usize = 6_291_456;

const MEGABYTE: usize = 1024 * 1024;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum PosterError {
    #[error("poster is required")]
    Missing,
    #[error("only {allowed} extension allowed")]
    UnsupportedExtension { allowed: String },
    #[error("Max allowed size for Poster {limit}")]
    TooLarge { limit: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PosterPolicy {
    allowed_extensions: Vec<String>,
    max_size: usize,
}

impl Default for PosterPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_EXTENSIONS, MAX_POSTER_SIZE)
    }
}

impl From<&PosterSettings> for PosterPolicy {
    fn from(settings: &PosterSettings) -> Self {
        Self::new(&settings.allowed_extensions, settings.max_size)
    }
}

impl PosterPolicy {
    /// Extensions are matched case-insensitively; a missing leading dot is
    /// added.
    pub fn new<I, S>(allowed_extensions: I, max_size: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed_extensions = allowed_extensions
            .into_iter()
            .map(|ext| {
                let ext = ext.as_ref().trim().to_lowercase();
                if ext.starts_with('.') {
                    ext
                } else {
                    format!(".{ext}")
                }
            })
            .collect();
        Self {
            allowed_extensions,
            max_size,
        }
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Checks extension first, then size.
    pub fn check(&self, file_name: &str, size: usize) -> Result<(), PosterError> {
        let allowed = extension_of(file_name)
            .map(|ext| self.allowed_extensions.contains(&ext))
            .unwrap_or(false);
        if !allowed {
            return Err(PosterError::UnsupportedExtension {
                allowed: join_extensions(&self.allowed_extensions),
            });
        }
        if size > self.max_size {
            return Err(PosterError::TooLarge {
                limit: describe_size(self.max_size),
            });
        }
        Ok(())
    }
}

fn extension_of(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
}

// ".jpg and .png", ".jpg, .png and .webp"
fn join_extensions(extensions: &[String]) -> String {
    match extensions {
        [] => "no".to_string(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

fn describe_size(bytes: usize) -> String {
    if bytes >= MEGABYTE && bytes % MEGABYTE == 0 {
        format!("{} Megabyte", bytes / MEGABYTE)
    } else {
        format!("{bytes} bytes")
    }
}
