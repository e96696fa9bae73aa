//! Image URL construction.
//!
//! The backend stores image paths relative to its upload directory. Public
//! URLs are `<backend base>/uploads/<path>`; paths that are already absolute
//! are passed through as-is.

use crate::models::{Image, Place, Season};

/// Directory segment the backend serves uploaded files from.
pub const UPLOADS_SEGMENT: &str = "uploads";

const ABSOLUTE_PREFIXES: &[&str] = &["http://", "https://", "//", "data:"];

/// Whether `path` already points at a full URL.
pub fn is_absolute(path: &str) -> bool {
    let lower = path.trim_start().to_ascii_lowercase();
    ABSOLUTE_PREFIXES.iter().any(|p| lower.starts_with(p))
}

/// Build the public URL for an image path.
///
/// ```
/// use tourism_core::image_url::resolve_image_url;
/// assert_eq!(
///     resolve_image_url("http://api.local/", "/uploads/a.jpg"),
///     "http://api.local/uploads/a.jpg",
/// );
/// assert_eq!(
///     resolve_image_url("http://api.local", "https://cdn.example/a.jpg"),
///     "https://cdn.example/a.jpg",
/// );
/// ```
pub fn resolve_image_url(base_url: &str, path: &str) -> String {
    let path = path.trim();
    if is_absolute(path) {
        return path.to_string();
    }

    let relative = path.trim_start_matches('/');
    let relative = relative
        .strip_prefix(UPLOADS_SEGMENT)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(relative);

    format!(
        "{}/{UPLOADS_SEGMENT}/{relative}",
        base_url.trim_end_matches('/')
    )
}

/// Fill in absolute image URLs on a fetched record.
///
/// Implementations must be idempotent: resolving twice yields the same URLs.
pub trait ResolveImages {
    fn resolve_images(&mut self, base_url: &str);
}

impl ResolveImages for Image {
    fn resolve_images(&mut self, base_url: &str) {
        let source = self.image_url.as_deref().unwrap_or(&self.image_path);
        self.image_url = Some(resolve_image_url(base_url, source));
    }
}

impl ResolveImages for Place {
    fn resolve_images(&mut self, base_url: &str) {
        self.images.resolve_images(base_url);
        self.seasons.resolve_images(base_url);
    }
}

impl ResolveImages for Season {
    fn resolve_images(&mut self, base_url: &str) {
        self.places.resolve_images(base_url);
    }
}

impl<T: ResolveImages> ResolveImages for Vec<T> {
    fn resolve_images(&mut self, base_url: &str) {
        for item in self.iter_mut() {
            item.resolve_images(base_url);
        }
    }
}

impl<T: ResolveImages> ResolveImages for Option<T> {
    fn resolve_images(&mut self, base_url: &str) {
        if let Some(inner) = self {
            inner.resolve_images(base_url);
        }
    }
}
