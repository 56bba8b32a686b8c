//! Utility functions for file system validation and URL manipulation.

use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};
use url::Url;

/// Ensure a directory exists and is writable.
///
/// This function creates the directory if it doesn't exist, then performs
/// a write test by creating and immediately deleting a probe file.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be created
/// - The directory is not writable (permission denied, read-only filesystem, etc.)
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(path).await {
        return Err(Box::new(e));
    }
    // Try a small sync write using std fs (simpler error surface)
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

/// Derive a local filename from an image URL: the last non-empty path segment.
///
/// Two distinct URLs can map to the same filename; downloads are not
/// deduplicated, so the last writer wins.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(image_filename("https://cdn.example.com/img/photo.jpg"), "photo.jpg");
/// assert_eq!(image_filename("https://cdn.example.com/img/photo.jpg?w=640"), "photo.jpg");
/// ```
pub fn image_filename(image_url: &str) -> String {
    if let Ok(parsed) = Url::parse(image_url) {
        if let Some(segments) = parsed.path_segments() {
            if let Some(last) = segments.filter(|s| !s.is_empty()).next_back() {
                return last.to_string();
            }
        }
    }
    // Not a parseable URL; fall back to everything after the last slash.
    image_url
        .rsplit('/')
        .next()
        .unwrap_or(image_url)
        .to_string()
}
