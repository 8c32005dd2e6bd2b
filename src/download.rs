//! Save a photo's full-size rendition to disk for sharing.

use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::models::ImageRecord;

/// Downloads image bytes (no API credentials needed, the rendition URLs are public)
#[derive(Debug, Clone)]
pub struct Downloader {
    client: reqwest::Client,
}

impl Downloader {
    /// Create a downloader with a request timeout
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self { client }
    }

    /// Download `image.urls.regular` into `dir`, returning the written path.
    pub async fn download(&self, image: &ImageRecord, dir: &Path) -> Result<PathBuf> {
        tracing::debug!("Downloading image: {}", image.urls.regular);

        let response = self
            .client
            .get(&image.urls.regular)
            .send()
            .await
            .context("Failed to download image")?;

        if !response.status().is_success() {
            bail!("Image download failed: HTTP {}", response.status());
        }

        let bytes = response.bytes().await.context("Failed to read image body")?;
        save_image(&bytes, dir, &image.id)
    }
}

/// Write image bytes as `{id}.{ext}` in `dir`, where the extension comes from
/// the sniffed format. Bytes that are not a known image format are rejected.
pub fn save_image(bytes: &[u8], dir: &Path, id: &str) -> Result<PathBuf> {
    let format = image::guess_format(bytes).context("Downloaded data is not an image")?;
    let extension = format.extensions_str().first().copied().unwrap_or("img");

    // IDs are URL-safe, but keep path separators out of file names regardless
    let stem: String = id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();

    std::fs::create_dir_all(dir).context("Failed to create download directory")?;
    let path = dir.join(format!("{stem}.{extension}"));
    std::fs::write(&path, bytes).context("Failed to write image file")?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;
    use tempfile::tempdir;

    fn png_bytes() -> Vec<u8> {
        let image = RgbImage::from_pixel(2, 2, Rgb([200, 40, 40]));
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    #[test]
    fn test_save_png() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("downloads");
        let bytes = png_bytes();

        let path = save_image(&bytes, &target, "Dwu85P9SOIk").unwrap();

        assert_eq!(path, target.join("Dwu85P9SOIk.png"));
        assert_eq!(std::fs::read(&path).unwrap(), bytes);
    }

    #[test]
    fn test_rejects_non_image() {
        let dir = tempdir().unwrap();
        let result = save_image(b"<html>rate limited</html>", dir.path(), "x");
        assert!(result.is_err());
        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    }

    #[test]
    fn test_id_is_sanitized() {
        let dir = tempdir().unwrap();
        let path = save_image(&png_bytes(), dir.path(), "../evil").unwrap();
        assert_eq!(path, dir.path().join("___evil.png"));
    }
}
