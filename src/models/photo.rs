//! Photo model (mirrors the Unsplash photo object)

use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// Shown when a photo has neither a description nor alt text
pub const NO_DESCRIPTION: &str = "No Description Available";

/// A photo as returned by the API and as stored in favorites.
///
/// Field names follow the wire format, so the same serde derive is used for
/// decoding API responses and for the favorites blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Source photo ID (identity for dedupe and favorites)
    pub id: String,
    /// Author-provided description
    pub description: Option<String>,
    /// Generated alt text
    pub alt_description: Option<String>,
    /// Upload time, ISO-8601, kept verbatim
    pub created_at: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Like count at fetch time
    pub likes: u32,
    /// Photographer
    pub user: Author,
    /// Camera metadata
    pub exif: Option<Exif>,
    /// Where the photo was taken
    pub location: Option<Location>,
    /// Rendition URLs
    pub urls: ImageUrls,
}

/// Photographer details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Display name
    pub name: String,
    /// Profile bio
    pub bio: Option<String>,
    /// Portfolio link
    pub portfolio_url: Option<String>,
}

/// Rendition URLs (both required)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrls {
    /// Full-size display rendition
    pub regular: String,
    /// Grid thumbnail
    pub small: String,
}

/// Camera metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exif {
    /// Camera make
    pub make: Option<String>,
    /// Camera model
    pub model: Option<String>,
    /// Exposure time (e.g., "1/125")
    pub exposure_time: Option<String>,
    /// Aperture (e.g., "2.8")
    pub aperture: Option<String>,
    /// Focal length (e.g., "50.0")
    pub focal_length: Option<String>,
    /// ISO speed
    pub iso: Option<u32>,
}

/// Photo location
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Place name
    pub name: Option<String>,
    /// City
    pub city: Option<String>,
    /// Country
    pub country: Option<String>,
}

impl ImageRecord {
    /// Title for display: description, then alt text, then a placeholder
    pub fn title(&self) -> &str {
        self.description
            .as_deref()
            .or(self.alt_description.as_deref())
            .unwrap_or(NO_DESCRIPTION)
    }

    /// Upload date for display (e.g., "Feb 17, 2025")
    pub fn uploaded_on(&self) -> String {
        DateTime::parse_from_rfc3339(&self.created_at)
            .map_or_else(|_| "Unknown Date".to_string(), |dt| dt.format("%b %d, %Y").to_string())
    }

    /// Pixel size for display (e.g., "6000 × 4000")
    pub fn dimensions(&self) -> String {
        format!("{} × {}", self.width, self.height)
    }

    /// Camera summary, if the photo carries any EXIF make/model
    pub fn camera(&self) -> Option<String> {
        let exif = self.exif.as_ref()?;
        match (exif.make.as_deref(), exif.model.as_deref()) {
            (Some(make), Some(model)) if model.starts_with(make) => Some(model.to_string()),
            (Some(make), Some(model)) => Some(format!("{make} {model}")),
            (Some(only), None) | (None, Some(only)) => Some(only.to_string()),
            (None, None) => None,
        }
    }

    /// "City, Country" style location line
    pub fn place(&self) -> Option<String> {
        let location = self.location.as_ref()?;
        if let Some(name) = &location.name {
            return Some(name.clone());
        }
        let parts: Vec<&str> = [location.city.as_deref(), location.country.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

#[cfg(test)]
pub(crate) fn fixture(id: &str) -> ImageRecord {
    ImageRecord {
        id: id.to_string(),
        description: None,
        alt_description: None,
        created_at: "2025-02-17T10:30:00Z".to_string(),
        width: 4000,
        height: 3000,
        likes: 0,
        user: Author {
            name: "Test Photographer".to_string(),
            bio: None,
            portfolio_url: None,
        },
        exif: None,
        location: None,
        urls: ImageUrls {
            regular: format!("https://images.example.com/{id}?w=1080"),
            small: format!("https://images.example.com/{id}?w=400"),
        },
    }
}
