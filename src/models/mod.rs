//! Data models for Snapshelf

mod photo;

pub use photo::{Author, Exif, ImageRecord, ImageUrls, Location, NO_DESCRIPTION};

#[cfg(test)]
pub(crate) use photo::fixture;
