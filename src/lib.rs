//! # Snapshelf 📷
//!
//! A terminal photo browser for Unsplash with local favorites.
//!
//! ## Overview
//!
//! Snapshelf pages through the latest photos or search results, keeps the
//! photos you favorite in a local database, remembers your recent searches,
//! and saves full-size images to disk for sharing.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                           CLI                               │
//! │      Parses commands, prints feeds, favorites, details      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!          ┌───────────────────┼───────────────────┐
//!          ▼                   ▼                   ▼
//! ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────┐
//! │      Feed       │ │    Favorites    │ │     Recent      │
//! │                 │ │                 │ │                 │
//! │ • Fan-out pages │ │ • Add / remove  │ │ • Newest first  │
//! │ • Join + dedupe │ │ • Write-through │ │ • Capped        │
//! │ • Watch state   │ │ • Watch state   │ │ • No duplicates │
//! └─────────────────┘ └─────────────────┘ └─────────────────┘
//!          │                   │                   │
//!          ▼                   └─────────┬─────────┘
//! ┌─────────────────┐                    ▼
//! │       API       │           ┌─────────────────┐
//! │                 │           │  KeyValueStore  │
//! │ • PhotoSource   │           │                 │
//! │ • Unsplash      │           │ • SQLite        │
//! │ • FetchError    │           │ • In-memory     │
//! └─────────────────┘           └─────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`api`] — Photo API seam and the Unsplash client
//! - [`feed`] — Paginated fetch-and-merge feed
//! - [`favorites`] — Persisted favorites
//! - [`recent`] — Recent search terms
//! - [`store`] — Key-value persistence trait and in-memory store
//! - [`db`] — `SQLite` key-value store
//! - [`download`] — Save images for sharing
//! - [`config`] — Configuration management
//! - [`models`] — Photo model
//!
//! ## Example
//!
//! ```no_run
//! use snapshelf::{Config, FeedFetcher, UnsplashClient};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::load()?;
//! let feed = FeedFetcher::new(
//!     UnsplashClient::from_config(&config)?,
//!     config.page_size,
//!     config.fan_out,
//! );
//! feed.fetch(Some("lighthouse"), true).await;
//! for image in &feed.snapshot().images {
//!     println!("{} by {}", image.title(), image.user.name);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::future_not_send)]

pub mod api;
pub mod config;
pub mod db;
pub mod download;
pub mod favorites;
pub mod feed;
pub mod models;
pub mod paths;
pub mod recent;
pub mod store;

// Re-export main types for convenience
pub use api::{FetchError, PageRequest, PhotoSource, UnsplashClient};
pub use config::Config;
pub use db::Database;
pub use download::Downloader;
pub use favorites::FavoritesStore;
pub use feed::{FeedFetcher, FeedState, FetchOutcome, FetchReport};
pub use models::ImageRecord;
pub use recent::RecentSearches;
pub use store::{KeyValueStore, MemoryStore};

/// ASCII logo for the application
pub const LOGO: &str = r"
  ┌─┐┌┐┌┌─┐┌─┐┌─┐┬ ┬┌─┐┬  ┌─┐
  └─┐│││├─┤├─┘└─┐├─┤├┤ │  ├┤
  └─┘┘└┘┴ ┴┴  └─┘┴ ┴└─┘┴─┘└
";

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
