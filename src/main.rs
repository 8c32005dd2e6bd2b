//! Snapshelf - A terminal photo browser for Unsplash
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use snapshelf::api::PhotoSource;
use snapshelf::{
    Config, Database, Downloader, FavoritesStore, FeedFetcher, FeedState, FetchOutcome,
    ImageRecord, RecentSearches, UnsplashClient,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (RUST_LOG=debug for verbose output)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Parse CLI arguments
    match parse_args(&std::env::args().collect::<Vec<_>>())? {
        Command::Home { more } => home_cli(more).await,
        Command::Search { query, more } => search_cli(&query, more).await,
        Command::Recent { clear } => recent_cli(clear),
        Command::Favorites => list_favorites(),
        Command::Favorite { id } => favorite_cli(&id).await,
        Command::Unfavorite { id } => unfavorite_cli(&id),
        Command::Show { id } => show_cli(&id).await,
        Command::Download { id, dir } => download_cli(&id, dir).await,
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Version => {
            print_version();
            Ok(())
        }
    }
}

/// CLI commands
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Home { more: u32 },
    Search { query: String, more: u32 },
    Recent { clear: bool },
    Favorites,
    Favorite { id: String },
    Unfavorite { id: String },
    Show { id: String },
    Download { id: String, dir: Option<PathBuf> },
    Help,
    Version,
}

fn parse_args(args: &[String]) -> Result<Command> {
    if args.len() == 1 {
        return Ok(Command::Home { more: 0 });
    }

    let photo_id = || -> Result<String> {
        args.get(2)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Missing photo id"))
    };

    match args[1].as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help),
        "-v" | "--version" | "version" => Ok(Command::Version),

        "home" | "feed" => Ok(Command::Home {
            more: parse_more(args)?,
        }),
        "--more" | "-m" => Ok(Command::Home {
            more: parse_more(args)?,
        }),

        "search" | "s" => {
            let (words, more) = split_more(&args[2..])?;
            let query = words.join(" ");
            if query.trim().is_empty() {
                anyhow::bail!("Missing search query");
            }
            Ok(Command::Search { query, more })
        }

        "recent" => Ok(Command::Recent {
            clear: args.get(2).is_some_and(|a| a == "clear"),
        }),

        "favorites" | "favs" => Ok(Command::Favorites),
        "fav" | "favorite" => Ok(Command::Favorite { id: photo_id()? }),
        "unfav" | "unfavorite" => Ok(Command::Unfavorite { id: photo_id()? }),
        "show" => Ok(Command::Show { id: photo_id()? }),
        "download" | "dl" => Ok(Command::Download {
            id: photo_id()?,
            dir: args.get(3).map(PathBuf::from),
        }),

        other => Err(anyhow::anyhow!(
            "Unknown command: {other}\nRun 'snapshelf --help' for usage"
        )),
    }
}

/// Parse `--more N` / `-m N` (extra pages of results)
fn parse_more(args: &[String]) -> Result<u32> {
    match args.iter().position(|a| a == "--more" || a == "-m") {
        Some(i) => args
            .get(i + 1)
            .context("--more needs a number")?
            .parse()
            .context("--more needs a number"),
        None => Ok(0),
    }
}

/// Pull `--more N` / `-m N` out of `args`, returning the remaining words
fn split_more(args: &[String]) -> Result<(Vec<&str>, u32)> {
    let more = parse_more(args)?;
    let mut words = Vec::with_capacity(args.len());
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--more" || arg == "-m" {
            iter.next();
        } else {
            words.push(arg.as_str());
        }
    }
    Ok((words, more))
}

fn print_help() {
    let config_path = snapshelf::Config::default_path()
        .map_or_else(|_| "Unknown".to_string(), |p| p.display().to_string());

    println!(
        r#"{}
📷 Snapshelf - A terminal photo browser for Unsplash

USAGE:
    snapshelf                          Show the latest photos
    snapshelf [COMMAND]

COMMANDS:
    home [--more <n>]                  Latest photos
    search <query> [--more <n>]        Search photos (saved to recent searches)
      Examples:
        snapshelf search mountains
        snapshelf search "red cars" --more 2
    recent [clear]                     Show or clear recent searches
    favorites                          List favorites
    fav <id>                           Add a photo to favorites
    unfav <id>                         Remove a photo from favorites
    show <id>                          Photo details
    download <id> [dir]                Save the full-size photo

OPTIONS:
    -m, --more <n>                     Load <n> more rounds of pages
    -h, --help                         Show this help message
    -v, --version                      Show version information

ENVIRONMENT:
    UNSPLASH_ACCESS_KEY                Overrides access_key from the config

CONFIG:
    {}
"#,
        snapshelf::LOGO,
        config_path
    );
}

fn print_version() {
    println!("snapshelf {}", snapshelf::VERSION);
}

fn open_store() -> Result<Arc<Database>> {
    Ok(Arc::new(Database::open()?))
}

async fn home_cli(more: u32) -> Result<()> {
    feed_cli(None, more).await
}

async fn search_cli(query: &str, more: u32) -> Result<()> {
    let config = Config::load()?;
    let mut recent = RecentSearches::open(open_store()?, config.recent_search_limit);
    recent.add(query);
    feed_cli(Some(query), more).await
}

async fn feed_cli(query: Option<&str>, more: u32) -> Result<()> {
    let config = Config::load()?;
    let favorites = FavoritesStore::open(open_store()?);
    let feed = FeedFetcher::new(
        UnsplashClient::from_config(&config)?,
        config.page_size,
        config.fan_out,
    );

    let mut failed_pages = 0;
    for round in 0..=more {
        if let FetchOutcome::Completed(report) = feed.fetch(query, round == 0).await {
            failed_pages += report.failures.len();
        }
    }

    let state = feed.snapshot();
    print_feed(&state, &favorites);

    if state.images.is_empty() && failed_pages > 0 {
        eprintln!("\nCould not load photos (RUST_LOG=warn shows details)");
    }

    Ok(())
}

fn print_feed(state: &FeedState, favorites: &FavoritesStore<Arc<Database>>) {
    match &state.query {
        Some(query) => println!("\n🔎 \"{}\" · {} photos", query, state.images.len()),
        None => println!("\n📷 Latest photos · {}", state.images.len()),
    }
    println!("{}", "─".repeat(60));

    for image in &state.images {
        print_row(image, favorites.contains(&image.id));
    }
}

fn print_row(image: &ImageRecord, favorite: bool) {
    let marker = if favorite { "♥" } else { " " };
    println!(
        "{} {:<12} {}  · {}",
        marker,
        image.id,
        preview(image.title(), 44),
        image.user.name
    );
}

fn preview(text: &str, max_chars: usize) -> String {
    let text = text.replace('\n', " ");
    if text.chars().count() <= max_chars {
        text
    } else {
        let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

fn recent_cli(clear: bool) -> Result<()> {
    let config = Config::load()?;
    let mut recent = RecentSearches::open(open_store()?, config.recent_search_limit);

    if clear {
        recent.clear();
        println!("✓ Recent searches cleared");
        return Ok(());
    }

    if recent.terms().is_empty() {
        println!("No recent searches.");
        return Ok(());
    }

    println!("Recent searches:\n");
    for term in recent.terms() {
        println!("  {term}");
    }
    Ok(())
}

fn list_favorites() -> Result<()> {
    let favorites = FavoritesStore::open(open_store()?);

    if favorites.is_empty() {
        println!("No favorites yet!");
        println!("\nAdd one with:");
        println!("  snapshelf fav <photo-id>");
        return Ok(());
    }

    println!("♥ Favorites · {}", favorites.len());
    println!("{}", "─".repeat(60));
    for image in favorites.favorites() {
        print_row(&image, true);
    }
    Ok(())
}

/// Find a photo locally in favorites, otherwise ask the API
async fn lookup(id: &str, favorites: &FavoritesStore<Arc<Database>>) -> Result<ImageRecord> {
    if let Some(image) = favorites.get(id) {
        return Ok(image);
    }
    let config = Config::load()?;
    let client = UnsplashClient::from_config(&config)?;
    client
        .photo(id)
        .await
        .with_context(|| format!("Failed to fetch photo {id}"))
}

async fn favorite_cli(id: &str) -> Result<()> {
    let favorites = FavoritesStore::open(open_store()?);
    let image = lookup(id, &favorites).await?;
    let title = image.title().to_string();

    if favorites.add(image) {
        println!("♥ Added \"{}\" to favorites", preview(&title, 50));
    } else {
        println!("Already a favorite");
    }
    Ok(())
}

fn unfavorite_cli(id: &str) -> Result<()> {
    let favorites = FavoritesStore::open(open_store()?);

    if favorites.remove_by_id(id) {
        println!("✓ Removed {} from favorites", id);
    } else {
        println!("{} is not a favorite", id);
    }
    Ok(())
}

async fn show_cli(id: &str) -> Result<()> {
    let favorites = FavoritesStore::open(open_store()?);
    let image = lookup(id, &favorites).await?;
    let heart = if favorites.contains(id) { "♥ Favorite" } else { "♡ Not a favorite" };

    println!("\n{}", image.title());
    println!("By {}", image.user.name);
    if let Some(portfolio) = &image.user.portfolio_url {
        println!("Profile: {}", portfolio);
    }
    if let Some(bio) = &image.user.bio {
        println!("{}", preview(bio, 80));
    }
    println!("{}", "─".repeat(60));
    println!("📅 Uploaded on: {}", image.uploaded_on());
    println!("📏 Size: {} pixels", image.dimensions());
    println!("♥ Likes: {}", image.likes);
    if let Some(camera) = image.camera() {
        println!("📸 Camera: {}", camera);
    }
    if let Some(place) = image.place() {
        println!("📍 Location: {}", place);
    }
    println!("🔗 {}", image.urls.regular);
    println!("\n{}", heart);
    Ok(())
}

async fn download_cli(id: &str, dir: Option<PathBuf>) -> Result<()> {
    let config = Config::load()?;
    let favorites = FavoritesStore::open(open_store()?);
    let image = lookup(id, &favorites).await?;

    let dir = match dir {
        Some(dir) => dir,
        None => config.download_dir()?,
    };

    let downloader = Downloader::new(Duration::from_secs(config.request_timeout_secs));
    println!("⬇ Downloading {}...", image.id);
    let path = downloader.download(&image, &dir).await?;
    println!("✓ Saved to {}", path.display());
    Ok(())
}
