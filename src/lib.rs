//! Playlist import and chat contribution tooling for Spotify
//!
//! trackmerge scans text files and chat histories for music links, adds the
//! referenced Spotify tracks to a playlist without creating duplicates, and
//! reports which chat members shared how many links.
//!
//! # Modules
//!
//! - `api` - HTTP API endpoints for the local callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `contributions` - Chat line parsing and contribution reports
//! - `error` - Error types of the sync pipeline and the API client
//! - `links` - Link patterns and track identifier extraction
//! - `management` - Token cache and report files
//! - `server` - Local HTTP server for OAuth callbacks
//! - `sources` - Reading link files and chat histories
//! - `spotify` - Spotify Web API client implementation
//! - `sync` - Paged membership reads and batched playlist additions
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use trackmerge::links;
//!
//! let ids = links::extract_identifiers("https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC");
//! assert_eq!(ids.len(), 1);
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod contributions;
pub mod error;
pub mod links;
pub mod management;
pub mod server;
pub mod sources;
pub mod spotify;
pub mod sync;
pub mod types;
pub mod utils;

/// Prints an informational message with a blue bullet point.
///
/// Accepts the same arguments as `println!`.
///
/// ```
/// info!("Scanning {} for track ids", path.display());
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates with exit code 1, so it can be used in any expression position
/// that needs to diverge.
///
/// ```
/// let ids = match sources::identifiers_from_file(&path).await {
///     Ok(ids) => ids,
///     Err(e) => error!("{}", e),
/// };
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// For recoverable problems, e.g. a playlist batch the API refused.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
