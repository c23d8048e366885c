//! Configuration management for trackmerge.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory:
//! - Linux: `~/.local/share/trackmerge/.env`
//! - macOS: `~/Library/Application Support/trackmerge/.env`
//! - Windows: `%LOCALAPPDATA%/trackmerge/.env`
//!
//! Variables already present in the process environment take precedence
//! over the file. Everything except the client id has a usable default.

use std::{env, path::PathBuf};

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:3000/callback";
pub const DEFAULT_SCOPE: &str =
    "playlist-modify-public playlist-modify-private playlist-read-private";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:3000";

/// Directory holding the `.env` file, the token cache and other state.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("trackmerge");
    path
}

/// Loads `.env` from the data directory, creating the directory on first
/// run. A missing file is fine; a malformed one is reported.
pub async fn load_env() -> Result<(), String> {
    let dir = data_dir();
    async_fs::create_dir_all(&dir)
        .await
        .map_err(|e| e.to_string())?;

    let path = dir.join(".env");
    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))?;
    }
    Ok(())
}

fn var_or(name: &str, default: &str) -> String {
    optional(name).unwrap_or_else(|| default.to_string())
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Address the local OAuth callback server binds to.
pub fn server_addr() -> String {
    var_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

pub fn spotify_client_id() -> Result<String, ConfigError> {
    optional("SPOTIFY_API_AUTH_CLIENT_ID").ok_or(ConfigError::Missing("SPOTIFY_API_AUTH_CLIENT_ID"))
}

/// Must match a redirect URI registered for the Spotify application.
pub fn spotify_redirect_uri() -> String {
    var_or("SPOTIFY_API_REDIRECT_URI", DEFAULT_REDIRECT_URI)
}

pub fn spotify_scope() -> String {
    var_or("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE)
}

pub fn spotify_apiauth_url() -> String {
    var_or("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL)
}

pub fn spotify_apiurl() -> String {
    var_or("SPOTIFY_API_URL", DEFAULT_API_URL)
}

pub fn spotify_apitoken_url() -> String {
    var_or("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL)
}

/// Access token set directly in the environment; takes precedence over the
/// cached token when present.
pub fn spotify_access_token() -> Option<String> {
    optional("SPOTIFY_ACCESS_TOKEN")
}

/// Playlist used when none is given on the command line.
pub fn default_playlist_id() -> Option<String> {
    optional("SPOTIFY_PLAYLIST_ID")
}

/// Input file used by `import file` when no path is given.
pub fn default_data_file() -> Option<PathBuf> {
    optional("DATA_FILE").map(PathBuf::from)
}

/// Settings a [`crate::spotify::SpotifyClient`] is built from.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub access_token: String,
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        }
    }

    /// API url from the environment combined with the given token.
    pub fn from_env(access_token: impl Into<String>) -> Self {
        Self::new(spotify_apiurl(), access_token)
    }
}
