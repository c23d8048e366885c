//! # Spotify integration
//!
//! - [`client`] - [`SpotifyClient`], the Web API client behind
//!   [`crate::sync::PlaylistApi`]: paged playlist reads and batched track
//!   additions, with short `429 Too Many Requests` waits handled in place.
//! - [`auth`] - OAuth 2.0 authorization code flow with PKCE, used by the
//!   `auth` command to obtain the token the client is built with.
//!
//! ## API Coverage
//!
//! - `GET /playlists/{playlist_id}/tracks` - playlist members, 100 per page
//! - `POST /playlists/{playlist_id}/tracks` - add up to 100 tracks
//! - `POST /api/token` - code exchange and token refresh

pub mod auth;
pub mod client;

pub use client::SpotifyClient;
