//! # Playlist synchronization
//!
//! Reconciles a set of candidate track identifiers into a remote playlist so
//! that every candidate ends up in it exactly once.
//!
//! ```text
//! CandidateSet ──┐
//!                ├─> delta = candidates − membership ─> batches of 100 ─> add calls
//! MembershipReader (paged reads) ──┘
//! ```
//!
//! A run is additive only and re-reads the playlist every time, so running it
//! again with the same candidates adds nothing. Reading the playlist is all
//! or nothing; a failed add call is logged and the run moves on to the next
//! batch.
//!
//! The remote side is reached through [`PlaylistApi`], implemented for the
//! Spotify Web API by [`crate::spotify::SpotifyClient`].

use async_trait::async_trait;

use crate::{
    error::ApiError,
    types::{TrackId, TracksPage},
};

mod reader;
mod synchronizer;

pub use reader::MembershipReader;
pub use synchronizer::{SyncPlan, SyncSummary, Synchronizer};

/// Number of playlist entries requested per page.
pub const PAGE_SIZE: u32 = 100;

/// Maximum number of tracks sent in one add call.
pub const BATCH_SIZE: usize = 100;

/// Operations a remote playlist service offers to the synchronizer.
#[async_trait]
pub trait PlaylistApi: Send + Sync {
    /// Reads `limit` entries starting at `offset`, along with the playlist's
    /// current total.
    ///
    /// # Arguments
    ///
    /// * `playlist_id` - Target playlist
    /// * `offset` - Index of the first entry to return
    /// * `limit` - Maximum number of entries in the page
    ///
    /// # Returns
    ///
    /// The identifiers on the page (entries without one are left out) and
    /// the total the service reports for the whole playlist.
    async fn tracks_page(
        &self,
        playlist_id: &str,
        offset: u32,
        limit: u32,
    ) -> Result<TracksPage, ApiError>;

    /// Appends tracks to the end of the playlist in one call.
    ///
    /// Callers keep `tracks` within [`BATCH_SIZE`].
    async fn add_tracks(&self, playlist_id: &str, tracks: &[TrackId]) -> Result<(), ApiError>;
}
