use indicatif::ProgressBar;

use crate::{
    error::SyncError,
    sync::{BATCH_SIZE, MembershipReader, PAGE_SIZE, PlaylistApi},
    types::{CandidateSet, TrackId},
    warning,
};

/// What a run would add to a playlist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    /// Tracks found in the playlist before the run.
    pub existing: usize,
    /// Candidates not yet in the playlist, in candidate order.
    pub delta: Vec<TrackId>,
}

impl SyncPlan {
    pub fn batches(&self, batch_size: usize) -> std::slice::Chunks<'_, TrackId> {
        self.delta.chunks(batch_size.max(1))
    }
}

/// Outcome of a run.
///
/// `added` counts every track of every batch that was sent, whether or not
/// the service accepted it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub added: usize,
}

/// Adds the candidates missing from a playlist in bounded batches.
pub struct Synchronizer<'a, A: PlaylistApi> {
    api: &'a A,
    page_size: u32,
    batch_size: usize,
    progress: ProgressBar,
}

impl<'a, A: PlaylistApi> Synchronizer<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self {
            api,
            page_size: PAGE_SIZE,
            batch_size: BATCH_SIZE,
            progress: ProgressBar::hidden(),
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Reads the playlist and computes which candidates are missing.
    ///
    /// # Returns
    ///
    /// A [`SyncPlan`] whose delta keeps the order of `candidates`.
    ///
    /// # Errors
    ///
    /// [`SyncError::MembershipRead`] when any playlist page fails.
    pub async fn plan(
        &self,
        playlist_id: &str,
        candidates: &CandidateSet,
    ) -> Result<SyncPlan, SyncError> {
        let membership = MembershipReader::new(self.api)
            .with_page_size(self.page_size)
            .with_progress(self.progress.clone())
            .fetch_all_members(playlist_id)
            .await?;

        let delta = candidates
            .iter()
            .filter(|id| !membership.contains(id))
            .cloned()
            .collect();

        Ok(SyncPlan {
            existing: membership.len(),
            delta,
        })
    }

    /// Adds every candidate the playlist does not contain yet.
    ///
    /// # Arguments
    ///
    /// * `playlist_id` - Target playlist
    /// * `candidates` - Identifiers that should end up in the playlist
    ///
    /// # Returns
    ///
    /// A [`SyncSummary`] counting the tracks of every batch that was sent.
    /// Running it again with the same candidates adds nothing.
    ///
    /// # Errors
    ///
    /// Only a failed playlist read is returned as an error, before anything
    /// is added. A failed batch is reported as a warning and the remaining
    /// batches are still sent.
    pub async fn sync(
        &self,
        playlist_id: &str,
        candidates: &CandidateSet,
    ) -> Result<SyncSummary, SyncError> {
        let plan = self.plan(playlist_id, candidates).await?;
        Ok(self.apply(playlist_id, &plan).await)
    }

    /// Sends the delta of `plan` batch by batch.
    pub async fn apply(&self, playlist_id: &str, plan: &SyncPlan) -> SyncSummary {
        let mut summary = SyncSummary::default();
        let batches = plan.delta.len().div_ceil(self.batch_size);

        for (i, batch) in plan.batches(self.batch_size).enumerate() {
            self.progress.set_message(format!(
                "Adding batch {current}/{batches} ({size} tracks) to playlist {playlist_id}...",
                current = i + 1,
                size = batch.len()
            ));

            if let Err(e) = self.api.add_tracks(playlist_id, batch).await {
                self.progress.suspend(|| {
                    warning!(
                        "Failed to add batch {}/{} ({} tracks) to playlist {}: {}",
                        i + 1,
                        batches,
                        batch.len(),
                        playlist_id,
                        e
                    )
                });
            }

            summary.added += batch.len();
        }

        summary
    }
}
