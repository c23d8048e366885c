use indicatif::ProgressBar;

use crate::{
    error::SyncError,
    sync::{PAGE_SIZE, PlaylistApi},
    types::PlaylistMembership,
};

/// Reads the complete membership of a playlist page by page.
pub struct MembershipReader<'a, A: PlaylistApi> {
    api: &'a A,
    page_size: u32,
    progress: ProgressBar,
}

impl<'a, A: PlaylistApi> MembershipReader<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self {
            api,
            page_size: PAGE_SIZE,
            progress: ProgressBar::hidden(),
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Fetches pages from offset zero until the offset reaches the total the
    /// service reported on the latest page.
    ///
    /// # Arguments
    ///
    /// * `playlist_id` - Playlist whose members are read
    ///
    /// # Returns
    ///
    /// A fresh [`PlaylistMembership`] snapshot with the last reported total
    /// and the number of pages read.
    ///
    /// # Errors
    ///
    /// Any failed page aborts the read with [`SyncError::MembershipRead`],
    /// carrying the offset of that page. Pages are not retried.
    pub async fn fetch_all_members(
        &self,
        playlist_id: &str,
    ) -> Result<PlaylistMembership, SyncError> {
        let mut membership = PlaylistMembership::default();
        let mut offset: u32 = 0;

        loop {
            self.progress.set_message(format!(
                "Reading playlist {playlist_id} (offset {offset}, {read} tracks so far)...",
                read = membership.len()
            ));

            let page = self
                .api
                .tracks_page(playlist_id, offset, self.page_size)
                .await
                .map_err(|source| SyncError::MembershipRead {
                    playlist_id: playlist_id.to_string(),
                    offset,
                    source,
                })?;

            membership.ids.extend(page.track_ids);
            membership.total = page.total;
            membership.pages += 1;

            offset = offset.saturating_add(self.page_size);
            if offset >= membership.total {
                break;
            }
        }

        Ok(membership)
    }
}
