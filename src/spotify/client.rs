use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tokio::time::sleep;

use crate::{
    config::ClientConfig,
    error::ApiError,
    sync::PlaylistApi,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, PlaylistTracksResponse, TrackId,
        TracksPage,
    },
    warning,
};

/// Longest `Retry-After` the client is willing to wait out.
const MAX_RETRY_AFTER_SECS: u64 = 120;
const MAX_RATE_LIMIT_RETRIES: u32 = 3;

/// Only the track ids and the total are needed from a playlist page.
const PLAYLIST_TRACK_FIELDS: &str = "items(track(id)),total";

/// Spotify Web API client authorized with one bearer token.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    config: ClientConfig,
}

impl SpotifyClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.config.api_url
    }

    fn playlist_tracks_url(&self, playlist_id: &str) -> String {
        format!(
            "{uri}/playlists/{id}/tracks",
            uri = self.config.api_url,
            id = playlist_id
        )
    }

    /// Sends a request, waiting out short rate limits.
    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let mut retries = 0;

        loop {
            let attempt = request.try_clone().ok_or(ApiError::Unreplayable)?;

            let response = attempt
                .bearer_auth(&self.config.access_token)
                .send()
                .await?;

            if response.status() == StatusCode::TOO_MANY_REQUESTS {
                let retry_after = retry_after_secs(&response);
                if retry_after > MAX_RETRY_AFTER_SECS || retries >= MAX_RATE_LIMIT_RETRIES {
                    return Err(ApiError::RateLimited { retry_after });
                }

                warning!("Rate limited by Spotify, retrying in {} seconds.", retry_after);
                sleep(Duration::from_secs(retry_after)).await;
                retries += 1;
                continue;
            }

            if !response.status().is_success() {
                let status = response.status().as_u16();
                let body = response.text().await.unwrap_or_default();
                return Err(ApiError::Status { status, body });
            }

            return Ok(response);
        }
    }
}

fn retry_after_secs(response: &Response) -> u64 {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(0)
}

#[async_trait]
impl PlaylistApi for SpotifyClient {
    async fn tracks_page(
        &self,
        playlist_id: &str,
        offset: u32,
        limit: u32,
    ) -> Result<TracksPage, ApiError> {
        let request = self.http.get(self.playlist_tracks_url(playlist_id)).query(&[
            ("fields", PLAYLIST_TRACK_FIELDS.to_string()),
            ("offset", offset.to_string()),
            ("limit", limit.to_string()),
        ]);

        let json = self.send(request).await?.json::<PlaylistTracksResponse>().await?;

        // local files and removed tracks come back without an id
        let track_ids = json
            .items
            .into_iter()
            .filter_map(|item| item.track.and_then(|t| t.id))
            .filter_map(|id| TrackId::parse(&id))
            .collect();

        Ok(TracksPage {
            track_ids,
            total: json.total,
        })
    }

    async fn add_tracks(&self, playlist_id: &str, tracks: &[TrackId]) -> Result<(), ApiError> {
        let body = AddTrackToPlaylistRequest {
            uris: tracks.iter().map(TrackId::to_uri).collect(),
        };

        let request = self.http.post(self.playlist_tracks_url(playlist_id)).json(&body);
        self.send(request)
            .await?
            .json::<AddTrackToPlaylistResponse>()
            .await?;

        Ok(())
    }
}
