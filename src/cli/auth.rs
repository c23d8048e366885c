use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{error, management::TokenManager, spotify, success, types::PkceToken};

pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) {
    let token = match spotify::auth::authorize(shared_state).await {
        Ok(token) => token,
        Err(e) => error!("{}", e),
    };

    if let Err(e) = TokenManager::new(token).persist().await {
        error!("Failed to save token to cache: {}", e);
    }

    success!("Authentication successful!");
}

/// Access token for API calls: `SPOTIFY_ACCESS_TOKEN` when set, the cached
/// token from `trackmerge auth` otherwise.
pub(crate) async fn access_token() -> Result<String, String> {
    if let Some(token) = crate::config::spotify_access_token() {
        return Ok(token);
    }

    let mut token_mgr = TokenManager::load().await.map_err(|e| {
        format!(
            "Failed to load token. Please run trackmerge auth\n Error: {}",
            e
        )
    })?;

    token_mgr.get_valid_token().await
}
