use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::Client;
use serde_json::Value;
use tokio::{sync::Mutex, time::Instant};

use crate::{
    config,
    server::{bind_api_server, start_api_server},
    types::{PkceToken, Token},
    utils, warning,
};

/// How long to wait for the browser to come back to the callback server.
const CALLBACK_TIMEOUT: Duration = Duration::from_secs(120);

/// Runs the authorization code flow with PKCE and returns the obtained token.
///
/// A local server receives the redirect from Spotify, the user's browser is
/// pointed at the authorization page. The verifier is placed in
/// `shared_state` before the browser is opened so the callback can finish the
/// code exchange.
pub async fn authorize(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Result<Token, String> {
    let client_id = config::spotify_client_id().map_err(|e| e.to_string())?;
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier,
            token: None,
        });
    }

    let listener = bind_api_server().await?;
    let server_state = Arc::clone(&shared_state);
    let server = tokio::spawn(async move { start_api_server(listener, server_state).await });

    let auth_url = utils::build_authorize_url(
        &config::spotify_apiauth_url(),
        &client_id,
        &config::spotify_redirect_uri(),
        &code_challenge,
        &config::spotify_scope(),
    );

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let token = wait_for_token(&shared_state, CALLBACK_TIMEOUT).await;
    server.abort();

    token.ok_or_else(|| "Authentication failed or timed out.".to_string())
}

/// Polls the shared state until the callback stored a token or `max_wait`
/// elapsed.
async fn wait_for_token(
    shared_state: &Arc<Mutex<Option<PkceToken>>>,
    max_wait: Duration,
) -> Option<Token> {
    let start = Instant::now();

    while start.elapsed() < max_wait {
        {
            let lock = shared_state.lock().await;
            if let Some(token) = lock.as_ref().and_then(|p| p.token.clone()) {
                return Some(token);
            }
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
    }

    None
}

/// Exchanges the authorization code from the callback for a token.
pub async fn exchange_code_pkce(code: &str, verifier: &str) -> Result<Token, String> {
    let client_id = config::spotify_client_id().map_err(|e| e.to_string())?;
    let redirect_uri = config::spotify_redirect_uri();

    let json = post_token_form(&[
        ("grant_type", "authorization_code"),
        ("client_id", client_id.as_str()),
        ("code", code),
        ("code_verifier", verifier),
        ("redirect_uri", redirect_uri.as_str()),
    ])
    .await?;

    token_from_json(&json, None)
}

/// Trades a refresh token for a new access token. Spotify may or may not
/// rotate the refresh token; the old one is kept when it does not.
pub async fn refresh_token(refresh_token: &str) -> Result<Token, String> {
    let client_id = config::spotify_client_id().map_err(|e| e.to_string())?;

    let json = post_token_form(&[
        ("grant_type", "refresh_token"),
        ("refresh_token", refresh_token),
        ("client_id", client_id.as_str()),
    ])
    .await?;

    token_from_json(&json, Some(refresh_token))
}

async fn post_token_form(form: &[(&str, &str)]) -> Result<Value, String> {
    let res = Client::new()
        .post(config::spotify_apitoken_url())
        .form(form)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let status = res.status();
    let json: Value = res.json().await.map_err(|e| e.to_string())?;

    if !status.is_success() {
        return Err(format!(
            "Token endpoint answered {}: {}",
            status,
            json["error_description"]
                .as_str()
                .or(json["error"].as_str())
                .unwrap_or("unknown error")
        ));
    }

    Ok(json)
}

/// Builds a [`Token`] from a token endpoint response.
pub fn token_from_json(json: &Value, previous_refresh: Option<&str>) -> Result<Token, String> {
    let access_token = json["access_token"]
        .as_str()
        .ok_or("Token response has no access_token")?
        .to_string();

    let refresh_token = json["refresh_token"]
        .as_str()
        .or(previous_refresh)
        .unwrap_or_default()
        .to_string();

    Ok(Token {
        access_token,
        refresh_token,
        scope: json["scope"].as_str().unwrap_or_default().to_string(),
        expires_in: json["expires_in"].as_u64().unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    })
}
