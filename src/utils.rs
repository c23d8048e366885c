use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use reqwest::Url;
use sha2::{Digest, Sha256};

use crate::types::TRACK_ID_LEN;

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

pub fn build_authorize_url(
    auth_url: &str,
    client_id: &str,
    redirect_uri: &str,
    code_challenge: &str,
    scope: &str,
) -> String {
    let params = [
        ("client_id", client_id),
        ("response_type", "code"),
        ("redirect_uri", redirect_uri),
        ("code_challenge", code_challenge),
        ("code_challenge_method", "S256"),
        ("scope", scope),
    ];

    match Url::parse_with_params(auth_url, &params) {
        Ok(url) => url.to_string(),
        // keep the raw values visible so a manual copy still works
        Err(_) => format!(
            "{auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&code_challenge={code_challenge}&code_challenge_method=S256&scope={scope}"
        ),
    }
}

/// Checks the shape of a Spotify playlist id; used as a clap value parser.
pub fn parse_playlist_id(value: &str) -> Result<String, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("Playlist ID is required".to_string());
    }

    if value.len() != TRACK_ID_LEN || !value.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(format!(
            "Invalid Spotify playlist ID format. It should be {} characters long and contain only letters and numbers.",
            TRACK_ID_LEN
        ));
    }

    Ok(value.to_string())
}

/// Accepts a bare playlist id as well as an `open.spotify.com/playlist/<id>`
/// link or a `spotify:playlist:<id>` URI.
pub fn parse_playlist_ref(value: &str) -> Result<String, String> {
    let value = value.trim();
    let id = value
        .rsplit_once("playlist/")
        .or_else(|| value.rsplit_once("playlist:"))
        .map(|(_, rest)| rest.split(['?', '/', '#']).next().unwrap_or_default())
        .unwrap_or(value);

    parse_playlist_id(id)
}
