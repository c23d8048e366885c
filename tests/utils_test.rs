use trackmerge::types::TrackId;
use trackmerge::utils::*;

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    // Should be deterministic
    assert_eq!(challenge, generate_code_challenge(verifier));
    assert_ne!(challenge, generate_code_challenge("different_verifier"));

    // SHA-256 digest, base64 URL-safe without padding
    assert_eq!(challenge.len(), 43);
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_build_authorize_url() {
    let url = build_authorize_url(
        "https://accounts.spotify.com/authorize",
        "client123",
        "http://127.0.0.1:3000/callback",
        "challenge",
        "playlist-modify-public playlist-read-private",
    );

    assert!(url.starts_with("https://accounts.spotify.com/authorize?"));
    assert!(url.contains("client_id=client123"));
    assert!(url.contains("response_type=code"));
    assert!(url.contains("code_challenge_method=S256"));
    // Values are form encoded
    assert!(url.contains("redirect_uri=http%3A%2F%2F127.0.0.1%3A3000%2Fcallback"));
    assert!(url.contains("scope=playlist-modify-public+playlist-read-private"));
}

#[test]
fn test_parse_playlist_id() {
    assert_eq!(
        parse_playlist_id("37i9dQZF1DXcBWIGoYBM5M"),
        Ok("37i9dQZF1DXcBWIGoYBM5M".to_string())
    );
    assert_eq!(
        parse_playlist_id("  37i9dQZF1DXcBWIGoYBM5M "),
        Ok("37i9dQZF1DXcBWIGoYBM5M".to_string())
    );

    assert_eq!(parse_playlist_id(""), Err("Playlist ID is required".to_string()));
    assert!(parse_playlist_id("too-short").is_err());
    assert!(parse_playlist_id("37i9dQZF1DXcBWIGoYBM5").is_err());
    assert!(parse_playlist_id("37i9dQZF1DXcBWIGoYBM5_").is_err());
}

#[test]
fn test_parse_playlist_ref() {
    let id = Ok("37i9dQZF1DXcBWIGoYBM5M".to_string());

    assert_eq!(parse_playlist_ref("37i9dQZF1DXcBWIGoYBM5M"), id);
    assert_eq!(
        parse_playlist_ref("https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M?si=abc"),
        id
    );
    assert_eq!(parse_playlist_ref("spotify:playlist:37i9dQZF1DXcBWIGoYBM5M"), id);
    assert!(parse_playlist_ref("https://open.spotify.com/playlist/nope").is_err());
}

#[test]
fn test_track_id() {
    let id: TrackId = "4uLU6hMCjMI75M1A2tKUQC".parse().unwrap();

    assert_eq!(id.to_uri(), "spotify:track:4uLU6hMCjMI75M1A2tKUQC");
    assert_eq!(id.to_string(), "4uLU6hMCjMI75M1A2tKUQC");

    // Comparison is case-sensitive
    assert_ne!(TrackId::parse("4ULU6HMCJMI75M1A2TKUQC"), Some(id));
    assert!("4uLU6hMCjMI75M1A2tKUQ".parse::<TrackId>().is_err());
}
