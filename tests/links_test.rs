use trackmerge::links::*;
use trackmerge::types::{CandidateSet, LinkProvider, TrackId};

const ID_A: &str = "4uLU6hMCjMI75M1A2tKUQC";
const ID_B: &str = "7ouMYWpwJ422jRcDASZB7P";

fn id(value: &str) -> TrackId {
    TrackId::parse(value).unwrap()
}

#[test]
fn test_extract_plain_and_localized_link_once() {
    let text = format!(
        "listen https://open.spotify.com/track/{ID_A}?si=abc123 and again \
         https://open.spotify.com/intl-de/track/{ID_A}"
    );

    let ids = extract_identifiers(&text);

    // Same track through two link shapes is a single candidate
    assert_eq!(ids.len(), 1);
    assert!(ids.contains(&id(ID_A)));
}

#[test]
fn test_extract_uri_and_region_variants() {
    let text = format!(
        "spotify:track:{ID_A}\nhttps://open.spotify.com/intl-pt-BR/track/{ID_B}"
    );

    let set = extract_identifiers(&text);
    let ids: Vec<&str> = set.iter().map(|id| id.as_str()).collect();

    assert_eq!(ids, vec![ID_A, ID_B]);
}

#[test]
fn test_extract_is_idempotent() {
    let text = format!("https://open.spotify.com/track/{ID_A} https://open.spotify.com/track/{ID_B}");

    let first = extract_identifiers(&text);
    let second = extract_identifiers(&text);

    assert_eq!(first, second);
}

#[test]
fn test_extract_ignores_invalid_ids() {
    // Too short, and a non-alphanumeric character
    let text = "https://open.spotify.com/track/short \
                https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKU-C";

    assert!(extract_identifiers(text).is_empty());
}

#[test]
fn test_extract_without_links() {
    assert!(extract_identifiers("").is_empty());
    assert!(extract_identifiers("just chatting, no music today").is_empty());
    assert!(!has_link("just chatting"));
}

#[test]
fn test_extract_from_several_texts() {
    let texts = [
        format!("https://open.spotify.com/track/{ID_B}"),
        format!("spotify:track:{ID_A}"),
        format!("https://open.spotify.com/track/{ID_B}?si=x"),
    ];

    let ids = extract_identifiers_from(texts.iter().map(String::as_str));

    let expected: CandidateSet = [id(ID_B), id(ID_A)].into_iter().collect();
    assert_eq!(ids, expected);
    // First-seen order is kept
    assert_eq!(ids.iter().next(), Some(&id(ID_B)));
}

#[test]
fn test_generic_track_link() {
    let text = "https://service.example/track/AAAAAAAAAAAAAAAAAAAAAA";

    let links = attributable_links(text);

    assert_eq!(links.len(), 1);
    assert_eq!(links[0].provider, LinkProvider::Other);
    assert_eq!(extract_identifiers(text).len(), 1);
}

#[test]
fn test_other_providers_are_found() {
    let text = "https://www.youtube.com/watch?v=dQw4w9WgXcQ \
                https://youtu.be/dQw4w9WgXcQ \
                https://soundcloud.com/artist/track-name \
                https://artist.bandcamp.com/track/song \
                https://ra.co/events/123456";

    let providers: Vec<LinkProvider> = attributable_links(text)
        .into_iter()
        .map(|l| l.provider)
        .collect();

    assert_eq!(
        providers,
        vec![
            LinkProvider::YouTube,
            LinkProvider::YouTube,
            LinkProvider::SoundCloud,
            LinkProvider::Bandcamp,
            LinkProvider::ResidentAdvisor,
        ]
    );
    // None of them name a Spotify track
    assert!(extract_identifiers(text).is_empty());
}

#[test]
fn test_extract_links_dedupes_raw_text() {
    let text = "https://youtu.be/abc https://youtu.be/abc https://youtu.be/xyz";

    let links = extract_links(text);

    assert_eq!(links.len(), 2);
    assert_eq!(links[0].raw, "https://youtu.be/abc");
    assert_eq!(links[1].raw, "https://youtu.be/xyz");
}

#[test]
fn test_links_are_ordered_by_position() {
    let text = format!("https://youtu.be/abc then https://open.spotify.com/track/{ID_A}");

    let links = attributable_links(&text);

    assert_eq!(links.len(), 2);
    assert_eq!(links[0].provider, LinkProvider::YouTube);
    assert_eq!(links[1].provider, LinkProvider::Spotify);
    assert_eq!(links[1].track_id, Some(id(ID_A)));
}

#[test]
fn test_extract_links_without_scheme() {
    let text = format!("listen open.spotify.com/track/{ID_A} now");

    let ids = extract_identifiers(&text);

    assert_eq!(ids.len(), 1);
    assert!(ids.contains(&id(ID_A)));

    // Credited once, as a Spotify link
    let links = attributable_links(&text);
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].provider, LinkProvider::Spotify);
    assert_eq!(links[0].raw, format!("open.spotify.com/track/{ID_A}"));
}

#[test]
fn test_extract_schemeless_generic_and_localized_links() {
    let text = format!(
        "open.spotify.com/intl-fr/track/{ID_A} and service.example/track/{ID_B}"
    );

    let set = extract_identifiers(&text);
    let ids: Vec<&str> = set.iter().map(|id| id.as_str()).collect();

    assert_eq!(ids, vec![ID_A, ID_B]);
}

#[test]
fn test_schemeless_link_keeps_length_guard() {
    // 23 alphanumerics after track/ is not an id, with or without scheme
    let text = "open.spotify.com/track/ABCDEFGHIJKLMNOPQRSTUVW";

    assert!(extract_identifiers(text).is_empty());
}
