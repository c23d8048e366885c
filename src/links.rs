//! Link extraction.
//!
//! All recognized link shapes live in one ordered table, [`LINK_PATTERNS`].
//! Every pattern is applied to the full text independently; patterns for the
//! sync target capture a [`TrackId`] while the others only exist so chat
//! contributions to other services can be attributed.
//!
//! Matches are merged by identifier when one was captured and by raw link text
//! otherwise, so the same track shared through a plain and a localized link
//! counts once.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{CandidateSet, LinkMatch, LinkProvider, TrackId};

/// Characters allowed in the tail of a link (path, query string).
const TAIL: &str = r"[A-Za-z0-9?=&%_-]";

pub struct LinkPattern {
    pub provider: LinkProvider,
    pub regex: Regex,
    /// Group 1 of `regex` holds a [`TrackId`].
    pub captures_id: bool,
}

impl LinkPattern {
    fn new(provider: LinkProvider, pattern: &str, captures_id: bool) -> Self {
        Self {
            provider,
            regex: Regex::new(pattern).expect("link patterns are valid regular expressions"),
            captures_id,
        }
    }
}

pub static LINK_PATTERNS: Lazy<Vec<LinkPattern>> = Lazy::new(|| {
    let spotify_tail = format!(r"(?:\?{TAIL}*)?");
    vec![
        LinkPattern::new(
            LinkProvider::Spotify,
            &format!(r"(?:https://|\b)open\.spotify\.com/track/([A-Za-z0-9]{{22}})\b{spotify_tail}"),
            true,
        ),
        LinkPattern::new(
            LinkProvider::Spotify,
            &format!(
                r"(?:https://|\b)open\.spotify\.com/intl-[A-Za-z]{{2}}(?:-[A-Za-z]{{2}})?/track/([A-Za-z0-9]{{22}})\b{spotify_tail}"
            ),
            true,
        ),
        LinkPattern::new(
            LinkProvider::Spotify,
            r"\bspotify:track:([A-Za-z0-9]{22})\b",
            true,
        ),
        LinkPattern::new(
            LinkProvider::YouTube,
            &format!(r"https://www\.youtube\.com/watch\?v={TAIL}+"),
            false,
        ),
        LinkPattern::new(
            LinkProvider::YouTube,
            &format!(r"https://youtu\.be/{TAIL}+"),
            false,
        ),
        LinkPattern::new(
            LinkProvider::SoundCloud,
            r"https://soundcloud\.com/[A-Za-z0-9/?=&%_-]+",
            false,
        ),
        LinkPattern::new(
            LinkProvider::SoundCloud,
            &format!(r"https://on\.soundcloud\.com/{TAIL}+"),
            false,
        ),
        LinkPattern::new(
            LinkProvider::Bandcamp,
            r"https://[A-Za-z0-9-]+\.bandcamp\.com/[A-Za-z0-9/?=&%_-]+",
            false,
        ),
        LinkPattern::new(
            LinkProvider::YouTubeMusic,
            &format!(r"https://music\.youtube\.com/watch\?v={TAIL}+"),
            false,
        ),
        LinkPattern::new(
            LinkProvider::ResidentAdvisor,
            &format!(r"https://ra\.co/events/{TAIL}+"),
            false,
        ),
        LinkPattern::new(
            LinkProvider::ResidentAdvisor,
            &format!(r"https://fr\.ra\.co/events/{TAIL}+"),
            false,
        ),
        LinkPattern::new(
            LinkProvider::AbConcerts,
            r"https://www\.abconcerts\.be/[A-Za-z0-9/?=&%_-]+",
            false,
        ),
        // any other host serving `.../track/<id>`, scheme optional; last so specific shapes win overlaps
        LinkPattern::new(
            LinkProvider::Other,
            &format!(
                r"(?:https?://|\b)[A-Za-z0-9.-]+/(?:[A-Za-z0-9_-]+/)*track/([A-Za-z0-9]{{22}})\b{spotify_tail}"
            ),
            true,
        ),
    ]
});

/// Finds every link in `text`, ordered by position.
///
/// Repeated links are all returned, and so is every pattern hit on the same
/// substring. See [`attributable_links`] for a view without overlaps.
pub fn find_links(text: &str) -> Vec<LinkMatch> {
    let mut matches: Vec<LinkMatch> = Vec::new();

    for pattern in LINK_PATTERNS.iter() {
        for caps in pattern.regex.captures_iter(text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };

            let track_id = if pattern.captures_id {
                caps.get(1).and_then(|m| TrackId::parse(m.as_str()))
            } else {
                None
            };

            matches.push(LinkMatch {
                provider: pattern.provider,
                raw: whole.as_str().to_string(),
                start: whole.start(),
                track_id,
            });
        }
    }

    // stable, so equal offsets keep table order
    matches.sort_by_key(|m| m.start);
    matches
}

/// Links of `text` as they would be credited to the person who wrote it:
/// one entry per occurrence, a substring hit by several patterns counted once.
pub fn attributable_links(text: &str) -> Vec<LinkMatch> {
    let mut links: Vec<LinkMatch> = Vec::new();
    for link in find_links(text) {
        if let Some(last) = links.last() {
            if link.start < last.start + last.raw.len() {
                continue;
            }
        }
        links.push(link);
    }
    links
}

pub fn has_link(text: &str) -> bool {
    LINK_PATTERNS.iter().any(|p| p.regex.is_match(text))
}

/// Like [`find_links`] but with duplicates merged, keyed by identifier when
/// present and by raw link text otherwise.
pub fn extract_links(text: &str) -> Vec<LinkMatch> {
    let mut seen_ids: HashSet<TrackId> = HashSet::new();
    let mut seen_raw: HashSet<String> = HashSet::new();

    let mut links = find_links(text);
    links.retain(|link| match &link.track_id {
        Some(id) => seen_ids.insert(id.clone()),
        None => seen_raw.insert(link.raw.clone()),
    });
    links
}

/// Track identifiers mentioned in `text`, each exactly once.
///
/// Links with or without `https://`, localized paths, `spotify:track:` URIs
/// and `track/<id>` links on other hosts all yield the same identifier.
///
/// # Returns
///
/// A [`CandidateSet`] in order of first mention. Extracting the same text
/// again yields an equal set.
pub fn extract_identifiers(text: &str) -> CandidateSet {
    find_links(text)
        .into_iter()
        .filter_map(|link| link.track_id)
        .collect()
}

/// Track identifiers mentioned across several texts.
pub fn extract_identifiers_from<'a, I>(texts: I) -> CandidateSet
where
    I: IntoIterator<Item = &'a str>,
{
    let mut candidates = CandidateSet::new();
    for text in texts {
        candidates.extend_from(extract_identifiers(text));
    }
    candidates
}
