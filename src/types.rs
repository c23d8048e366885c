use std::{collections::HashSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Length of a Spotify track identifier.
pub const TRACK_ID_LEN: usize = 22;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

/// Canonical 22 character identifier of a track on the target service.
///
/// Only values made of exactly [`TRACK_ID_LEN`] ASCII alphanumerics can be
/// constructed, equality is byte-exact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    pub fn parse(value: &str) -> Option<Self> {
        if value.len() == TRACK_ID_LEN && value.bytes().all(|b| b.is_ascii_alphanumeric()) {
            Some(Self(value.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `spotify:track:<id>` form expected by the playlist endpoints.
    pub fn to_uri(&self) -> String {
        format!("spotify:track:{}", self.0)
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TrackId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            format!(
                "Invalid track id '{}': expected {} characters from [A-Za-z0-9]",
                s, TRACK_ID_LEN
            )
        })
    }
}

/// Services whose links are recognized in chat text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkProvider {
    Spotify,
    YouTube,
    YouTubeMusic,
    SoundCloud,
    Bandcamp,
    ResidentAdvisor,
    AbConcerts,
    /// A `track/<id>` link on a host without a dedicated pattern.
    Other,
}

/// A link found in a piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkMatch {
    pub provider: LinkProvider,
    /// The matched substring as it appears in the source text.
    pub raw: String,
    /// Byte offset of the match in the source text.
    pub start: usize,
    pub track_id: Option<TrackId>,
}

/// Duplicate-free collection of track identifiers proposed for a sync run.
///
/// Keeps first-seen order so additions land in the order links were shared,
/// but compares as a set.
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    ids: Vec<TrackId>,
    seen: HashSet<TrackId>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the identifier was already present.
    pub fn insert(&mut self, id: TrackId) -> bool {
        if self.seen.insert(id.clone()) {
            self.ids.push(id);
            true
        } else {
            false
        }
    }

    pub fn extend_from(&mut self, other: CandidateSet) {
        for id in other.ids {
            self.insert(id);
        }
    }

    pub fn contains(&self, id: &TrackId) -> bool {
        self.seen.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrackId> {
        self.ids.iter()
    }
}

impl PartialEq for CandidateSet {
    fn eq(&self, other: &Self) -> bool {
        self.seen == other.seen
    }
}

impl Eq for CandidateSet {}

impl FromIterator<TrackId> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = TrackId>>(iter: I) -> Self {
        let mut set = CandidateSet::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

impl<'a> IntoIterator for &'a CandidateSet {
    type Item = &'a TrackId;
    type IntoIter = std::slice::Iter<'a, TrackId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}

/// Point-in-time snapshot of the tracks in a remote playlist.
#[derive(Debug, Clone, Default)]
pub struct PlaylistMembership {
    pub ids: HashSet<TrackId>,
    /// Last total reported by the remote service.
    pub total: u32,
    pub pages: u32,
}

impl PlaylistMembership {
    pub fn contains(&self, id: &TrackId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// One page of playlist members as returned by a [`crate::sync::PlaylistApi`].
#[derive(Debug, Clone, Default)]
pub struct TracksPage {
    pub track_ids: Vec<TrackId>,
    pub total: u32,
}

/// Links shared by one author, in the order they were posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contribution {
    pub author: String,
    pub links: Vec<String>,
}

impl Contribution {
    pub fn new(author: String) -> Self {
        Self {
            author,
            links: Vec::new(),
        }
    }

    pub fn count(&self) -> usize {
        self.links.len()
    }
}

/// Contributions sorted by descending count, ties kept in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContributionReport {
    pub contributions: Vec<Contribution>,
}

impl ContributionReport {
    pub fn total_users(&self) -> usize {
        self.contributions.len()
    }

    pub fn total_links(&self) -> usize {
        self.contributions.iter().map(|c| c.count()).sum()
    }

    pub fn get(&self, author: &str) -> Option<&Contribution> {
        self.contributions.iter().find(|c| c.author == author)
    }

    pub fn top(&self, n: usize) -> &[Contribution] {
        &self.contributions[..n.min(self.contributions.len())]
    }
}

#[derive(Tabled)]
pub struct ContributionTableRow {
    #[tabled(rename = "#")]
    pub rank: usize,
    pub author: String,
    pub links: usize,
}

/// A record of a chat line: `[timestamp] author: content`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMessage {
    pub timestamp: String,
    pub author: String,
    pub content: String,
    pub has_link: bool,
}

/// A message from an exported chat history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksResponse {
    pub items: Vec<PlaylistItem>,
    pub total: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<PlaylistTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrack {
    pub id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}
