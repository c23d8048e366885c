//! Readers turning an input medium into text for the extractor and the
//! contribution parser.

use std::path::Path;

use crate::{
    contributions,
    error::SyncError,
    links,
    types::{CandidateSet, ChatMessage},
};

/// Reads a whole UTF-8 text file.
pub async fn read_text(path: &Path) -> Result<String, SyncError> {
    async_fs::read_to_string(path)
        .await
        .map_err(|source| SyncError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })
}

/// Track identifiers mentioned anywhere in a text file.
pub async fn identifiers_from_file(path: &Path) -> Result<CandidateSet, SyncError> {
    let content = read_text(path).await?;
    Ok(links::extract_identifiers(&content))
}

/// Reads a chat history exported as a JSON array of messages.
pub async fn read_messages(path: &Path) -> Result<Vec<ChatMessage>, SyncError> {
    let content = read_text(path).await?;
    serde_json::from_str(&content).map_err(|source| SyncError::MalformedSource {
        path: path.to_path_buf(),
        source,
    })
}

/// Messages of a bracketed chat export, e.g. `[10:00] Alice: hello`.
/// Lines that are not messages are dropped.
pub fn messages_from_export(content: &str) -> Vec<ChatMessage> {
    content
        .lines()
        .filter_map(contributions::parse_message)
        .map(|m| ChatMessage {
            timestamp: Some(m.timestamp),
            author: Some(m.author),
            body: m.content,
        })
        .collect()
}

/// Loads a message history, as JSON when the file ends in `.json` and as a
/// bracketed chat export otherwise.
pub async fn load_messages(path: &Path) -> Result<Vec<ChatMessage>, SyncError> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        read_messages(path).await
    } else {
        Ok(messages_from_export(&read_text(path).await?))
    }
}

/// Narrows a message history the way a chat search would: keep bodies
/// containing `search` (case-insensitive), then at most `limit` messages.
pub fn select_messages(
    messages: Vec<ChatMessage>,
    search: Option<&str>,
    limit: Option<usize>,
) -> Vec<ChatMessage> {
    let needle = search.map(|s| s.to_lowercase());

    messages
        .into_iter()
        .filter(|m| match &needle {
            Some(n) => m.body.to_lowercase().contains(n.as_str()),
            None => true,
        })
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}

/// Track identifiers across all message bodies.
pub fn identifiers_from_messages(messages: &[ChatMessage]) -> CandidateSet {
    links::extract_identifiers_from(messages.iter().map(|m| m.body.as_str()))
}
