use tempfile::tempdir;
use trackmerge::error::SyncError;
use trackmerge::sources::*;
use trackmerge::types::ChatMessage;

const ID_A: &str = "4uLU6hMCjMI75M1A2tKUQC";
const ID_B: &str = "7ouMYWpwJ422jRcDASZB7P";

fn message(body: &str) -> ChatMessage {
    ChatMessage {
        timestamp: None,
        author: None,
        body: body.to_string(),
    }
}

#[tokio::test]
async fn test_identifiers_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("links.txt");
    std::fs::write(
        &path,
        format!(
            "https://open.spotify.com/track/{ID_A}\nnot a link\nspotify:track:{ID_B}\nhttps://open.spotify.com/track/{ID_A}\n"
        ),
    )
    .unwrap();

    let ids = identifiers_from_file(&path).await.unwrap();

    let ids: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
    assert_eq!(ids, vec![ID_A, ID_B]);
}

#[tokio::test]
async fn test_missing_file_is_unavailable() {
    let dir = tempdir().unwrap();

    let result = identifiers_from_file(&dir.path().join("nope.txt")).await;

    assert!(matches!(result, Err(SyncError::SourceUnavailable { .. })));
}

#[tokio::test]
async fn test_load_json_messages() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.json");
    std::fs::write(
        &path,
        format!(
            r#"[{{"author": "Alice", "body": "https://open.spotify.com/track/{ID_A}"}}, {{"body": "hi"}}]"#
        ),
    )
    .unwrap();

    let messages = load_messages(&path).await.unwrap();

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].author.as_deref(), Some("Alice"));
    assert_eq!(messages[1].author, None);
    assert_eq!(identifiers_from_messages(&messages).len(), 1);
}

#[tokio::test]
async fn test_malformed_json_is_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.json");
    std::fs::write(&path, "{ not json").unwrap();

    let result = load_messages(&path).await;

    assert!(matches!(result, Err(SyncError::MalformedSource { .. })));
}

#[tokio::test]
async fn test_load_text_export() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("chat.txt");
    std::fs::write(
        &path,
        format!("[10:00] Alice: spotify:track:{ID_A}\ncontinued line\n[10:01] Bob: hi\n"),
    )
    .unwrap();

    let messages = load_messages(&path).await.unwrap();

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].author.as_deref(), Some("Bob"));
    assert_eq!(messages[1].timestamp.as_deref(), Some("10:01"));
}

#[test]
fn test_select_messages_search_and_limit() {
    let messages = vec![
        message("Listen to THIS"),
        message("nothing here"),
        message("this one too"),
        message("and this"),
    ];

    let selected = select_messages(messages.clone(), Some("this"), Some(2));
    assert_eq!(selected, vec![message("Listen to THIS"), message("this one too")]);

    // No filter keeps everything
    assert_eq!(select_messages(messages, None, None).len(), 4);
}
