use std::{path::PathBuf, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    cli::auth::access_token,
    config::{self, ClientConfig},
    error, info, sources,
    spotify::SpotifyClient,
    success,
    sync::{BATCH_SIZE, Synchronizer},
    types::CandidateSet,
    utils, warning,
};

/// Number of new tracks listed by a dry run.
const DRY_RUN_PREVIEW: usize = 20;

pub async fn import_file(path: Option<PathBuf>, playlist: Option<String>, dry_run: bool) {
    let Some(path) = path.or_else(config::default_data_file) else {
        error!("No input file given. Pass a path or set DATA_FILE.");
    };
    let playlist_id = resolve_playlist(playlist);

    info!("Scanning {} for track ids", path.display());
    let candidates = match sources::identifiers_from_file(&path).await {
        Ok(candidates) => candidates,
        Err(e) => error!("{}", e),
    };
    info!("Found {} unique tracks", candidates.len());

    sync_candidates(&playlist_id, candidates, dry_run).await;
}

pub async fn import_messages(
    path: PathBuf,
    playlist: Option<String>,
    search: Option<String>,
    limit: Option<usize>,
    dry_run: bool,
) {
    let playlist_id = resolve_playlist(playlist);

    let messages = match sources::load_messages(&path).await {
        Ok(messages) => messages,
        Err(e) => error!("{}", e),
    };
    let total = messages.len();
    let messages = sources::select_messages(messages, search.as_deref(), limit);
    info!(
        "Scanning {} of {} messages from {}",
        messages.len(),
        total,
        path.display()
    );

    let candidates = sources::identifiers_from_messages(&messages);
    info!("Found {} unique tracks", candidates.len());

    sync_candidates(&playlist_id, candidates, dry_run).await;
}

async fn sync_candidates(playlist_id: &str, candidates: CandidateSet, dry_run: bool) {
    if candidates.is_empty() {
        warning!("No Spotify tracks found, nothing to add.");
        return;
    }

    let token = match access_token().await {
        Ok(token) => token,
        Err(e) => error!("{}", e),
    };
    let client = SpotifyClient::new(ClientConfig::from_env(token));

    let pb = spinner();
    let synchronizer = Synchronizer::new(&client).with_progress(pb.clone());

    let plan = match synchronizer.plan(playlist_id, &candidates).await {
        Ok(plan) => plan,
        Err(e) => {
            pb.finish_and_clear();
            error!("{}", e);
        }
    };
    pb.suspend(|| {
        info!(
            "Playlist {} has {} tracks, {} of {} candidates are new",
            playlist_id,
            plan.existing,
            plan.delta.len(),
            candidates.len()
        )
    });

    if plan.delta.is_empty() {
        pb.finish_and_clear();
        success!("No new tracks to add.");
        return;
    }

    if dry_run {
        pb.finish_and_clear();
        info!(
            "Dry run: would add {} tracks in {} batches",
            plan.delta.len(),
            plan.delta.len().div_ceil(BATCH_SIZE)
        );
        for id in plan.delta.iter().take(DRY_RUN_PREVIEW) {
            println!("  {}", id.to_uri());
        }
        if plan.delta.len() > DRY_RUN_PREVIEW {
            println!("  ... and {} more", plan.delta.len() - DRY_RUN_PREVIEW);
        }
        return;
    }

    let summary = synchronizer.apply(playlist_id, &plan).await;
    pb.finish_and_clear();
    success!(
        "Sent {} new tracks to playlist {}.",
        summary.added,
        playlist_id
    );
}

fn resolve_playlist(playlist: Option<String>) -> String {
    if let Some(id) = playlist {
        return id;
    }

    match config::default_playlist_id() {
        Some(id) => match utils::parse_playlist_ref(&id) {
            Ok(id) => id,
            Err(e) => error!("SPOTIFY_PLAYLIST_ID: {}", e),
        },
        None => error!("No playlist given. Pass --playlist or set SPOTIFY_PLAYLIST_ID."),
    }
}

fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
