use std::collections::HashSet;

use anyhow::Result;
use futures::TryStreamExt;
use itertools::Itertools;
use tokio::time::sleep;

use crate::{
    config::SyncSettings,
    library::{valid_id, LikedLibrary, Playlist, MAX_PER_CALL},
    pager::{collect_items, pages},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub liked_before: usize,
    pub new_tracks: usize,
    pub batches: usize,
    /// `None` when nothing needed saving and the library wasn't re-read.
    pub liked_after: Option<usize>,
}

/// Playlists owned by `user_id`. Followed and collaborative ones owned by
/// someone else are skipped.
pub async fn owned_playlists<L>(library: &L, user_id: &str) -> Result<Vec<Playlist>>
where
    L: LikedLibrary + ?Sized,
{
    let playlists = collect_items(pages(|offset| library.playlists_page(user_id, offset))).await?;
    let owned = playlists
        .into_iter()
        .filter(|playlist| playlist.owner_id == user_id)
        .collect::<Vec<_>>();

    log::info!("You own {} playlists. (Skipping others)", owned.len());
    Ok(owned)
}

pub async fn playlist_track_ids<L>(library: &L, playlist_id: &str) -> Result<Vec<String>>
where
    L: LikedLibrary + ?Sized,
{
    let entries =
        collect_items(pages(|offset| library.playlist_tracks_page(playlist_id, offset))).await?;
    Ok(entries
        .iter()
        .filter_map(|entry| entry.id())
        .map(str::to_owned)
        .collect())
}

/// A full scan of Liked Songs. Nothing is cached between calls.
pub async fn liked_track_ids<L>(library: &L) -> Result<HashSet<String>>
where
    L: LikedLibrary + ?Sized,
{
    let mut liked = HashSet::new();
    let mut saved = pages(|offset| library.saved_tracks_page(MAX_PER_CALL as u32, offset));
    while let Some(page) = saved.try_next().await? {
        liked.extend(page.items.iter().filter_map(|entry| entry.id()).map(str::to_owned));
    }

    log::info!("You currently have {} liked songs.", liked.len());
    Ok(liked)
}

/// Candidates not liked yet, in order. Repeats among the candidates are kept.
pub fn new_tracks(candidates: &[String], liked: &HashSet<String>) -> Vec<String> {
    candidates
        .iter()
        .filter(|id| valid_id(Some(id.as_str())).is_some() && !liked.contains(id.as_str()))
        .cloned()
        .collect()
}

/// Saves every candidate missing from Liked Songs, one call per batch.
pub async fn save_new_tracks<L>(
    library: &L,
    candidates: &[String],
    settings: &SyncSettings,
) -> Result<SyncReport>
where
    L: LikedLibrary + ?Sized,
{
    let liked = liked_track_ids(library).await?;
    let to_add = new_tracks(candidates, &liked);

    log::info!("Found {} already liked songs.", liked.len());
    log::info!("{} new songs will be added.", to_add.len());

    let mut report = SyncReport {
        liked_before: liked.len(),
        new_tracks: to_add.len(),
        ..Default::default()
    };

    if to_add.is_empty() {
        log::info!("No new songs to add.");
        return Ok(report);
    }

    for chunk in to_add.chunks(settings.batch_size.clamp(1, MAX_PER_CALL)) {
        let batch = chunk
            .iter()
            .filter(|id| valid_id(Some(id.as_str())).is_some())
            .cloned()
            .collect::<Vec<_>>();
        if batch.is_empty() {
            continue;
        }

        library.save_tracks(&batch).await?;
        report.batches += 1;
        log::info!("Added {} new songs to Liked Songs", batch.len());
        sleep(settings.pause).await;
    }

    let liked_after = liked_track_ids(library).await?.len();
    log::info!("After this process, you now have {} liked songs!", liked_after);
    report.liked_after = Some(liked_after);
    Ok(report)
}

/// The configured account, or whoever the token belongs to.
pub async fn resolve_user<L>(library: &L, configured: Option<&str>) -> Result<String>
where
    L: LikedLibrary + ?Sized,
{
    match configured {
        Some(user_id) => Ok(user_id.to_owned()),
        None => library.current_user_id().await,
    }
}

/// Likes every track of every playlist `user_id` owns.
pub async fn run<L>(library: &L, user_id: &str, settings: &SyncSettings) -> Result<SyncReport>
where
    L: LikedLibrary + ?Sized,
{
    log::info!("Fetching your playlists (excluding shared ones)...");
    let playlists = owned_playlists(library, user_id).await?;

    let mut candidates = vec![];
    for playlist in &playlists {
        log::info!("Fetching songs from playlist: {}...", playlist.name);
        let tracks = playlist_track_ids(library, &playlist.id).await?;
        log::info!("Found {} songs in {}", tracks.len(), playlist.name);
        candidates.extend(tracks);
    }

    log::info!(
        "Total unique songs found across your playlists: {}",
        candidates.iter().unique().count()
    );

    save_new_tracks(library, &candidates, settings).await
}
