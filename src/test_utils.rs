use std::{collections::HashMap, sync::Mutex};

use anyhow::{bail, Context as _, Result};
use async_trait::async_trait;

use crate::library::{LikedLibrary, Page, Playlist, TrackEntry, MAX_PER_CALL};

pub const FAKE_USER: &str = "ianlum314";

/// In-memory account that serves listings `page_size` items at a time and
/// records every save call.
pub struct FakeLibrary {
    page_size: usize,
    playlists: Vec<Playlist>,
    tracks: HashMap<String, Vec<TrackEntry>>,
    liked: Mutex<Vec<TrackEntry>>,
    writes: Mutex<Vec<Vec<String>>>,
    write_limit: Option<usize>,
}

impl FakeLibrary {
    pub fn new(page_size: usize) -> Self {
        FakeLibrary {
            page_size,
            playlists: vec![],
            tracks: HashMap::new(),
            liked: Mutex::new(vec![]),
            writes: Mutex::new(vec![]),
            write_limit: None,
        }
    }

    pub fn playlist(mut self, id: &str, name: &str, owner: &str, tracks: Vec<TrackEntry>) -> Self {
        self.playlists.push(Playlist {
            id: id.to_owned(),
            name: name.to_owned(),
            owner_id: owner.to_owned(),
        });
        self.tracks.insert(id.to_owned(), tracks);
        self
    }

    pub fn liked(self, ids: &[String]) -> Self {
        self.liked_entries(ids.iter().map(TrackEntry::with_id).collect())
    }

    /// Raw saved-track rows, including ones without a track or an id.
    pub fn liked_entries(self, entries: Vec<TrackEntry>) -> Self {
        self.liked.lock().unwrap().extend(entries);
        self
    }

    /// Save calls after the first `n` fail.
    pub fn fail_writes_after(mut self, n: usize) -> Self {
        self.write_limit = Some(n);
        self
    }

    pub fn writes(&self) -> Vec<Vec<String>> {
        self.writes.lock().unwrap().clone()
    }

    pub fn liked_count(&self) -> usize {
        self.liked.lock().unwrap().len()
    }
}

fn page_of<T: Clone>(items: &[T], offset: u32, size: usize) -> Page<T> {
    let start = (offset as usize).min(items.len());
    let end = (start + size).min(items.len());
    Page {
        items: items[start..end].to_vec(),
        next: if end < items.len() {
            Some(end as u32)
        } else {
            None
        },
    }
}

#[async_trait]
impl LikedLibrary for FakeLibrary {
    async fn current_user_id(&self) -> Result<String> {
        Ok(FAKE_USER.to_owned())
    }

    async fn playlists_page(&self, _user_id: &str, offset: u32) -> Result<Page<Playlist>> {
        Ok(page_of(&self.playlists, offset, self.page_size))
    }

    async fn playlist_tracks_page(
        &self,
        playlist_id: &str,
        offset: u32,
    ) -> Result<Page<TrackEntry>> {
        let tracks = self
            .tracks
            .get(playlist_id)
            .with_context(|| format!("no playlist {}", playlist_id))?;
        Ok(page_of(tracks, offset, self.page_size))
    }

    async fn saved_tracks_page(&self, limit: u32, offset: u32) -> Result<Page<TrackEntry>> {
        let liked = self.liked.lock().unwrap();
        Ok(page_of(liked.as_slice(), offset, self.page_size.min(limit as usize)))
    }

    async fn save_tracks(&self, track_ids: &[String]) -> Result<()> {
        if track_ids.len() > MAX_PER_CALL {
            bail!("{} ids in one call", track_ids.len());
        }
        let mut writes = self.writes.lock().unwrap();
        if self.write_limit.map_or(false, |limit| writes.len() >= limit) {
            bail!("429: rate limited");
        }
        writes.push(track_ids.to_vec());

        let mut liked = self.liked.lock().unwrap();
        for id in track_ids {
            if !liked.iter().any(|entry| entry.id() == Some(id.as_str())) {
                liked.push(TrackEntry::with_id(id.as_str()));
            }
        }
        Ok(())
    }
}
