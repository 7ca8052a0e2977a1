use anyhow::Result;
use async_trait::async_trait;

/// Most tracks the service accepts in one page of saved tracks or one save call.
pub const MAX_PER_CALL: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub owner_id: String,
}

/// A row of a track listing. Unavailable tracks come back without a track,
/// local files without an id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackEntry {
    pub track: Option<TrackRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackRef {
    pub id: Option<String>,
}

impl TrackEntry {
    pub fn with_id(id: impl Into<String>) -> Self {
        TrackEntry {
            track: Some(TrackRef {
                id: Some(id.into()),
            }),
        }
    }

    pub fn id(&self) -> Option<&str> {
        valid_id(self.track.as_ref()?.id.as_deref())
    }
}

/// The single rule for what counts as a usable track id.
pub fn valid_id(id: Option<&str>) -> Option<&str> {
    id.filter(|id| !id.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Offset of the following page, `None` on the last one.
    pub next: Option<u32>,
}

/// The slice of the Web API this tool talks to.
#[async_trait]
pub trait LikedLibrary {
    async fn current_user_id(&self) -> Result<String>;

    async fn playlists_page(&self, user_id: &str, offset: u32) -> Result<Page<Playlist>>;

    async fn playlist_tracks_page(
        &self,
        playlist_id: &str,
        offset: u32,
    ) -> Result<Page<TrackEntry>>;

    async fn saved_tracks_page(&self, limit: u32, offset: u32) -> Result<Page<TrackEntry>>;

    /// Adds at most [`MAX_PER_CALL`] tracks to Liked Songs.
    async fn save_tracks(&self, track_ids: &[String]) -> Result<()>;
}
