use anyhow::{Context as _, Result};
use async_trait::async_trait;
use rspotify::{
    model::{self, PlayableItem, PlaylistId, TrackId, UserId},
    prelude::*,
    AuthCodeSpotify, Config, Credentials, OAuth,
};

use crate::{
    config::Settings,
    library::{LikedLibrary, Page, Playlist, TrackEntry, TrackRef},
};

/// Authorizes against Spotify, reusing the cached token when there is one.
pub async fn connect(settings: &Settings) -> Result<AuthCodeSpotify> {
    let creds = Credentials::new(&settings.client_id, &settings.client_secret);
    let oauth = OAuth {
        redirect_uri: settings.redirect_uri.clone(),
        scopes: rspotify::scopes!(
            "user-library-read",
            "playlist-read-private",
            "user-library-modify"
        ),
        ..Default::default()
    };
    let spotify = AuthCodeSpotify::with_config(
        creds,
        oauth,
        Config {
            token_cached: true,
            token_refreshing: true,
            ..Default::default()
        },
    );

    let url = spotify.get_authorize_url(false)?;
    spotify
        .prompt_for_token(&url)
        .await
        .context("Couldn't authenticate successfully")?;
    Ok(spotify)
}

fn next_offset<T>(page: &model::Page<T>) -> Option<u32> {
    page.next.as_ref().map(|_| page.offset + page.limit)
}

fn convert<T, U>(page: model::Page<T>, f: impl FnMut(T) -> U) -> Page<U> {
    let next = next_offset(&page);
    Page {
        items: page.items.into_iter().map(f).collect(),
        next,
    }
}

fn track_ref(track: &model::FullTrack) -> TrackRef {
    TrackRef {
        id: track.id.as_ref().map(|id| id.id().to_owned()),
    }
}

#[async_trait]
impl LikedLibrary for AuthCodeSpotify {
    async fn current_user_id(&self) -> Result<String> {
        let user = self.current_user().await?;
        Ok(user.id.id().to_owned())
    }

    async fn playlists_page(&self, user_id: &str, offset: u32) -> Result<Page<Playlist>> {
        let page = self
            .user_playlists_manual(UserId::from_id(user_id)?, None, Some(offset))
            .await?;
        Ok(convert(page, |playlist| Playlist {
            id: playlist.id.id().to_owned(),
            name: playlist.name,
            owner_id: playlist.owner.id.id().to_owned(),
        }))
    }

    async fn playlist_tracks_page(
        &self,
        playlist_id: &str,
        offset: u32,
    ) -> Result<Page<TrackEntry>> {
        let page = self
            .playlist_items_manual(
                PlaylistId::from_id(playlist_id)?,
                None,
                None,
                None,
                Some(offset),
            )
            .await?;
        // Episodes are not tracks and can't be saved as one.
        Ok(convert(page, |item| TrackEntry {
            track: match &item.track {
                Some(PlayableItem::Track(track)) => Some(track_ref(track)),
                _ => None,
            },
        }))
    }

    async fn saved_tracks_page(&self, limit: u32, offset: u32) -> Result<Page<TrackEntry>> {
        let page = self
            .current_user_saved_tracks_manual(None, Some(limit), Some(offset))
            .await?;
        Ok(convert(page, |saved| TrackEntry {
            track: Some(track_ref(&saved.track)),
        }))
    }

    async fn save_tracks(&self, track_ids: &[String]) -> Result<()> {
        let ids = track_ids
            .iter()
            .map(|id| TrackId::from_id(id.as_str()))
            .collect::<Result<Vec<_>, _>>()?;
        self.current_user_saved_tracks_add(ids).await?;
        Ok(())
    }
}
