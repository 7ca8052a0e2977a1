//! Copies every track from the playlists you own into your Liked Songs.

pub mod config;
pub mod library;
pub mod pager;
pub mod spotify;
pub mod sync;

#[cfg(test)]
mod test_utils;

pub use config::{Settings, SyncSettings};
pub use library::{valid_id, LikedLibrary, Page, Playlist, TrackEntry, TrackRef};
pub use sync::{run, SyncReport};
