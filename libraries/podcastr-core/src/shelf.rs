//! Home page shelving
//!
//! A listing is shown as a short "latest" shelf followed by everything else.
//! Both shelves play from the same full playlist, so a row in the second
//! shelf maps to `row + latest.len()` in that playlist.

use crate::types::Episode;

/// A listing split into "latest" and "other" episodes
#[derive(Debug, Clone, Default)]
pub struct EpisodeShelf {
    episodes: Vec<Episode>,
    latest_count: usize,
}

impl EpisodeShelf {
    /// Split `episodes` (already in display order) after `latest_count` items
    pub fn from_episodes(episodes: Vec<Episode>, latest_count: usize) -> Self {
        let latest_count = latest_count.min(episodes.len());
        Self {
            episodes,
            latest_count,
        }
    }

    /// Newest episodes, highlighted at the top
    pub fn latest(&self) -> &[Episode] {
        &self.episodes[..self.latest_count]
    }

    /// Remaining episodes
    pub fn others(&self) -> &[Episode] {
        &self.episodes[self.latest_count..]
    }

    /// Full listing, used as the playlist for either shelf
    pub fn all(&self) -> &[Episode] {
        &self.episodes
    }

    /// Playlist index of row `row` of the "other" shelf
    pub fn playlist_index_of_other(&self, row: usize) -> usize {
        row + self.latest_count
    }

    /// Consume the shelf, returning the full playlist
    pub fn into_playlist(self) -> Vec<Episode> {
        self.episodes
    }
}
