//! Core types for playback management

use podcastr_core::Episode;
use serde::{Deserialize, Serialize};

/// Snapshot of the player's playlist, position and modes
///
/// Owned by `PlaybackStore`; everything else only ever sees a shared
/// reference to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Episodes in playback order
    pub playlist: Vec<Episode>,

    /// Position in `playlist`; meaningless while the playlist is empty
    pub current_index: usize,

    /// Whether playback should be running
    pub is_playing: bool,

    /// Replay the current episode when it ends
    pub is_looping: bool,

    /// Pick the next episode at random
    pub is_shuffling: bool,
}

impl PlaybackState {
    /// Episode at `current_index`, if any
    pub fn current_episode(&self) -> Option<&Episode> {
        self.playlist.get(self.current_index)
    }

    /// Whether "previous" can move
    pub fn has_previous(&self) -> bool {
        !self.playlist.is_empty() && self.current_index > 0
    }

    /// Whether "next" has somewhere to go
    ///
    /// Always true while shuffling: the next pick is a fresh draw.
    pub fn has_next(&self) -> bool {
        self.is_shuffling || self.current_index < self.playlist.len().saturating_sub(1)
    }
}

/// Configuration for the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Start playing whenever a new episode is loaded (default: true)
    pub autoplay: bool,

    /// Initial shuffle flag (default: false)
    pub shuffle: bool,

    /// Initial loop flag (default: false)
    pub looping: bool,

    /// Seed for shuffle draws; `None` uses the thread RNG
    pub seed: Option<u64>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            autoplay: true,
            shuffle: false,
            looping: false,
            seed: None,
        }
    }
}
