//! Player Events
//!
//! Notifications for the presentation layer that are not part of
//! `PlaybackState`:
//! - Track changes (new source loaded or unloaded)
//! - Run state of the media primitive
//! - Progress updates (whole seconds)
//! - End of the playlist

use podcastr_core::EpisodeId;
use serde::{Deserialize, Serialize};

/// Events emitted by the media sync controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// The loaded source changed
    TrackChanged {
        /// Episode now loaded, `None` when the player emptied
        episode_id: Option<EpisodeId>,
        /// Episode loaded before, if any
        previous_episode_id: Option<EpisodeId>,
    },

    /// The primitive started or stopped playing
    PlayingChanged { playing: bool },

    /// Displayed progress changed
    ProgressChanged {
        /// Elapsed whole seconds
        seconds: u64,
    },

    /// The last episode ended with nothing after it
    PlaylistFinished,
}
