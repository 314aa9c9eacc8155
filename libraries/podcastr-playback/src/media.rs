//! Platform-agnostic media primitive
//!
//! Abstracts the thing that actually renders audio (a browser `<audio>`
//! element, a GStreamer player, a test double).

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of one loaded media source
///
/// Handed to `MediaElement::load`; the platform stamps every event of that
/// source with it. Events carrying an older token are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceToken(u64);

impl SourceToken {
    pub(crate) fn new(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for SourceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle events reported by the media primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaEvent {
    /// Duration and seekability are known; fired once per load
    MetadataReady,

    /// Playback position moved
    TimeElapsed,

    /// Reached the end of the source (never fired while looping)
    Ended,

    /// The primitive started playing on its own (autoplay, OS media keys)
    Played,

    /// The primitive paused on its own
    Paused,
}

/// Platform media player
///
/// Only `MediaSyncController` calls these. Implementations deliver their
/// events through `Player::handle_media_event` (or
/// `MediaSyncController::handle_media_event`) on the same thread.
pub trait MediaElement {
    /// Replace the current source
    ///
    /// # Arguments
    /// * `url` - Audio URL of the episode
    /// * `token` - Tag for every event this source emits
    fn load(&mut self, url: &str, token: SourceToken) -> Result<()>;

    /// Drop the current source, if any
    fn unload(&mut self);

    /// Start or resume playback
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self) -> Result<()>;

    /// Current position in seconds
    fn current_time(&self) -> f64;

    /// Seek to a position in seconds
    fn set_current_time(&mut self, seconds: f64) -> Result<()>;

    /// Source duration in seconds, once metadata is loaded
    fn duration(&self) -> Option<f64>;

    /// Restart the source on end instead of reporting `Ended`
    fn set_looping(&mut self, looping: bool);
}
