//! Podcastr - Playback Engine
//!
//! Platform-agnostic playback state for the Podcastr player.
//!
//! This crate provides:
//! - Playlist/position/mode state with total, never-failing commands
//! - Shuffle (uniform redraw) and loop modes
//! - Synchronization with a media-playback primitive (play/pause/seek,
//!   metadata, elapsed time and end-of-stream events)
//! - `HH:MM:SS` progress formatting
//!
//! # Architecture
//!
//! `podcastr-playback` is completely platform-agnostic:
//! - No dependency on any audio API
//! - No dependency on the catalogue transport
//! - Single-threaded: every command and event runs to completion
//!
//! The media primitive is provided by the platform via the `MediaElement`
//! trait. Its events are fed back with the `SourceToken` they were loaded
//! with, so events from a replaced source are dropped.
//!
//! # Example: Playlist Navigation
//!
//! ```rust
//! use podcastr_core::Episode;
//! use podcastr_playback::{PlaybackConfig, Player};
//!
//! let mut player = Player::new(PlaybackConfig::default());
//!
//! let episodes = vec![
//!     Episode::new("a", "Episode A", "https://example.com/a.mp3", 1800),
//!     Episode::new("b", "Episode B", "https://example.com/b.mp3", 2400),
//! ];
//! player.play_list(episodes, 0);
//! assert!(player.state().is_playing);
//!
//! player.play_next();
//! assert_eq!(player.current_episode().unwrap().id.as_str(), "b");
//! assert!(!player.has_next());
//! ```
//!
//! # Example: Platform Integration
//!
//! ```rust,no_run
//! use podcastr_playback::{MediaElement, MediaEvent, PlaybackConfig, Player, Result, SourceToken};
//!
//! // Implement MediaElement for your platform
//! struct MyAudioElement {
//!     // ... platform-specific handle
//! }
//!
//! impl MediaElement for MyAudioElement {
//!     fn load(&mut self, url: &str, token: SourceToken) -> Result<()> {
//!         // Point the platform player at `url`; tag its events with `token`
//!         Ok(())
//!     }
//!     fn unload(&mut self) {}
//!     fn play(&mut self) -> Result<()> { Ok(()) }
//!     fn pause(&mut self) -> Result<()> { Ok(()) }
//!     fn current_time(&self) -> f64 { 0.0 }
//!     fn set_current_time(&mut self, seconds: f64) -> Result<()> { Ok(()) }
//!     fn duration(&self) -> Option<f64> { None }
//!     fn set_looping(&mut self, looping: bool) {}
//! }
//!
//! let mut player = Player::new(PlaybackConfig::default());
//! player.attach_media(Box::new(MyAudioElement {}));
//!
//! // Forward platform callbacks
//! # let token = player.source_token().unwrap();
//! player.handle_media_event(token, MediaEvent::MetadataReady);
//! player.handle_media_event(token, MediaEvent::TimeElapsed);
//! println!("{} / {}", player.progress_label(), player.total_label());
//! ```

mod controller;
mod error;
mod events;
mod media;
mod player;
mod progress;
mod random;
mod store;
pub mod types;

// Public exports
pub use controller::MediaSyncController;
pub use error::{PlaybackError, Result};
pub use events::PlayerEvent;
pub use media::{MediaElement, MediaEvent, SourceToken};
pub use player::Player;
pub use progress::format_duration;
pub use random::{RandomSource, SeededRandom, ThreadRandom};
pub use store::{PlaybackStore, SubscriptionId};
pub use types::{PlaybackConfig, PlaybackState};
