//! Media sync controller - bridges the store and the media primitive
//!
//! Drives the primitive from store state (`sync`) and folds the primitive's
//! events back into the store (`handle_media_event`). Elapsed-time progress
//! lives here rather than in the store: it is display state only.

use crate::events::PlayerEvent;
use crate::media::{MediaElement, MediaEvent, SourceToken};
use crate::store::PlaybackStore;
use crate::types::PlaybackConfig;
use podcastr_core::{Episode, EpisodeId};
use tracing::{debug, warn};

/// Source currently selected for the media primitive
#[derive(Debug, Clone)]
struct LoadedSource {
    token: SourceToken,
    episode_id: EpisodeId,
    url: String,
    catalogue_duration: u64,
    /// `TimeElapsed` is only honoured once this is set
    metadata_ready: bool,
}

impl LoadedSource {
    fn for_episode(episode: &Episode) -> Self {
        Self {
            token: SourceToken::new(0),
            episode_id: episode.id.clone(),
            url: episode.media.url.clone(),
            catalogue_duration: episode.media.duration_seconds,
            metadata_ready: false,
        }
    }
}

/// Keeps one media primitive in step with a `PlaybackStore`
///
/// The primitive is owned here; nothing else may call its playback methods.
/// Without an attached primitive every command is a no-op.
pub struct MediaSyncController {
    media: Option<Box<dyn MediaElement>>,
    autoplay: bool,
    next_token: u64,
    source: Option<LoadedSource>,
    /// Run state last issued to (or reported by) the primitive
    applied_playing: Option<bool>,
    applied_looping: Option<bool>,
    /// Run state last published as `PlayingChanged`
    announced_playing: bool,
    progress: u64,
    pending_events: Vec<PlayerEvent>,
}

impl MediaSyncController {
    pub fn new(config: &PlaybackConfig) -> Self {
        Self {
            media: None,
            autoplay: config.autoplay,
            next_token: 0,
            source: None,
            applied_playing: None,
            applied_looping: None,
            announced_playing: false,
            progress: 0,
            pending_events: Vec::new(),
        }
    }

    // ===== Media attachment =====

    /// Attach a media primitive
    ///
    /// The selected source (if any) is loaded into it under a fresh token.
    /// Call `sync` afterwards to apply the run state and loop flag.
    pub fn attach(&mut self, media: Box<dyn MediaElement>) {
        debug!("Attaching media primitive");
        self.media = Some(media);
        self.applied_playing = None;
        self.applied_looping = None;
        self.load_into_media();
        self.set_progress(0);
    }

    /// Detach and return the media primitive
    ///
    /// The primitive is paused first so it does not keep playing unowned.
    pub fn detach(&mut self) -> Option<Box<dyn MediaElement>> {
        debug!("Detaching media primitive");
        let mut media = self.media.take()?;
        if self.source.is_some() && self.applied_playing != Some(false) {
            if let Err(err) = media.pause() {
                warn!(%err, "Media primitive rejected pause on detach");
            }
        }

        self.applied_playing = None;
        self.applied_looping = None;
        if let Some(source) = self.source.as_mut() {
            source.metadata_ready = false;
        }
        self.announce_playing(false);
        Some(media)
    }

    pub fn has_media(&self) -> bool {
        self.media.is_some()
    }

    // ===== Store -> primitive =====

    /// Apply store state to the primitive
    ///
    /// Loads a new source when the current episode changed, then issues
    /// `play`/`pause` and the loop flag if they differ from what was last
    /// applied. Run after every store command.
    pub fn sync(&mut self, store: &mut PlaybackStore) {
        let loaded_id = self.source.as_ref().map(|source| &source.episode_id);
        let current_id = store.current_episode().map(|episode| &episode.id);

        if loaded_id != current_id {
            let next = store.current_episode().map(LoadedSource::for_episode);
            self.switch_source(next, store);
        }

        self.apply_looping(store.is_looping());
        self.apply_run_state(store.is_playing());
    }

    /// Seek the primitive and publish the new progress at once
    pub fn seek(&mut self, seconds: u64) {
        if self.source.is_none() {
            debug!(seconds, "Ignoring seek without a source");
            return;
        }
        let Some(media) = self.media.as_mut() else {
            return;
        };

        if let Err(err) = media.set_current_time(seconds as f64) {
            warn!(%err, seconds, "Media primitive rejected seek");
            return;
        }
        self.set_progress(seconds);
    }

    // ===== Primitive -> store =====

    /// Handle an event reported by the media primitive
    ///
    /// Events whose token is not the current source's are dropped.
    pub fn handle_media_event(
        &mut self,
        token: SourceToken,
        event: MediaEvent,
        store: &mut PlaybackStore,
    ) {
        if self.media.is_none() {
            debug!(?event, "Ignoring media event without an attached primitive");
            return;
        }

        match self.source.as_ref() {
            Some(source) if source.token == token => {}
            _ => {
                debug!(%token, ?event, "Dropping event from stale media source");
                return;
            }
        }

        match event {
            MediaEvent::MetadataReady => self.on_metadata_ready(),
            MediaEvent::TimeElapsed => self.on_time_elapsed(),
            MediaEvent::Ended => self.on_ended(store),
            MediaEvent::Played => self.on_run_state_reported(true, store),
            MediaEvent::Paused => self.on_run_state_reported(false, store),
        }
    }

    // ===== Display state =====

    /// Elapsed whole seconds of the current source
    pub fn progress(&self) -> u64 {
        self.progress
    }

    /// Length of the current source in whole seconds
    ///
    /// The primitive's duration once metadata is in, otherwise the
    /// catalogue's; 0 when nothing is loaded.
    pub fn total_seconds(&self) -> u64 {
        let Some(source) = self.source.as_ref() else {
            return 0;
        };

        if source.metadata_ready {
            let reported = self.media.as_ref().and_then(|media| media.duration());
            if let Some(duration) = reported.filter(|d| d.is_finite() && *d > 0.0) {
                return whole_seconds(duration);
            }
        }

        source.catalogue_duration
    }

    /// Token of the current source, if one is selected
    pub fn source_token(&self) -> Option<SourceToken> {
        self.source.as_ref().map(|source| source.token)
    }

    /// Drain all pending events
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internals =====

    fn switch_source(&mut self, next: Option<LoadedSource>, store: &mut PlaybackStore) {
        let previous_episode_id = self.source.take().map(|source| source.episode_id);
        let episode_id = next.as_ref().map(|source| source.episode_id.clone());
        debug!(
            episode = ?episode_id.as_ref().map(EpisodeId::as_str),
            previous = ?previous_episode_id.as_ref().map(EpisodeId::as_str),
            "Switching media source"
        );

        self.source = next;
        self.applied_playing = None;
        self.load_into_media();
        self.set_progress(0);
        self.pending_events.push(PlayerEvent::TrackChanged {
            episode_id,
            previous_episode_id,
        });

        if self.autoplay && self.source.is_some() {
            store.set_playing_state(true);
        }
    }

    /// Load the selected source into the primitive under a fresh token
    fn load_into_media(&mut self) {
        self.next_token += 1;
        let token = SourceToken::new(self.next_token);

        let Some(source) = self.source.as_mut() else {
            if let Some(media) = self.media.as_mut() {
                media.unload();
            }
            return;
        };
        source.token = token;
        source.metadata_ready = false;

        if let Some(media) = self.media.as_mut() {
            if let Err(err) = media.load(&source.url, token) {
                warn!(%err, episode = %source.episode_id, "Media primitive failed to load source");
            }
        }
    }

    fn apply_run_state(&mut self, playing: bool) {
        if self.media.is_none() {
            return;
        }
        // Never drive the primitive without a source
        if self.source.is_none() {
            self.announce_playing(false);
            return;
        }

        if self.applied_playing != Some(playing) {
            if let Some(media) = self.media.as_mut() {
                let result = if playing { media.play() } else { media.pause() };
                if let Err(err) = result {
                    warn!(%err, playing, "Media primitive rejected run-state change");
                }
            }
            self.applied_playing = Some(playing);
        }
        self.announce_playing(playing);
    }

    fn apply_looping(&mut self, looping: bool) {
        let Some(media) = self.media.as_mut() else {
            return;
        };
        if self.applied_looping != Some(looping) {
            media.set_looping(looping);
            self.applied_looping = Some(looping);
        }
    }

    fn on_metadata_ready(&mut self) {
        if let Some(source) = self.source.as_mut() {
            source.metadata_ready = true;
        }
        if let Some(media) = self.media.as_mut() {
            if let Err(err) = media.set_current_time(0.0) {
                warn!(%err, "Media primitive rejected rewind on load");
            }
        }
        self.set_progress(0);
    }

    fn on_time_elapsed(&mut self) {
        let armed = self
            .source
            .as_ref()
            .is_some_and(|source| source.metadata_ready);
        if !armed {
            debug!("Ignoring elapsed time before metadata");
            return;
        }
        let Some(media) = self.media.as_ref() else {
            return;
        };

        let seconds = whole_seconds(media.current_time());
        self.set_progress(seconds);
    }

    fn on_run_state_reported(&mut self, playing: bool, store: &mut PlaybackStore) {
        // Already true on the primitive; record it so sync does not echo it back
        self.applied_playing = Some(playing);
        store.set_playing_state(playing);
        self.announce_playing(store.is_playing());
    }

    fn on_ended(&mut self, store: &mut PlaybackStore) {
        if store.is_looping() {
            debug!("Ignoring end of stream while looping");
            return;
        }

        let finished = self.source.as_ref().map(|source| source.episode_id.clone());

        if store.has_next() {
            store.play_next();
        } else {
            debug!("Playlist finished");
            store.clear_player_state();
            self.pending_events.push(PlayerEvent::PlaylistFinished);
        }

        // Shuffle can draw the finished episode again: play it from the top
        let replay = finished.is_some()
            && store.current_episode().map(|episode| &episode.id) == finished.as_ref();
        if replay {
            let next = store.current_episode().map(LoadedSource::for_episode);
            self.switch_source(next, store);
        }

        self.sync(store);
    }

    fn announce_playing(&mut self, playing: bool) {
        if self.announced_playing != playing {
            self.announced_playing = playing;
            self.pending_events
                .push(PlayerEvent::PlayingChanged { playing });
        }
    }

    fn set_progress(&mut self, seconds: u64) {
        if self.progress != seconds {
            self.progress = seconds;
            self.pending_events
                .push(PlayerEvent::ProgressChanged { seconds });
        }
    }
}

/// Floor a media clock reading to whole seconds
fn whole_seconds(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    }
}
