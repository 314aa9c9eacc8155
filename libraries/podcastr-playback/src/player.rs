//! Player - store and controller wired together
//!
//! What the presentation layer talks to: every command goes to the store
//! and is then synced to the media primitive.

use crate::controller::MediaSyncController;
use crate::events::PlayerEvent;
use crate::media::{MediaElement, MediaEvent, SourceToken};
use crate::progress::format_duration;
use crate::random::RandomSource;
use crate::store::{PlaybackStore, SubscriptionId};
use crate::types::{PlaybackConfig, PlaybackState};
use podcastr_core::Episode;

/// One player: a `PlaybackStore` plus the `MediaSyncController` driving its
/// media primitive
pub struct Player {
    store: PlaybackStore,
    controller: MediaSyncController,
}

impl Player {
    /// Create a player with no media attached
    pub fn new(config: PlaybackConfig) -> Self {
        Self {
            store: PlaybackStore::new(&config),
            controller: MediaSyncController::new(&config),
        }
    }

    /// Create a player drawing shuffle picks from `random`
    pub fn with_random(config: PlaybackConfig, random: Box<dyn RandomSource>) -> Self {
        Self {
            store: PlaybackStore::with_random(&config, random),
            controller: MediaSyncController::new(&config),
        }
    }

    // ===== Media =====

    /// Attach the media primitive and bring it up to date
    pub fn attach_media(&mut self, media: Box<dyn MediaElement>) {
        self.controller.attach(media);
        self.sync();
    }

    /// Detach and return the media primitive
    pub fn detach_media(&mut self) -> Option<Box<dyn MediaElement>> {
        self.controller.detach()
    }

    /// Feed an event from the media primitive
    pub fn handle_media_event(&mut self, token: SourceToken, event: MediaEvent) {
        self.controller
            .handle_media_event(token, event, &mut self.store);
    }

    /// User moved the progress slider
    pub fn seek(&mut self, seconds: u64) {
        self.controller.seek(seconds);
    }

    // ===== Commands =====

    pub fn play(&mut self, episode: Episode) {
        self.store.play(episode);
        self.sync();
    }

    pub fn play_list(&mut self, list: Vec<Episode>, index: usize) {
        self.store.play_list(list, index);
        self.sync();
    }

    pub fn toggle_play(&mut self) {
        self.store.toggle_play();
        self.sync();
    }

    pub fn toggle_loop(&mut self) {
        self.store.toggle_loop();
        self.sync();
    }

    pub fn toggle_shuffle(&mut self) {
        self.store.toggle_shuffle();
        self.sync();
    }

    pub fn play_next(&mut self) {
        self.store.play_next();
        self.sync();
    }

    pub fn play_previous(&mut self) {
        self.store.play_previous();
        self.sync();
    }

    pub fn clear_player_state(&mut self) {
        self.store.clear_player_state();
        self.sync();
    }

    // ===== Queries =====

    pub fn state(&self) -> &PlaybackState {
        self.store.state()
    }

    pub fn current_episode(&self) -> Option<&Episode> {
        self.store.current_episode()
    }

    pub fn has_next(&self) -> bool {
        self.store.has_next()
    }

    pub fn has_previous(&self) -> bool {
        self.store.has_previous()
    }

    /// Elapsed whole seconds
    pub fn progress(&self) -> u64 {
        self.controller.progress()
    }

    /// Length of the current episode in whole seconds
    pub fn total_seconds(&self) -> u64 {
        self.controller.total_seconds()
    }

    /// Elapsed time as `HH:MM:SS`
    pub fn progress_label(&self) -> String {
        format_duration(self.progress())
    }

    /// Episode length as `HH:MM:SS`
    pub fn total_label(&self) -> String {
        format_duration(self.total_seconds())
    }

    /// Token the media primitive must stamp on its events
    pub fn source_token(&self) -> Option<SourceToken> {
        self.controller.source_token()
    }

    pub fn store(&self) -> &PlaybackStore {
        &self.store
    }

    pub fn controller(&self) -> &MediaSyncController {
        &self.controller
    }

    // ===== Observation =====

    /// Register a state listener (see `PlaybackStore::subscribe`)
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&PlaybackState) + 'static,
    {
        self.store.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    /// Drain track/progress notifications
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        self.controller.drain_events()
    }

    fn sync(&mut self) {
        self.controller.sync(&mut self.store);
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(PlaybackConfig::default())
    }
}
