//! Playback state store
//!
//! Single source of truth for playlist, position and modes. Every command is
//! total: invalid requests (empty playlist, nothing before/after) are no-ops.

use crate::random::{self, RandomSource};
use crate::types::{PlaybackConfig, PlaybackState};
use podcastr_core::Episode;
use tracing::{debug, warn};

/// Handle returned by `PlaybackStore::subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&PlaybackState)>;

/// Playlist/position/mode store
///
/// Listeners run synchronously after each command that changed the state.
/// They only receive a shared reference, so they cannot re-enter the store.
pub struct PlaybackStore {
    state: PlaybackState,
    random: Box<dyn RandomSource>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl PlaybackStore {
    /// Create an empty store with the configured modes and shuffle seed
    pub fn new(config: &PlaybackConfig) -> Self {
        Self::with_random(config, random::from_seed(config.seed))
    }

    /// Create an empty store drawing shuffle picks from `random`
    pub fn with_random(config: &PlaybackConfig, random: Box<dyn RandomSource>) -> Self {
        Self {
            state: PlaybackState {
                is_looping: config.looping,
                is_shuffling: config.shuffle,
                ..PlaybackState::default()
            },
            random,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    // ===== Queries =====

    /// Current state snapshot
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Episode at the current index, if any
    pub fn current_episode(&self) -> Option<&Episode> {
        self.state.current_episode()
    }

    pub fn has_previous(&self) -> bool {
        self.state.has_previous()
    }

    pub fn has_next(&self) -> bool {
        self.state.has_next()
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    pub fn is_looping(&self) -> bool {
        self.state.is_looping
    }

    pub fn is_shuffling(&self) -> bool {
        self.state.is_shuffling
    }

    // ===== Commands =====

    /// Play a single episode, replacing the playlist
    pub fn play(&mut self, episode: Episode) {
        debug!(episode = %episode.id, "Playing single episode");
        self.state.playlist = vec![episode];
        self.state.current_index = 0;
        self.state.is_playing = true;
        self.notify();
    }

    /// Play `list` starting at `index`, replacing the playlist
    ///
    /// `index` is not validated: callers must pass `index < list.len()`. An
    /// out-of-range index leaves `current_episode()` empty until navigation
    /// moves it back into range.
    pub fn play_list(&mut self, list: Vec<Episode>, index: usize) {
        if index >= list.len() {
            warn!(
                index,
                len = list.len(),
                "Playlist started at an index outside the list"
            );
        }

        debug!(len = list.len(), index, "Playing playlist");
        self.state.is_playing = !list.is_empty();
        self.state.playlist = list;
        self.state.current_index = index;
        self.notify();
    }

    /// Flip the playing flag
    ///
    /// No-op while the playlist is empty.
    pub fn toggle_play(&mut self) {
        if self.state.playlist.is_empty() {
            debug!("Ignoring toggle_play on empty playlist");
            return;
        }
        self.state.is_playing = !self.state.is_playing;
        debug!(is_playing = self.state.is_playing, "Toggled playback");
        self.notify();
    }

    /// Set the playing flag to what the media primitive reports
    ///
    /// Setting `true` is a no-op while the playlist is empty.
    pub fn set_playing_state(&mut self, playing: bool) {
        if playing && self.state.playlist.is_empty() {
            debug!("Ignoring playing state without a playlist");
            return;
        }
        if self.state.is_playing == playing {
            return;
        }
        self.state.is_playing = playing;
        debug!(is_playing = playing, "Playing state set");
        self.notify();
    }

    /// Flip loop mode
    pub fn toggle_loop(&mut self) {
        self.state.is_looping = !self.state.is_looping;
        debug!(is_looping = self.state.is_looping, "Toggled loop");
        self.notify();
    }

    /// Flip shuffle mode
    pub fn toggle_shuffle(&mut self) {
        self.state.is_shuffling = !self.state.is_shuffling;
        debug!(is_shuffling = self.state.is_shuffling, "Toggled shuffle");
        self.notify();
    }

    /// Move to the next episode
    ///
    /// While shuffling, the next index is a uniform draw over the whole
    /// playlist and may repeat the current episode. Otherwise advances by one
    /// when `has_next()`.
    pub fn play_next(&mut self) {
        let len = self.state.playlist.len();

        let next = if self.state.is_shuffling {
            if len == 0 {
                debug!("Ignoring shuffle draw on empty playlist");
                return;
            }
            self.random.next_index(len)
        } else if self.state.has_next() {
            self.state.current_index + 1
        } else {
            debug!("No next episode");
            return;
        };

        self.move_to(next);
    }

    /// Move to the previous episode when `has_previous()`
    pub fn play_previous(&mut self) {
        if !self.state.has_previous() {
            debug!("No previous episode");
            return;
        }
        self.move_to(self.state.current_index - 1);
    }

    /// Empty the playlist and stop
    ///
    /// The index and loop/shuffle flags are left as they were; with no
    /// playlist they have no effect.
    pub fn clear_player_state(&mut self) {
        debug!("Clearing player state");
        self.state.playlist.clear();
        self.state.is_playing = false;
        self.notify();
    }

    // ===== Subscriptions =====

    /// Register a listener called after every state change
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&PlaybackState) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener
    ///
    /// Returns false if it was already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn move_to(&mut self, index: usize) {
        if index == self.state.current_index {
            debug!(index, "Next pick is the current episode");
            return;
        }
        self.state.current_index = index;
        debug!(index, "Moved to episode");
        self.notify();
    }

    fn notify(&mut self) {
        let state = &self.state;
        for (_, listener) in &mut self.listeners {
            listener(state);
        }
    }
}

impl Default for PlaybackStore {
    fn default() -> Self {
        Self::new(&PlaybackConfig::default())
    }
}
