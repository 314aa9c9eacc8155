//! Simulated media primitive
//!
//! Stands in for a real audio backend: a clock that advances only when the
//! session ticks it, and a queue of events stamped with the source token.

use podcastr_core::Episode;
use podcastr_playback::{MediaElement, MediaEvent, PlaybackError, Result, SourceToken};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

#[derive(Debug, Clone, Copy)]
struct LoadedSource {
    token: SourceToken,
    duration: f64,
}

#[derive(Debug, Default)]
struct Clock {
    source: Option<LoadedSource>,
    position: f64,
    playing: bool,
    looping: bool,
    pending: VecDeque<(SourceToken, MediaEvent)>,
}

impl Clock {
    fn emit(&mut self, event: MediaEvent) {
        if let Some(source) = self.source {
            self.pending.push_back((source.token, event));
        }
    }
}

/// Media primitive backed by a virtual clock
pub struct SimulatedMedia {
    clock: Rc<RefCell<Clock>>,
    durations: HashMap<String, f64>,
}

/// Session-side handle to a `SimulatedMedia` that has been handed to a player
#[derive(Clone)]
pub struct SimulatedHandle {
    clock: Rc<RefCell<Clock>>,
}

impl SimulatedMedia {
    /// Create a primitive that knows the durations of `episodes`
    ///
    /// Loading a URL outside this set fails like a broken source would.
    pub fn new(episodes: &[Episode]) -> (Self, SimulatedHandle) {
        let clock = Rc::new(RefCell::new(Clock::default()));
        let durations = episodes
            .iter()
            .map(|e| (e.media.url.clone(), e.media.duration_seconds as f64))
            .collect();

        let handle = SimulatedHandle {
            clock: Rc::clone(&clock),
        };
        (Self { clock, durations }, handle)
    }
}

impl MediaElement for SimulatedMedia {
    fn load(&mut self, url: &str, token: SourceToken) -> Result<()> {
        let duration = *self
            .durations
            .get(url)
            .ok_or_else(|| PlaybackError::Media(format!("unknown source: {url}")))?;

        let mut clock = self.clock.borrow_mut();
        clock.source = Some(LoadedSource { token, duration });
        clock.position = 0.0;
        clock.playing = false;
        clock.emit(MediaEvent::MetadataReady);
        Ok(())
    }

    fn unload(&mut self) {
        let mut clock = self.clock.borrow_mut();
        clock.source = None;
        clock.position = 0.0;
        clock.playing = false;
    }

    fn play(&mut self) -> Result<()> {
        let mut clock = self.clock.borrow_mut();
        if clock.source.is_none() {
            return Err(PlaybackError::NoSource);
        }
        if !clock.playing {
            clock.playing = true;
            clock.emit(MediaEvent::Played);
        }
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        let mut clock = self.clock.borrow_mut();
        if clock.playing {
            clock.playing = false;
            clock.emit(MediaEvent::Paused);
        }
        Ok(())
    }

    fn current_time(&self) -> f64 {
        self.clock.borrow().position
    }

    fn set_current_time(&mut self, seconds: f64) -> Result<()> {
        let mut clock = self.clock.borrow_mut();
        let source = clock.source.ok_or(PlaybackError::NoSource)?;
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(PlaybackError::InvalidSeek(seconds));
        }
        clock.position = seconds.min(source.duration);
        clock.emit(MediaEvent::TimeElapsed);
        Ok(())
    }

    fn duration(&self) -> Option<f64> {
        self.clock.borrow().source.map(|s| s.duration)
    }

    fn set_looping(&mut self, looping: bool) {
        self.clock.borrow_mut().looping = looping;
    }
}

impl SimulatedHandle {
    /// Advance the clock by `seconds` of playback
    ///
    /// Does nothing while paused or without a source. Reaching the end wraps
    /// around when looping, otherwise stops and reports `Ended`.
    pub fn advance(&self, seconds: f64) {
        let mut clock = self.clock.borrow_mut();
        let Some(source) = clock.source else {
            return;
        };
        if !clock.playing {
            return;
        }

        clock.position += seconds;
        if clock.position < source.duration {
            clock.emit(MediaEvent::TimeElapsed);
        } else if clock.looping && source.duration > 0.0 {
            clock.position %= source.duration;
            clock.emit(MediaEvent::TimeElapsed);
        } else {
            clock.position = source.duration;
            clock.playing = false;
            clock.emit(MediaEvent::TimeElapsed);
            clock.emit(MediaEvent::Ended);
        }
    }

    /// Take every event queued since the last call
    pub fn take_events(&self) -> Vec<(SourceToken, MediaEvent)> {
        self.clock.borrow_mut().pending.drain(..).collect()
    }

    pub fn is_playing(&self) -> bool {
        self.clock.borrow().playing
    }

    pub fn position(&self) -> f64 {
        self.clock.borrow().position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use podcastr_playback::{PlaybackConfig, Player};

    fn episodes() -> Vec<Episode> {
        vec![
            Episode::new("a", "Episode A", "https://example.com/a.mp3", 90),
            Episode::new("b", "Episode B", "https://example.com/b.mp3", 120),
        ]
    }

    #[test]
    fn load_queues_metadata_with_token() {
        let list = episodes();
        let (media, handle) = SimulatedMedia::new(&list);
        let mut player = Player::new(PlaybackConfig::default());
        player.attach_media(Box::new(media));

        player.play_list(list, 0);

        let token = player.source_token().unwrap();
        let events = handle.take_events();
        assert_eq!(events[0], (token, MediaEvent::MetadataReady));
        assert!(events.contains(&(token, MediaEvent::Played)));
        assert!(handle.is_playing());
    }

    #[test]
    fn clock_stands_still_while_paused() {
        let list = episodes();
        let (media, handle) = SimulatedMedia::new(&list);
        let mut player = Player::new(PlaybackConfig::default());
        player.attach_media(Box::new(media));
        player.play_list(list, 0);
        player.toggle_play();
        handle.take_events();

        handle.advance(30.0);

        assert_eq!(handle.position(), 0.0);
        assert!(handle.take_events().is_empty());
    }

    #[test]
    fn reaching_the_end_reports_ended() {
        let list = episodes();
        let (media, handle) = SimulatedMedia::new(&list);
        let mut player = Player::new(PlaybackConfig::default());
        player.attach_media(Box::new(media));
        player.play_list(list, 0);
        handle.take_events();

        handle.advance(100.0);

        let events: Vec<MediaEvent> = handle.take_events().into_iter().map(|(_, e)| e).collect();
        assert_eq!(events, vec![MediaEvent::TimeElapsed, MediaEvent::Ended]);
        assert_eq!(handle.position(), 90.0);
        assert!(!handle.is_playing());
    }

    #[test]
    fn looping_wraps_instead_of_ending() {
        let list = episodes();
        let (media, handle) = SimulatedMedia::new(&list);
        let mut player = Player::new(PlaybackConfig::default());
        player.attach_media(Box::new(media));
        player.play_list(list, 0);
        player.toggle_loop();
        handle.take_events();

        handle.advance(100.0);

        let events: Vec<MediaEvent> = handle.take_events().into_iter().map(|(_, e)| e).collect();
        assert_eq!(events, vec![MediaEvent::TimeElapsed]);
        assert_eq!(handle.position(), 10.0);
    }

    #[test]
    fn unknown_source_fails_to_load() {
        let (mut media, _handle) = SimulatedMedia::new(&episodes());
        let result = media.load("https://example.com/missing.mp3", test_token());
        assert!(matches!(result, Err(PlaybackError::Media(_))));
    }

    fn test_token() -> SourceToken {
        let list = episodes();
        let (media, _handle) = SimulatedMedia::new(&list);
        let mut player = Player::new(PlaybackConfig::default());
        player.attach_media(Box::new(media));
        player.play_list(list, 0);
        player.source_token().unwrap()
    }
}
