//! Integration tests for media synchronization
//!
//! Drives a `Player` with a recording media double and checks what reaches
//! the primitive and what flows back into the store.


use podcastr_playback::{MediaEvent, PlaybackConfig, Player, PlayerEvent};
use test_helpers::{abc, episode, MediaCommand, MockMedia, ScriptedRandom};

fn url(id: &str) -> String {
    format!("https://example.com/{id}.mp3")
}

fn attached(config: PlaybackConfig) -> (Player, std::rc::Rc<std::cell::RefCell<test_helpers::MediaLog>>) {
    let mut player = Player::new(config);
    let (media, log) = MockMedia::new();
    player.attach_media(Box::new(media));
    log.borrow_mut().take_commands();
    (player, log)
}

// ===== Store -> primitive =====

#[test]
fn starting_a_playlist_loads_and_plays() {
    let (mut player, log) = attached(PlaybackConfig::default());

    player.play_list(abc(), 0);

    assert_eq!(
        log.borrow_mut().take_commands(),
        vec![MediaCommand::Load(url("a")), MediaCommand::Play]
    );
    assert_eq!(player.source_token(), Some(log.borrow().last_token()));
}

#[test]
fn toggle_play_drives_run_state() {
    let (mut player, log) = attached(PlaybackConfig::default());
    player.play(episode("a", 600));
    log.borrow_mut().take_commands();

    player.toggle_play();
    player.toggle_play();

    assert_eq!(
        log.borrow_mut().take_commands(),
        vec![MediaCommand::Pause, MediaCommand::Play]
    );
}

#[test]
fn unrelated_commands_do_not_reissue_play() {
    let (mut player, log) = attached(PlaybackConfig::default());
    player.play_list(abc(), 0);
    log.borrow_mut().take_commands();

    player.toggle_shuffle();
    player.play_previous();

    assert!(log.borrow_mut().take_commands().is_empty());
}

#[test]
fn loop_flag_reaches_primitive() {
    let (mut player, log) = attached(PlaybackConfig::default());
    player.play(episode("a", 600));
    log.borrow_mut().take_commands();

    player.toggle_loop();

    assert_eq!(
        log.borrow_mut().take_commands(),
        vec![MediaCommand::Loop(true)]
    );
}

#[test]
fn attaching_late_loads_current_episode() {
    let mut player = Player::default();
    player.play(episode("a", 600));

    let (media, log) = MockMedia::new();
    player.attach_media(Box::new(media));

    assert_eq!(
        log.borrow_mut().take_commands(),
        vec![
            MediaCommand::Load(url("a")),
            MediaCommand::Loop(false),
            MediaCommand::Play
        ]
    );
}

#[test]
fn failed_play_keeps_store_authoritative() {
    let (mut player, log) = attached(PlaybackConfig::default());
    log.borrow_mut().fail_play = true;

    player.play(episode("a", 600));

    assert!(player.state().is_playing);
    assert!(log.borrow().commands.contains(&MediaCommand::Play));
}

// ===== Autoplay =====

#[test]
fn navigation_resumes_playback_with_autoplay() {
    let (mut player, log) = attached(PlaybackConfig::default());
    player.play_list(abc(), 0);
    player.toggle_play();
    log.borrow_mut().take_commands();

    player.play_next();

    assert!(player.state().is_playing);
    assert_eq!(
        log.borrow_mut().take_commands(),
        vec![MediaCommand::Load(url("b")), MediaCommand::Play]
    );
}

#[test]
fn navigation_stays_paused_without_autoplay() {
    let config = PlaybackConfig {
        autoplay: false,
        ..PlaybackConfig::default()
    };
    let (mut player, log) = attached(config);
    player.play_list(abc(), 0);
    player.toggle_play();
    log.borrow_mut().take_commands();

    player.play_next();

    assert!(!player.state().is_playing);
    assert_eq!(
        log.borrow_mut().take_commands(),
        vec![MediaCommand::Load(url("b")), MediaCommand::Pause]
    );
}

// ===== Primitive -> store =====

#[test]
fn elapsed_time_waits_for_metadata() {
    let (mut player, log) = attached(PlaybackConfig::default());
    player.play(episode("a", 600));
    let token = log.borrow().last_token();

    log.borrow_mut().current_time = 12.7;
    player.handle_media_event(token, MediaEvent::TimeElapsed);
    assert_eq!(player.progress(), 0);

    player.handle_media_event(token, MediaEvent::MetadataReady);
    assert_eq!(log.borrow().current_time, 0.0);

    log.borrow_mut().current_time = 42.9;
    player.handle_media_event(token, MediaEvent::TimeElapsed);
    assert_eq!(player.progress(), 42);
    assert_eq!(player.progress_label(), "00:00:42");
    assert!(player
        .drain_events()
        .contains(&PlayerEvent::ProgressChanged { seconds: 42 }));
}

#[test]
fn stale_source_cannot_touch_progress() {
    let (mut player, log) = attached(PlaybackConfig::default());
    player.play_list(abc(), 0);
    let old_token = log.borrow().last_token();
    player.handle_media_event(old_token, MediaEvent::MetadataReady);

    player.play_next();
    let new_token = log.borrow().last_token();
    assert_ne!(old_token, new_token);

    log.borrow_mut().current_time = 99.0;
    player.handle_media_event(old_token, MediaEvent::TimeElapsed);
    assert_eq!(player.progress(), 0);

    player.handle_media_event(old_token, MediaEvent::Ended);
    assert_eq!(player.current_episode().unwrap().id.as_str(), "b");

    // The new source is not armed until its own metadata arrives
    player.handle_media_event(new_token, MediaEvent::TimeElapsed);
    assert_eq!(player.progress(), 0);

    player.handle_media_event(new_token, MediaEvent::MetadataReady);
    log.borrow_mut().current_time = 7.2;
    player.handle_media_event(new_token, MediaEvent::TimeElapsed);
    assert_eq!(player.progress(), 7);
}

#[test]
fn seek_publishes_progress_immediately() {
    let (mut player, log) = attached(PlaybackConfig::default());
    player.play(episode("a", 600));
    let token = log.borrow().last_token();
    player.handle_media_event(token, MediaEvent::MetadataReady);
    log.borrow_mut().take_commands();

    player.seek(300);

    assert_eq!(player.progress(), 300);
    assert_eq!(
        log.borrow_mut().take_commands(),
        vec![MediaCommand::Seek(300.0)]
    );
}

#[test]
fn seek_without_episode_is_noop() {
    let (mut player, log) = attached(PlaybackConfig::default());

    player.seek(30);

    assert_eq!(player.progress(), 0);
    assert!(log.borrow_mut().take_commands().is_empty());
}

#[test]
fn reported_run_state_is_not_echoed() {
    let (mut player, log) = attached(PlaybackConfig::default());
    player.play(episode("a", 600));
    let token = log.borrow().last_token();
    log.borrow_mut().take_commands();

    player.drain_events();

    player.handle_media_event(token, MediaEvent::Paused);
    assert!(!player.state().is_playing);
    assert_eq!(
        player.drain_events(),
        vec![PlayerEvent::PlayingChanged { playing: false }]
    );

    player.handle_media_event(token, MediaEvent::Played);
    assert!(player.state().is_playing);
    assert_eq!(
        player.drain_events(),
        vec![PlayerEvent::PlayingChanged { playing: true }]
    );

    assert!(log.borrow_mut().take_commands().is_empty());

    player.toggle_play();
    assert_eq!(
        log.borrow_mut().take_commands(),
        vec![MediaCommand::Pause]
    );
}

#[test]
fn media_duration_replaces_catalogue_duration_after_metadata() {
    let (mut player, log) = attached(PlaybackConfig::default());
    player.play(episode("a", 600));
    let token = log.borrow().last_token();
    log.borrow_mut().duration = Some(1234.5);

    assert_eq!(player.total_seconds(), 600);

    player.handle_media_event(token, MediaEvent::MetadataReady);
    assert_eq!(player.total_seconds(), 1234);
    assert_eq!(player.total_label(), "00:20:34");
}

// ===== End of stream =====

#[test]
fn ended_advances_to_next_episode() {
    let (mut player, log) = attached(PlaybackConfig::default());
    player.play_list(abc(), 0);
    let token = log.borrow().last_token();
    log.borrow_mut().take_commands();

    player.handle_media_event(token, MediaEvent::Ended);

    assert_eq!(player.current_episode().unwrap().id.as_str(), "b");
    assert_eq!(
        log.borrow_mut().take_commands(),
        vec![MediaCommand::Load(url("b")), MediaCommand::Play]
    );
}

#[test]
fn ended_on_last_episode_clears_player() {
    let (mut player, log) = attached(PlaybackConfig::default());
    player.play(episode("a", 600));
    let token = log.borrow().last_token();
    player.drain_events();
    log.borrow_mut().take_commands();

    player.handle_media_event(token, MediaEvent::Ended);

    assert!(player.state().playlist.is_empty());
    assert!(player.current_episode().is_none());
    assert!(!player.state().is_playing);
    assert_eq!(log.borrow_mut().take_commands(), vec![MediaCommand::Unload]);

    let events = player.drain_events();
    assert!(events.contains(&PlayerEvent::PlaylistFinished));
    assert!(events.contains(&PlayerEvent::TrackChanged {
        episode_id: None,
        previous_episode_id: Some("a".into()),
    }));
    assert_eq!(player.total_seconds(), 0);
}

#[test]
fn ended_is_ignored_while_looping() {
    let (mut player, log) = attached(PlaybackConfig::default());
    player.play_list(abc(), 0);
    player.toggle_loop();
    let token = log.borrow().last_token();
    log.borrow_mut().take_commands();

    player.handle_media_event(token, MediaEvent::Ended);

    assert_eq!(player.current_episode().unwrap().id.as_str(), "a");
    assert!(log.borrow_mut().take_commands().is_empty());
}

#[test]
fn shuffle_redraw_of_finished_episode_replays_it() {
    let config = PlaybackConfig {
        shuffle: true,
        ..PlaybackConfig::default()
    };
    let mut player = Player::with_random(config, ScriptedRandom::boxed(vec![0]));
    let (media, log) = MockMedia::new();
    player.attach_media(Box::new(media));
    player.play_list(abc(), 0);
    let token = log.borrow().last_token();
    log.borrow_mut().take_commands();

    player.handle_media_event(token, MediaEvent::Ended);

    assert_eq!(player.current_episode().unwrap().id.as_str(), "a");
    assert_eq!(
        log.borrow_mut().take_commands(),
        vec![MediaCommand::Load(url("a")), MediaCommand::Play]
    );
    assert_ne!(log.borrow().last_token(), token);
}

#[test]
fn playing_changes_are_published_once() {
    let (mut player, _log) = attached(PlaybackConfig::default());

    player.play_list(abc(), 0);
    assert!(player
        .drain_events()
        .contains(&PlayerEvent::PlayingChanged { playing: true }));

    // Track switches keep playing without a new announcement
    player.play_next();
    assert!(!player
        .drain_events()
        .iter()
        .any(|event| matches!(event, PlayerEvent::PlayingChanged { .. })));

    player.toggle_play();
    assert_eq!(
        player.drain_events(),
        vec![PlayerEvent::PlayingChanged { playing: false }]
    );

    player.toggle_play();
    player.clear_player_state();
    let events = player.drain_events();
    assert_eq!(events.first(), Some(&PlayerEvent::PlayingChanged { playing: true }));
    assert_eq!(events.last(), Some(&PlayerEvent::PlayingChanged { playing: false }));
}

#[test]
fn detach_pauses_the_primitive() {
    let (mut player, log) = attached(PlaybackConfig::default());
    player.play(episode("a", 600));
    player.drain_events();
    log.borrow_mut().take_commands();

    assert!(player.detach_media().is_some());

    assert_eq!(log.borrow_mut().take_commands(), vec![MediaCommand::Pause]);
    assert_eq!(
        player.drain_events(),
        vec![PlayerEvent::PlayingChanged { playing: false }]
    );
    assert!(player.detach_media().is_none());
}

#[test]
fn events_after_detach_are_ignored() {
    let (mut player, log) = attached(PlaybackConfig::default());
    player.play(episode("a", 600));
    let token = log.borrow().last_token();

    assert!(player.detach_media().is_some());
    player.handle_media_event(token, MediaEvent::Ended);

    assert_eq!(player.current_episode().unwrap().id.as_str(), "a");
}
