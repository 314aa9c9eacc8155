//! Simulated playback session
//!
//! Runs a `Player` against `SimulatedMedia`, advancing the virtual clock in
//! fixed ticks and printing what a player bar would show.

use crate::simulated::SimulatedHandle;
use podcastr_playback::{format_duration, Player, PlayerEvent};
use std::io::Write;
use tracing::{debug, info};

/// Upper bound on event rounds per tick; each round is a chain of
/// primitive events caused by handling the previous round
const MAX_EVENT_ROUNDS: usize = 16;

#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    /// Virtual seconds per tick
    pub tick_seconds: u64,

    /// Stop after this many ticks even if episodes remain
    pub max_ticks: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            tick_seconds: 60,
            max_ticks: 10_000,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub episodes_started: usize,
    pub ticks: usize,
    /// The playlist ran out and the player was cleared
    pub finished: bool,
}

/// Drive `player` until the playlist finishes, playback pauses, or the tick
/// budget runs out
pub fn run_session(
    player: &mut Player,
    handle: &SimulatedHandle,
    options: SessionOptions,
    out: &mut impl Write,
) -> std::io::Result<SessionSummary> {
    let mut summary = SessionSummary::default();

    deliver_media_events(player, handle, out, &mut summary)?;

    while summary.ticks < options.max_ticks {
        if player.current_episode().is_none() {
            break;
        }
        if !player.state().is_playing {
            writeln!(out, "Paused at {}", player.progress_label())?;
            break;
        }

        handle.advance(options.tick_seconds as f64);
        summary.ticks += 1;

        deliver_media_events(player, handle, out, &mut summary)?;
    }

    info!(
        episodes = summary.episodes_started,
        ticks = summary.ticks,
        finished = summary.finished,
        "Session ended"
    );
    Ok(summary)
}

/// Feed queued primitive events to the player until none are left,
/// reporting after each one so labels match the source that caused them
fn deliver_media_events(
    player: &mut Player,
    handle: &SimulatedHandle,
    out: &mut impl Write,
    summary: &mut SessionSummary,
) -> std::io::Result<()> {
    report(player, out, summary)?;

    for _ in 0..MAX_EVENT_ROUNDS {
        let events = handle.take_events();
        if events.is_empty() {
            return Ok(());
        }
        for (token, event) in events {
            player.handle_media_event(token, event);
            report(player, out, summary)?;
        }
    }

    debug!("Media events still pending after {MAX_EVENT_ROUNDS} rounds");
    Ok(())
}

fn report(
    player: &mut Player,
    out: &mut impl Write,
    summary: &mut SessionSummary,
) -> std::io::Result<()> {
    for event in player.drain_events() {
        match event {
            PlayerEvent::TrackChanged {
                episode_id: Some(id),
                ..
            } => {
                summary.episodes_started += 1;
                let episode = player.state().playlist.iter().find(|e| e.id == id);
                match episode {
                    Some(episode) => writeln!(
                        out,
                        "Now playing: {} ({})",
                        episode.title,
                        format_duration(episode.media.duration_seconds)
                    )?,
                    None => writeln!(out, "Now playing: {id}")?,
                }
            }
            PlayerEvent::TrackChanged { episode_id: None, .. } => {}
            PlayerEvent::PlayingChanged { .. } => {}
            // Zero is the reset on every source switch
            PlayerEvent::ProgressChanged { seconds: 0 } => {}
            PlayerEvent::ProgressChanged { seconds } => {
                writeln!(
                    out,
                    "  {} / {}",
                    format_duration(seconds),
                    player.total_label()
                )?;
            }
            PlayerEvent::PlaylistFinished => {
                summary.finished = true;
                writeln!(out, "Playlist finished")?;
            }
        }
    }
    Ok(())
}
