/// Podcastr - podcast catalogue browser and simulated player
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use podcastr_cli::{
    config::AppConfig,
    error::CliError,
    listing,
    session::{self, SessionOptions},
    simulated::SimulatedMedia,
};
use podcastr_core::Episode;
use podcastr_playback::{PlaybackConfig, Player};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "podcastr")]
#[command(about = "Browse a podcast catalogue and run simulated playback", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./podcastr.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the latest episodes
    List,
    /// Show one episode's details
    Show {
        /// Episode id
        id: String,
    },
    /// Play a single episode
    Play {
        /// Episode id
        id: String,

        #[command(flatten)]
        session: SessionArgs,
    },
    /// Play the home listing as a playlist
    PlayList {
        /// Playlist position to start from
        #[arg(short, long, default_value_t = 0)]
        index: usize,

        #[command(flatten)]
        session: SessionArgs,
    },
}

#[derive(Args)]
struct SessionArgs {
    /// Virtual seconds advanced per tick
    #[arg(long, default_value_t = 60)]
    tick: u64,

    /// Stop after this many ticks
    #[arg(long, default_value_t = 10_000)]
    max_ticks: usize,

    /// Start with shuffle enabled
    #[arg(long)]
    shuffle: bool,

    /// Start with loop enabled
    #[arg(long)]
    looping: bool,
}

impl SessionArgs {
    fn options(&self) -> SessionOptions {
        SessionOptions {
            tick_seconds: self.tick,
            max_ticks: self.max_ticks,
        }
    }

    fn apply(&self, mut config: PlaybackConfig) -> PlaybackConfig {
        config.shuffle |= self.shuffle;
        config.looping |= self.looping;
        config
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "podcastr=info,podcastr_cli=info,podcastr_playback=info,podcastr_core=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config =
        AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::List => {
            let shelf = listing::load_shelf(&config.catalogue)
                .context("Failed to load episode listing")?;
            listing::write_listing(&mut stdout, &shelf)?;
        }
        Commands::Show { id } => {
            let episode = listing::find_episode(&config.catalogue, &id)
                .with_context(|| format!("Failed to look up episode {id}"))?;
            listing::write_details(&mut stdout, &episode)?;
        }
        Commands::Play { id, session } => {
            let episode = listing::find_episode(&config.catalogue, &id)
                .with_context(|| format!("Failed to look up episode {id}"))?;
            let playlist = vec![episode.clone()];
            let mut player = Player::new(session.apply(config.playback));
            play(&mut player, &playlist, &session, &mut stdout, |player| {
                player.play(episode);
            })?;
        }
        Commands::PlayList { index, session } => {
            let playlist = listing::load_shelf(&config.catalogue)
                .context("Failed to load episode listing")?
                .into_playlist();
            if index >= playlist.len() {
                return Err(CliError::IndexOutOfRange {
                    index,
                    len: playlist.len(),
                }
                .into());
            }
            let mut player = Player::new(session.apply(config.playback));
            let list = playlist.clone();
            play(&mut player, &playlist, &session, &mut stdout, |player| {
                player.play_list(list, index);
            })?;
        }
    }

    Ok(())
}

/// Attach simulated media, start playback, and run the session to completion
fn play(
    player: &mut Player,
    playlist: &[Episode],
    args: &SessionArgs,
    out: &mut impl std::io::Write,
    start: impl FnOnce(&mut Player),
) -> anyhow::Result<()> {
    let (media, handle) = SimulatedMedia::new(playlist);
    player.attach_media(Box::new(media));

    info!(
        episodes = playlist.len(),
        tick_seconds = args.tick,
        "Starting simulated playback"
    );
    start(player);

    session::run_session(player, &handle, args.options(), out)?;
    Ok(())
}
