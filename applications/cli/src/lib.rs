//! Podcastr CLI - browse the catalogue and run simulated playback sessions
pub mod config;
pub mod error;
pub mod listing;
pub mod session;
pub mod simulated;
