//! Catalogue browsing: home listing and episode details

use crate::config::CatalogueSettings;
use crate::error::Result;
use podcastr_core::{Catalogue, Episode, EpisodeId, EpisodeQuery, EpisodeShelf, JsonCatalogue};
use podcastr_playback::format_duration;
use std::io::Write;
use tracing::info;

/// Load the home listing from the configured catalogue
pub fn load_shelf(settings: &CatalogueSettings) -> Result<EpisodeShelf> {
    let catalogue = JsonCatalogue::from_path(&settings.path)?;
    let episodes = catalogue.list_episodes(&EpisodeQuery::latest(settings.limit))?;
    info!(
        count = episodes.len(),
        path = %settings.path.display(),
        "Loaded episode listing"
    );
    Ok(EpisodeShelf::from_episodes(episodes, settings.latest_count))
}

/// Look up a single episode in the configured catalogue
pub fn find_episode(settings: &CatalogueSettings, id: &str) -> Result<Episode> {
    let catalogue = JsonCatalogue::from_path(&settings.path)?;
    Ok(catalogue.get_episode(&EpisodeId::new(id))?)
}

/// Print both shelves, each row prefixed with its playlist index
pub fn write_listing(out: &mut impl Write, shelf: &EpisodeShelf) -> std::io::Result<()> {
    writeln!(out, "Latest releases")?;
    for (index, episode) in shelf.latest().iter().enumerate() {
        write_row(out, index, episode)?;
    }

    writeln!(out)?;
    writeln!(out, "All episodes")?;
    for (row, episode) in shelf.others().iter().enumerate() {
        write_row(out, shelf.playlist_index_of_other(row), episode)?;
    }

    Ok(())
}

fn write_row(out: &mut impl Write, index: usize, episode: &Episode) -> std::io::Result<()> {
    writeln!(
        out,
        "{index:>3}  {title} | {members} | {published} | {duration} [{id}]",
        title = episode.title,
        members = episode.members,
        published = episode.published_label(),
        duration = format_duration(episode.media.duration_seconds),
        id = episode.id,
    )
}

/// Print the episode page
pub fn write_details(out: &mut impl Write, episode: &Episode) -> std::io::Result<()> {
    writeln!(out, "{}", episode.title)?;
    writeln!(out, "{}", episode.members)?;
    writeln!(
        out,
        "{} | {}",
        episode.published_label(),
        format_duration(episode.media.duration_seconds)
    )?;

    for paragraph in episode.description_paragraphs() {
        writeln!(out)?;
        writeln!(out, "{paragraph}")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(id: &str, duration: u64) -> Episode {
        let mut episode = Episode::new(id, format!("Episode {id}"), format!("https://example.com/{id}.mp3"), duration);
        episode.members = "Diego e Richard".to_string();
        episode
    }

    #[test]
    fn listing_numbers_rows_by_playlist_index() {
        let shelf = EpisodeShelf::from_episodes(
            vec![episode("a", 60), episode("b", 3600), episode("c", 3981)],
            2,
        );
        let mut out = Vec::new();
        write_listing(&mut out, &shelf).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("  0  Episode a"));
        assert!(text.contains("  1  Episode b"));
        assert!(text.contains("  2  Episode c | Diego e Richard | 1 Jan 70 | 01:06:21 [c]"));
    }

    #[test]
    fn details_print_each_paragraph() {
        let mut episode = episode("a", 61);
        episode.description = "<p>First</p><p>Second</p>".to_string();

        let mut out = Vec::new();
        write_details(&mut out, &episode).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "Episode a\nDiego e Richard\n1 Jan 70 | 00:01:01\n\nFirst\n\nSecond\n"
        );
    }
}
