//! Read-only episode catalogue
//!
//! The playback engine never fetches episodes itself. Front ends read them
//! through a `Catalogue` and hand the resulting values to the player.

use crate::error::{CoreError, Result};
use crate::types::{Episode, EpisodeId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Episode catalogue
///
/// Implementers serve immutable `Episode` values. Transport failures are the
/// implementer's business and surface as `CoreError`.
pub trait Catalogue {
    /// List episodes, sorted and limited per `query`
    fn list_episodes(&self, query: &EpisodeQuery) -> Result<Vec<Episode>>;

    /// Fetch one episode by ID
    ///
    /// # Errors
    /// Returns `CoreError::NotFound` if no episode has this ID
    fn get_episode(&self, id: &EpisodeId) -> Result<Episode>;
}

/// Field used to order a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    PublishedAt,
    Title,
}

/// Listing direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Listing parameters
///
/// Defaults to every episode, newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EpisodeQuery {
    /// Maximum number of episodes to return
    pub limit: Option<usize>,

    /// Sort key
    pub sort: SortField,

    /// Sort direction
    pub order: SortOrder,
}

impl EpisodeQuery {
    /// Newest `limit` episodes
    pub fn latest(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            sort: SortField::PublishedAt,
            order: SortOrder::Desc,
        }
    }

    fn compare(&self, a: &Episode, b: &Episode) -> Ordering {
        let ordering = match self.sort {
            SortField::PublishedAt => a.published_at.cmp(&b.published_at),
            SortField::Title => a.title.cmp(&b.title),
        };

        match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// On-disk document layout (json-server `db.json`)
#[derive(Debug, Deserialize)]
struct CatalogueDocument {
    episodes: Vec<Episode>,
}

/// Catalogue held in memory, loaded from a `db.json` document
#[derive(Debug, Clone, Default)]
pub struct JsonCatalogue {
    episodes: Vec<Episode>,
}

impl JsonCatalogue {
    /// Build a catalogue from already-parsed episodes
    ///
    /// # Errors
    /// Returns `CoreError::InvalidInput` if two episodes share an ID
    pub fn new(episodes: Vec<Episode>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(episodes.len());
        for episode in &episodes {
            if !seen.insert(&episode.id) {
                return Err(CoreError::invalid_input(format!(
                    "duplicate episode id: {}",
                    episode.id
                )));
            }
        }

        Ok(Self { episodes })
    }

    /// Parse a `{"episodes": [...]}` document
    pub fn from_json(json: &str) -> Result<Self> {
        let document: CatalogueDocument = serde_json::from_str(json)?;
        Self::new(document.episodes)
    }

    /// Load a `{"episodes": [...]}` document from disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let catalogue = Self::from_json(&json)?;
        debug!(
            path = %path.display(),
            episodes = catalogue.len(),
            "Loaded episode catalogue"
        );
        Ok(catalogue)
    }

    /// Number of episodes in the catalogue
    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    /// Check if the catalogue has no episodes
    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }
}

impl Catalogue for JsonCatalogue {
    fn list_episodes(&self, query: &EpisodeQuery) -> Result<Vec<Episode>> {
        let mut episodes = self.episodes.clone();
        // Stable sort keeps document order for ties
        episodes.sort_by(|a, b| query.compare(a, b));

        if let Some(limit) = query.limit {
            episodes.truncate(limit);
        }

        Ok(episodes)
    }

    fn get_episode(&self, id: &EpisodeId) -> Result<Episode> {
        self.episodes
            .iter()
            .find(|episode| &episode.id == id)
            .cloned()
            .ok_or_else(|| CoreError::not_found("Episode", id.as_str()))
    }
}
