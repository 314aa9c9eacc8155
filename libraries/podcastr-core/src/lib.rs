//! Podcastr Core
//!
//! Episode data model and read-only catalogue access for Podcastr.
//!
//! This crate provides the values the playback engine consumes. It never
//! plays anything itself.
//!
//! # Architecture
//!
//! - **Domain Types**: `Episode`, `EpisodeMedia`, `EpisodeId`
//! - **Catalogue**: the `Catalogue` trait plus a `JsonCatalogue` backed by a
//!   json-server style `db.json` document
//! - **Shelving**: `EpisodeShelf` splits a listing into "latest" and "other"
//!   episodes the way the home page presents them
//! - **Error Handling**: unified `CoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use podcastr_core::{Catalogue, EpisodeQuery, EpisodeShelf, JsonCatalogue};
//!
//! let catalogue = JsonCatalogue::from_json(r#"{
//!     "episodes": [{
//!         "id": "a-importancia-da-contribuicao-em-open-source",
//!         "title": "Faladev #30",
//!         "members": "Diego e Richard",
//!         "published_at": "2021-01-22 19:07:00",
//!         "thumbnail": "https://example.com/opensource.jpg",
//!         "description": "<p>Open source.</p>",
//!         "file": { "url": "https://example.com/opensource.m4a", "type": "audio/x-m4a", "duration": 3981 }
//!     }]
//! }"#).unwrap();
//!
//! let episodes = catalogue.list_episodes(&EpisodeQuery::default()).unwrap();
//! let shelf = EpisodeShelf::from_episodes(episodes, 2);
//! assert_eq!(shelf.latest().len(), 1);
//! ```

#![forbid(unsafe_code)]

pub mod catalogue;
pub mod error;
pub mod shelf;
pub mod types;

// Re-export commonly used types
pub use catalogue::{Catalogue, EpisodeQuery, JsonCatalogue, SortField, SortOrder};
pub use error::{CoreError, Result};
pub use shelf::EpisodeShelf;
pub use types::{Episode, EpisodeId, EpisodeMedia};
