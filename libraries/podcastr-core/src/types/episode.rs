/// Episode types as served by the catalogue
use super::EpisodeId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Publish date label used by the episode listings (e.g. "8 Jan 21")
const PUBLISHED_LABEL_FORMAT: &str = "%-d %b %y";

/// One playable catalogue item
///
/// Immutable once it leaves the catalogue. The playback engine clones these
/// into its playlist and only ever reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// Unique episode slug
    pub id: EpisodeId,

    /// Episode title
    pub title: String,

    /// Hosts and guests, as a single display string
    pub members: String,

    /// HTML description (paragraphs wrapped in `<p>`)
    #[serde(default)]
    pub description: String,

    /// Cover image URL
    #[serde(rename = "thumbnail")]
    pub thumbnail_url: String,

    /// Publication timestamp
    #[serde(with = "published_at")]
    pub published_at: DateTime<Utc>,

    /// Audio file reference
    #[serde(rename = "file")]
    pub media: EpisodeMedia,
}

/// Audio file of an episode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeMedia {
    /// Audio URL handed to the media primitive
    pub url: String,

    /// MIME type, when the catalogue provides one
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    /// Duration in whole seconds
    #[serde(rename = "duration")]
    pub duration_seconds: u64,
}

impl Episode {
    /// Create an episode with the fields playback needs
    ///
    /// Display-only fields start empty and `published_at` at the Unix epoch.
    pub fn new(
        id: impl Into<EpisodeId>,
        title: impl Into<String>,
        url: impl Into<String>,
        duration_seconds: u64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            members: String::new(),
            description: String::new(),
            thumbnail_url: String::new(),
            published_at: DateTime::<Utc>::default(),
            media: EpisodeMedia {
                url: url.into(),
                mime_type: None,
                duration_seconds,
            },
        }
    }

    /// Short publish date for listings
    pub fn published_label(&self) -> String {
        self.published_at.format(PUBLISHED_LABEL_FORMAT).to_string()
    }

    /// Description split into plain paragraphs
    ///
    /// The catalogue wraps paragraphs in `<p>...</p>`; empty fragments between
    /// tags are dropped.
    pub fn description_paragraphs(&self) -> Vec<&str> {
        self.description
            .split("<p>")
            .flat_map(|chunk| chunk.split("</p>"))
            .map(str::trim)
            .filter(|paragraph| !paragraph.is_empty())
            .collect()
    }
}

/// Serde adapter for `published_at`
///
/// json-server documents carry offset-less timestamps ("2021-01-22 19:07:00");
/// those are read as UTC. RFC 3339 values are accepted as well.
mod published_at {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

    pub(super) fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
            return Some(timestamp.with_timezone(&Utc));
        }

        NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
            .map(|naive| naive.and_utc())
    }

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid published_at timestamp: {raw}"))
        })
    }
}
