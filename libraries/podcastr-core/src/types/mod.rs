mod episode;
mod ids;

pub use episode::{Episode, EpisodeMedia};
pub use ids::EpisodeId;
