mod ids;
mod metadata;
mod playback_state;
mod track;

pub use ids::TrackId;
pub use metadata::TrackMetadata;
pub use playback_state::{progress_ratio, PlaybackState, PlaybackStatus};
pub use track::{Chapter, Track};
