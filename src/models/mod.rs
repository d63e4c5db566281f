// Canonical track record and raw provider shapes

pub mod responses;
pub mod track;

// Re-export commonly used types
pub use responses::{PrimarySearchResponse, RawItem, SecondaryResponse};
pub use track::{ProviderTag, Track, TrackOrigin};
