use serde::{Deserialize, Serialize};
use std::fmt;

/// Which remote catalog a provider-sourced track came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderTag {
    Primary,
    Secondary,
}

impl ProviderTag {
    pub fn name(&self) -> &'static str {
        match self {
            ProviderTag::Primary => "primary",
            ProviderTag::Secondary => "secondary",
        }
    }
}

impl fmt::Display for ProviderTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Local tracks are persisted and authoritative; provider tracks are rebuilt per query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackOrigin {
    #[default]
    Local,
    #[serde(untagged)]
    Provider(ProviderTag),
}

/// Canonical, provider-agnostic track record.
///
/// Field names on the wire follow the legacy web front-end.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Track {
    pub id: i64,
    pub external_id: String,
    pub title: String,
    pub artist_name: String,
    pub album_name: String,
    pub genre: String,
    #[serde(rename = "duration")]
    pub duration_seconds: u32,
    pub audio_url: String,
    pub video_url: String,
    pub cover_image_url: String,
    /// Synthetic placeholder for provider tracks
    pub plays: u64,
    pub liked: bool,
    pub featured: bool,
    #[serde(rename = "source")]
    pub origin: TrackOrigin,
}

impl Track {
    pub fn is_local(&self) -> bool {
        self.origin == TrackOrigin::Local
    }

    /// Case-insensitive substring match over title, artist and album
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        [&self.title, &self.artist_name, &self.album_name]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_with_legacy_field_names() {
        let track = Track {
            id: 7,
            title: "Vaathi Coming".into(),
            duration_seconds: 229,
            origin: TrackOrigin::Provider(ProviderTag::Secondary),
            ..Default::default()
        };

        let value = serde_json::to_value(&track).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["duration"], 229);
        assert_eq!(value["artistName"], "");
        assert_eq!(value["coverImageUrl"], "");
        assert_eq!(value["source"], "secondary");
        assert!(value.get("durationSeconds").is_none());
    }

    #[test]
    fn local_origin_round_trips_as_text() {
        let value = serde_json::to_value(Track::default()).unwrap();
        assert_eq!(value["source"], "local");

        let parsed: Track = serde_json::from_value(json!({"title": "X", "source": "local"})).unwrap();
        assert!(parsed.is_local());
    }

    #[test]
    fn import_without_source_is_local() {
        let parsed: Track = serde_json::from_value(json!({"title": "Kannaana Kanney"})).unwrap();
        assert!(parsed.is_local());
        assert_eq!(parsed.plays, 0);
    }

    #[test]
    fn query_match_ignores_case() {
        let track = Track {
            title: "Rowdy Baby".into(),
            artist_name: "Dhanush".into(),
            album_name: "Maari 2".into(),
            ..Default::default()
        };
        assert!(track.matches_query("rowdy"));
        assert!(track.matches_query("DHANUSH"));
        assert!(track.matches_query("aari"));
        assert!(!track.matches_query("anirudh"));
    }
}
