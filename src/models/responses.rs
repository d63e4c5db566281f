// Raw provider response shapes
//
// Every field is lenient: providers omit keys and change types between items,
// and a single odd field must never reject the item or the batch.
use crate::models::track::ProviderTag;
use crate::utils::errors::MalformedItemError;
use crate::utils::json::{lenient, lenient_text, lenient_u64};
use serde::Deserialize;
use serde_json::Value;

/// Primary catalog search envelope: `{ "data": { "results": [...] } }`
#[derive(Debug, Default, Deserialize)]
pub struct PrimarySearchResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub data: PrimarySearchData,
}

#[derive(Debug, Default, Deserialize)]
pub struct PrimarySearchData {
    #[serde(default, deserialize_with = "lenient")]
    pub results: Vec<Value>,
}

/// Secondary catalog envelope (search and lookup): `{ "results": [...] }`
#[derive(Debug, Default, Deserialize)]
pub struct SecondaryResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub results: Vec<Value>,
}

impl PrimarySearchResponse {
    pub fn items(body: Value) -> Vec<Value> {
        serde_json::from_value::<Self>(body)
            .unwrap_or_default()
            .data
            .results
    }
}

impl SecondaryResponse {
    pub fn items(body: Value) -> Vec<Value> {
        serde_json::from_value::<Self>(body)
            .unwrap_or_default()
            .results
    }
}

/// Primary catalog song item
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimarySong {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    /// Flat artist string; presence matters even when empty
    #[serde(default, deserialize_with = "lenient")]
    pub primary_artists: Option<Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub artists: Option<PrimaryArtists>,
    #[serde(default, deserialize_with = "lenient")]
    pub album: Option<AlbumField>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub duration: u64,
    #[serde(default, deserialize_with = "lenient")]
    pub image: Option<MediaField>,
    #[serde(default, deserialize_with = "lenient")]
    pub download_url: Option<MediaField>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub url: String,
    /// Distinguishes a missing `url` key from an empty one
    #[serde(skip)]
    pub has_url: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct PrimaryArtists {
    #[serde(default, deserialize_with = "lenient")]
    pub primary: Vec<PrimaryArtist>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PrimaryArtist {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
}

/// `album` arrives either as a plain name or as an object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum AlbumField {
    Named { name: Value },
    Plain(String),
    Other(Value),
}

/// Image and download-link fields: a quality-ordered list or a single URL
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MediaField {
    Variants(Vec<MediaVariant>),
    Single(String),
    Other(Value),
}

/// One quality variant: `{ "quality": .., "url" | "link": .. }` or a bare URL
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MediaVariant {
    Url { url: Value },
    Link { link: Value },
    Plain(String),
    Other(Value),
}

/// Secondary catalog (preview clip) track item
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecondaryTrack {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub track_id: u64,
    #[serde(default, deserialize_with = "lenient_text")]
    pub track_name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub artist_name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub collection_name: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub track_time_millis: u64,
    #[serde(default, deserialize_with = "lenient_text")]
    pub artwork_url100: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub preview_url: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub primary_genre_name: String,
}

/// Provider item decoded into its provider's shape
#[derive(Debug)]
pub enum RawItem {
    Primary(PrimarySong),
    Secondary(SecondaryTrack),
}

impl RawItem {
    /// Decode one raw item. Fails only when the item is not a JSON object.
    pub fn decode(provider: ProviderTag, item: Value) -> Result<Self, MalformedItemError> {
        if !item.is_object() {
            return Err(MalformedItemError {
                provider: provider.name(),
                reason: format!("expected object, got {}", kind_of(&item)),
            });
        }

        let malformed = |e: serde_json::Error| MalformedItemError {
            provider: provider.name(),
            reason: e.to_string(),
        };

        match provider {
            ProviderTag::Primary => {
                let has_url = item.get("url").is_some();
                let mut song: PrimarySong = serde_json::from_value(item).map_err(malformed)?;
                song.has_url = has_url;
                Ok(RawItem::Primary(song))
            }
            ProviderTag::Secondary => serde_json::from_value(item)
                .map(RawItem::Secondary)
                .map_err(malformed),
        }
    }

    /// All-default item for the provider, used when an item cannot be read
    pub fn empty(provider: ProviderTag) -> Self {
        match provider {
            ProviderTag::Primary => RawItem::Primary(PrimarySong::default()),
            ProviderTag::Secondary => RawItem::Secondary(SecondaryTrack::default()),
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn primary_envelope_without_results_is_empty() {
        assert!(PrimarySearchResponse::items(json!({"status": "SUCCESS"})).is_empty());
        assert!(PrimarySearchResponse::items(json!({"data": {"results": "none"}})).is_empty());
        assert!(PrimarySearchResponse::items(json!([1, 2])).is_empty());
    }

    #[test]
    fn secondary_envelope_reads_results() {
        let items = SecondaryResponse::items(json!({"resultCount": 2, "results": [{}, {}]}));
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn non_object_item_is_malformed() {
        let err = RawItem::decode(ProviderTag::Primary, json!("just a string")).unwrap_err();
        assert_eq!(err.provider, "primary");
        assert!(err.reason.contains("string"));
    }

    #[test]
    fn album_shapes_decode() {
        let song = match RawItem::decode(ProviderTag::Primary, json!({"album": {"name": "Master"}})) {
            Ok(RawItem::Primary(song)) => song,
            other => panic!("unexpected {:?}", other),
        };
        assert!(matches!(song.album, Some(AlbumField::Named { .. })));

        let song = match RawItem::decode(ProviderTag::Primary, json!({"album": "Master"})) {
            Ok(RawItem::Primary(song)) => song,
            other => panic!("unexpected {:?}", other),
        };
        assert!(matches!(song.album, Some(AlbumField::Plain(ref s)) if s == "Master"));
    }

    #[test]
    fn url_presence_is_tracked() {
        let song = match RawItem::decode(ProviderTag::Primary, json!({"url": "https://x/a.mp3"})) {
            Ok(RawItem::Primary(song)) => song,
            other => panic!("unexpected {:?}", other),
        };
        assert!(song.has_url);

        let song = match RawItem::decode(ProviderTag::Primary, json!({})) {
            Ok(RawItem::Primary(song)) => song,
            other => panic!("unexpected {:?}", other),
        };
        assert!(!song.has_url);
    }

    #[test]
    fn secondary_numeric_fields_tolerate_strings() {
        let track = match RawItem::decode(
            ProviderTag::Secondary,
            json!({"trackId": "1440841450", "trackTimeMillis": null}),
        ) {
            Ok(RawItem::Secondary(track)) => track,
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(track.track_id, 1440841450);
        assert_eq!(track.track_time_millis, 0);
    }
}
