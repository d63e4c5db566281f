//! Record normalizer - maps raw provider items onto the canonical `Track`
//!
//! Provider-specific heuristics live here and nowhere else. Raw JSON is always
//! decoded into its provider shape first (`RawItem`), never straight into `Track`.
//! Missing or mistyped fields degrade to `""`, `0` or `false`.

use crate::constants::{
    ARTWORK_HIGH_RES_TOKEN, ARTWORK_LOW_RES_TOKEN, AUDIO_FILE_EXTENSIONS, PREVIEW_SUFFIX,
    PRIMARY_GENRE, PRIMARY_PLAYS_SPREAD, SECONDARY_PLAYS_SPREAD, SYNTHETIC_PLAYS_BASE,
    UNKNOWN_ARTIST,
};
use crate::models::responses::{
    AlbumField, MediaField, MediaVariant, PrimarySong, SecondaryTrack,
};
use crate::models::{ProviderTag, RawItem, Track, TrackOrigin};
use crate::utils::hashing::stable_id;
use crate::utils::json::text_of;
use rand::Rng;
use serde_json::Value;

/// Normalize one raw provider item. Never fails: unreadable items become all-default tracks.
pub fn normalize<R: Rng>(provider: ProviderTag, item: Value, rng: &mut R) -> Track {
    let raw = match RawItem::decode(provider, item) {
        Ok(raw) => raw,
        Err(e) => {
            log::debug!("[Normalizer] {}, using defaults", e);
            RawItem::empty(provider)
        }
    };

    match raw {
        RawItem::Primary(song) => from_primary(song, rng),
        RawItem::Secondary(track) => from_secondary(track, rng),
    }
}

/// Normalize a whole batch, preserving provider order
pub fn normalize_all<R: Rng>(
    provider: ProviderTag,
    items: Vec<Value>,
    rng: &mut R,
) -> Vec<Track> {
    items
        .into_iter()
        .map(|item| normalize(provider, item, &mut *rng))
        .collect()
}

fn from_primary<R: Rng>(song: PrimarySong, rng: &mut R) -> Track {
    let artist_name = primary_artist(&song);
    let album_name = match &song.album {
        Some(AlbumField::Named { name }) => text_of(name),
        Some(AlbumField::Plain(name)) => name.clone(),
        Some(AlbumField::Other(other)) => text_of(other),
        None => String::new(),
    };

    let cover_image_url = song.image.as_ref().map(pick_media_url).unwrap_or_default();

    let audio_url = match &song.download_url {
        Some(MediaField::Variants(variants)) => pick_last(variants),
        _ if song.has_url && is_audio_file(&song.url) => song.url.clone(),
        _ => String::new(),
    };

    Track {
        id: stable_id(&song.id),
        external_id: song.id,
        title: song.name,
        artist_name,
        album_name,
        genre: PRIMARY_GENRE.to_string(),
        duration_seconds: clamp_u32(song.duration),
        audio_url,
        video_url: String::new(),
        cover_image_url,
        plays: synthetic_plays(rng, PRIMARY_PLAYS_SPREAD),
        liked: false,
        featured: false,
        origin: TrackOrigin::Provider(ProviderTag::Primary),
    }
}

/// Flat `primaryArtists` wins, then the first nested primary artist
fn primary_artist(song: &PrimarySong) -> String {
    if let Some(flat) = &song.primary_artists {
        return text_of(flat);
    }
    song.artists
        .as_ref()
        .and_then(|artists| artists.primary.first())
        .map(|artist| artist.name.clone())
        .unwrap_or_else(|| UNKNOWN_ARTIST.to_string())
}

/// Image field: last variant of a list (ascending quality), or a bare URL
fn pick_media_url(field: &MediaField) -> String {
    match field {
        MediaField::Variants(variants) => pick_last(variants),
        MediaField::Single(url) => url.clone(),
        MediaField::Other(_) => String::new(),
    }
}

fn pick_last(variants: &[MediaVariant]) -> String {
    match variants.last() {
        Some(MediaVariant::Url { url }) => text_of(url),
        Some(MediaVariant::Link { link }) => text_of(link),
        Some(MediaVariant::Plain(url)) => url.clone(),
        Some(MediaVariant::Other(_)) | None => String::new(),
    }
}

fn is_audio_file(url: &str) -> bool {
    AUDIO_FILE_EXTENSIONS.iter().any(|ext| url.ends_with(ext))
}

fn from_secondary<R: Rng>(track: SecondaryTrack, rng: &mut R) -> Track {
    Track {
        // Native ids are used as-is and may collide with local ids; out-of-range ids read as 0
        id: i64::try_from(track.track_id).unwrap_or(0),
        external_id: track.track_id.to_string(),
        title: format!("{}{}", track.track_name, PREVIEW_SUFFIX),
        artist_name: track.artist_name,
        album_name: track.collection_name,
        genre: track.primary_genre_name,
        duration_seconds: clamp_u32(track.track_time_millis / 1000),
        audio_url: track.preview_url,
        video_url: String::new(),
        cover_image_url: track
            .artwork_url100
            .replace(ARTWORK_LOW_RES_TOKEN, ARTWORK_HIGH_RES_TOKEN),
        plays: synthetic_plays(rng, SECONDARY_PLAYS_SPREAD),
        liked: false,
        featured: false,
        origin: TrackOrigin::Provider(ProviderTag::Secondary),
    }
}

/// Placeholder play count, never authoritative
fn synthetic_plays<R: Rng>(rng: &mut R, spread: u64) -> u64 {
    SYNTHETIC_PLAYS_BASE + rng.random_range(0..spread)
}

fn clamp_u32(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
