//! Fallback aggregator - drives the provider clients and the normalizer
//!
//! Per query: try the primary provider, and only after it has observably
//! failed try the secondary one. Calls are sequential, one round trip each,
//! with no caching and no retry. Provider failures are logged and absorbed;
//! callers always get a (possibly empty) list or a found/not-found answer.

use crate::api::{ProviderClient, ProviderRequest};
use crate::constants::DEFAULT_TRENDING_SEED_QUERY;
use crate::models::{PrimarySearchResponse, ProviderTag, SecondaryResponse, Track};
use crate::services::normalizer::{normalize, normalize_all};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;
use std::sync::Arc;

/// Source of randomness for synthetic play counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaySeed {
    /// Fresh OS entropy for every query
    #[default]
    Entropy,
    /// Same seed for every query, for reproducible output
    Fixed(u64),
}

impl PlaySeed {
    fn rng(&self) -> StdRng {
        match self {
            PlaySeed::Entropy => StdRng::from_os_rng(),
            PlaySeed::Fixed(seed) => StdRng::seed_from_u64(*seed),
        }
    }
}

pub struct FallbackAggregator {
    primary: Arc<dyn ProviderClient>,
    secondary: Arc<dyn ProviderClient>,
    trending_seed: String,
    play_seed: PlaySeed,
}

impl FallbackAggregator {
    pub fn new(primary: Arc<dyn ProviderClient>, secondary: Arc<dyn ProviderClient>) -> Self {
        Self {
            primary,
            secondary,
            trending_seed: DEFAULT_TRENDING_SEED_QUERY.to_string(),
            play_seed: PlaySeed::default(),
        }
    }

    pub fn with_trending_seed(mut self, query: impl Into<String>) -> Self {
        self.trending_seed = query.into();
        self
    }

    pub fn with_play_seed(mut self, seed: PlaySeed) -> Self {
        self.play_seed = seed;
        self
    }

    /// Primary search, falling back to the secondary provider on transport failure.
    pub async fn search(&self, query: &str) -> Vec<Track> {
        let request = ProviderRequest::Search(query.to_string());

        match self.primary.fetch(&request).await {
            Ok(body) => {
                let tracks = self.normalize_body(self.primary.tag(), body);
                log::info!("[Aggregator] {} results for '{}' from {}", tracks.len(), query, self.primary.tag());
                return tracks;
            }
            Err(e) => {
                log::warn!(
                    "[Aggregator] {} search failed for '{}': {}, falling back to {}",
                    self.primary.tag(),
                    query,
                    e,
                    self.secondary.tag()
                );
            }
        }

        match self.secondary.fetch(&request).await {
            Ok(body) => {
                let tracks = self.normalize_body(self.secondary.tag(), body);
                log::info!("[Aggregator] {} fallback results for '{}'", tracks.len(), query);
                tracks
            }
            Err(e) => {
                log::warn!("[Aggregator] {} search failed for '{}': {}", self.secondary.tag(), query, e);
                Vec::new()
            }
        }
    }

    /// Seeded primary search. No fallback: a failure yields an empty list.
    pub async fn trending(&self) -> Vec<Track> {
        let request = ProviderRequest::TrendingSeed(self.trending_seed.clone());

        match self.primary.fetch(&request).await {
            Ok(body) => {
                let tracks = self.normalize_body(self.primary.tag(), body);
                log::debug!("[Aggregator] {} trending tracks from {}", tracks.len(), self.primary.tag());
                tracks
            }
            Err(e) => {
                log::warn!("[Aggregator] {} trending failed: {}", self.primary.tag(), e);
                Vec::new()
            }
        }
    }

    /// Single-track lookup against the secondary provider only.
    pub async fn lookup_by_id(&self, id: i64) -> Option<Track> {
        let request = ProviderRequest::LookupById(id);

        let body = match self.secondary.fetch(&request).await {
            Ok(body) => body,
            Err(e) => {
                log::warn!("[Aggregator] {} lookup failed for {}: {}", self.secondary.tag(), id, e);
                return None;
            }
        };

        let first = envelope_items(self.secondary.tag(), body).into_iter().next();
        if first.is_none() {
            log::debug!("[Aggregator] No {} track with id {}", self.secondary.tag(), id);
        }
        first.map(|item| normalize(self.secondary.tag(), item, &mut self.play_seed.rng()))
    }

    fn normalize_body(&self, provider: ProviderTag, body: Value) -> Vec<Track> {
        normalize_all(provider, envelope_items(provider, body), &mut self.play_seed.rng())
    }
}

/// Pull the item list out of a provider's response envelope
fn envelope_items(provider: ProviderTag, body: Value) -> Vec<Value> {
    match provider {
        ProviderTag::Primary => PrimarySearchResponse::items(body),
        ProviderTag::Secondary => SecondaryResponse::items(body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fakes::FakeProvider;
    use crate::models::TrackOrigin;
    use serde_json::json;

    fn primary_body() -> Value {
        json!({"data": {"results": [
            {"id": "p1", "name": "Arabic Kuthu", "primaryArtists": "Anirudh"},
            {"id": "p2", "name": "Jimikki Ponnu", "primaryArtists": "Thaman S"}
        ]}})
    }

    fn secondary_body() -> Value {
        json!({"resultCount": 2, "results": [
            {"trackId": 11, "trackName": "Munbe Vaa", "trackTimeMillis": 360000},
            {"trackId": 12, "trackName": "Nenjukkul Peidhidum", "trackTimeMillis": 250500}
        ]})
    }

    fn aggregator(primary: &Arc<FakeProvider>, secondary: &Arc<FakeProvider>) -> FallbackAggregator {
        FallbackAggregator::new(primary.clone(), secondary.clone()).with_play_seed(PlaySeed::Fixed(1))
    }

    #[tokio::test]
    async fn search_uses_primary_when_it_answers() {
        let primary = Arc::new(FakeProvider::answering(ProviderTag::Primary, primary_body()));
        let secondary = Arc::new(FakeProvider::answering(ProviderTag::Secondary, secondary_body()));

        let tracks = aggregator(&primary, &secondary).search("kuthu").await;

        let titles: Vec<_> = tracks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Arabic Kuthu", "Jimikki Ponnu"]);
        assert_eq!(primary.calls(), vec![ProviderRequest::Search("kuthu".into())]);
        assert!(secondary.calls().is_empty());
    }

    #[tokio::test]
    async fn search_falls_back_to_secondary_on_failure() {
        let primary = Arc::new(FakeProvider::failing(ProviderTag::Primary));
        let secondary = Arc::new(FakeProvider::answering(ProviderTag::Secondary, secondary_body()));

        let tracks = aggregator(&primary, &secondary).search("x").await;

        let expected = normalize_all(
            ProviderTag::Secondary,
            SecondaryResponse::items(secondary_body()),
            &mut PlaySeed::Fixed(1).rng(),
        );
        assert_eq!(tracks, expected);
        assert!(tracks.iter().all(|t| t.origin == TrackOrigin::Provider(ProviderTag::Secondary)));
        assert_eq!(secondary.calls(), vec![ProviderRequest::Search("x".into())]);
    }

    #[tokio::test]
    async fn search_with_both_providers_down_is_empty() {
        let primary = Arc::new(FakeProvider::failing(ProviderTag::Primary));
        let secondary = Arc::new(FakeProvider::failing(ProviderTag::Secondary));

        assert!(aggregator(&primary, &secondary).search("x").await.is_empty());
        assert_eq!(primary.calls().len(), 1);
        assert_eq!(secondary.calls().len(), 1);
    }

    #[tokio::test]
    async fn primary_answer_without_results_does_not_fall_back() {
        let primary = Arc::new(FakeProvider::answering(ProviderTag::Primary, json!({"status": "FAILED"})));
        let secondary = Arc::new(FakeProvider::answering(ProviderTag::Secondary, secondary_body()));

        assert!(aggregator(&primary, &secondary).search("x").await.is_empty());
        assert!(secondary.calls().is_empty());
    }

    #[tokio::test]
    async fn trending_uses_seed_query() {
        let primary = Arc::new(FakeProvider::answering(ProviderTag::Primary, primary_body()));
        let secondary = Arc::new(FakeProvider::answering(ProviderTag::Secondary, secondary_body()));

        let tracks = aggregator(&primary, &secondary)
            .with_trending_seed("top hits")
            .trending()
            .await;

        assert_eq!(tracks.len(), 2);
        assert_eq!(primary.calls(), vec![ProviderRequest::TrendingSeed("top hits".into())]);
    }

    #[tokio::test]
    async fn trending_has_no_fallback() {
        let primary = Arc::new(FakeProvider::failing(ProviderTag::Primary));
        let secondary = Arc::new(FakeProvider::answering(ProviderTag::Secondary, secondary_body()));

        assert!(aggregator(&primary, &secondary).trending().await.is_empty());
        assert!(secondary.calls().is_empty());
    }

    #[tokio::test]
    async fn lookup_goes_straight_to_secondary() {
        let primary = Arc::new(FakeProvider::answering(ProviderTag::Primary, primary_body()));
        let secondary = Arc::new(FakeProvider::answering(ProviderTag::Secondary, secondary_body()));

        let track = aggregator(&primary, &secondary).lookup_by_id(11).await.unwrap();

        assert_eq!(track.id, 11);
        assert_eq!(track.title, "Munbe Vaa (Preview)");
        assert_eq!(track.duration_seconds, 360);
        assert!(primary.calls().is_empty());
        assert_eq!(secondary.calls(), vec![ProviderRequest::LookupById(11)]);
    }

    #[tokio::test]
    async fn lookup_not_found_or_failed_is_none() {
        let primary = Arc::new(FakeProvider::failing(ProviderTag::Primary));
        let empty = Arc::new(FakeProvider::answering(ProviderTag::Secondary, json!({"resultCount": 0, "results": []})));
        assert!(aggregator(&primary, &empty).lookup_by_id(5).await.is_none());

        let down = Arc::new(FakeProvider::failing(ProviderTag::Secondary));
        assert!(aggregator(&primary, &down).lookup_by_id(5).await.is_none());
    }

    #[test]
    fn fixed_seed_repeats() {
        let body = primary_body();
        let a = normalize_all(ProviderTag::Primary, PrimarySearchResponse::items(body.clone()), &mut PlaySeed::Fixed(3).rng());
        let b = normalize_all(ProviderTag::Primary, PrimarySearchResponse::items(body), &mut PlaySeed::Fixed(3).rng());
        assert_eq!(a, b);
    }
}
