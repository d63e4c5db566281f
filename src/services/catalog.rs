//! Catalog service - merges the local catalog with remote provider results
//!
//! Search and trending return local tracks first, then remote ones, with no
//! re-sorting and no de-duplication across the two sources. Aggregation paths
//! only read; the local store is mutated solely by the explicit play/like/add
//! operations, which never touch provider-sourced tracks.
use crate::constants::LOCAL_TRENDING_LIMIT;
use crate::data::LocalStore;
use crate::models::Track;
use crate::services::aggregator::FallbackAggregator;
use crate::utils::errors::StoreError;
use std::sync::Arc;

pub struct CatalogService {
    store: Arc<dyn LocalStore>,
    aggregator: FallbackAggregator,
}

impl CatalogService {
    pub fn new(store: Arc<dyn LocalStore>, aggregator: FallbackAggregator) -> Self {
        Self { store, aggregator }
    }

    /// Local substring matches followed by remote search results
    pub async fn search(&self, query: &str) -> Vec<Track> {
        let needle = query.to_string();
        let mut tracks = local_or_empty(
            self.with_store(move |store| store.find_by_substring(&needle)).await,
            "search",
        );
        let local_count = tracks.len();
        tracks.extend(self.aggregator.search(query).await);

        log::info!(
            "[Catalog] Search '{}': {} local + {} remote",
            query,
            local_count,
            tracks.len() - local_count
        );
        tracks
    }

    /// Top local tracks by plays followed by remote trending
    pub async fn trending(&self) -> Vec<Track> {
        let mut tracks = local_or_empty(
            self.with_store(|store| store.find_top_by_plays_desc(LOCAL_TRENDING_LIMIT))
                .await,
            "trending",
        );
        tracks.extend(self.aggregator.trending().await);
        tracks
    }

    /// Local store first, then the remote lookup
    pub async fn lookup_by_id(&self, id: i64) -> Option<Track> {
        match self.with_store(move |store| store.find_by_id(id)).await {
            Ok(Some(track)) => return Some(track),
            Ok(None) => {}
            Err(e) => log::warn!("[Catalog] Local lookup of {} failed: {}", id, e),
        }
        self.aggregator.lookup_by_id(id).await
    }

    pub fn all_tracks(&self) -> Vec<Track> {
        local_or_empty(self.store.find_all(), "all")
    }

    pub fn featured(&self) -> Vec<Track> {
        local_or_empty(self.store.find_featured(), "featured")
    }

    pub fn liked(&self) -> Vec<Track> {
        local_or_empty(self.store.find_liked(), "liked")
    }

    pub fn by_genre(&self, genre: &str) -> Vec<Track> {
        local_or_empty(self.store.find_by_genre(genre), "genre")
    }

    pub fn genres(&self) -> Vec<String> {
        local_or_empty(self.store.find_genres(), "genres")
    }

    /// Count one play of a local track
    pub fn increment_plays(&self, id: i64) -> Result<Option<Track>, StoreError> {
        let track = self.store.increment_plays(id)?;
        if track.is_none() {
            log::debug!("[Catalog] No local track {}", id);
        }
        Ok(track)
    }

    /// Flip the liked flag of a local track
    pub fn toggle_like(&self, id: i64) -> Result<Option<Track>, StoreError> {
        let track = self.store.toggle_like(id)?;
        if track.is_none() {
            log::debug!("[Catalog] No local track {}", id);
        }
        Ok(track)
    }

    /// Persist a new local track under a store-assigned id
    pub fn add_local(&self, track: &Track) -> Result<Track, StoreError> {
        self.store.insert(track)
    }

    // rusqlite blocks, keep it off the async worker threads
    async fn with_store<T, F>(&self, work: F) -> Result<T, StoreError>
    where
        F: FnOnce(&dyn LocalStore) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || work(store.as_ref())).await?
    }
}

fn local_or_empty<T>(result: Result<Vec<T>, StoreError>, context: &str) -> Vec<T> {
    result.unwrap_or_else(|e| {
        log::warn!("[Catalog] Local {} query failed: {}", context, e);
        Vec::new()
    })
}
