//! Application constants and default configuration values

// === Providers ===
pub const DEFAULT_PRIMARY_API_BASE: &str = "https://saavn.me";
pub const DEFAULT_SECONDARY_API_BASE: &str = "https://itunes.apple.com";
pub const DEFAULT_SECONDARY_SEARCH_LIMIT: u32 = 10;

// Primary provider rejects requests without a browser-like user agent
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

// === Timeouts ===
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 3;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 5;
pub const MAX_TIMEOUT_SECS: u64 = 30;

// === Trending ===
// Primary provider has no trending endpoint, a topical search stands in for it
pub const DEFAULT_TRENDING_SEED_QUERY: &str = "latest tamil";
pub const LOCAL_TRENDING_LIMIT: usize = 10;

// === Normalization ===
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const PRIMARY_GENRE: &str = "Global";
pub const PREVIEW_SUFFIX: &str = " (Preview)";
pub const ARTWORK_LOW_RES_TOKEN: &str = "100x100";
pub const ARTWORK_HIGH_RES_TOKEN: &str = "600x600";
pub const AUDIO_FILE_EXTENSIONS: [&str; 2] = [".mp3", ".m4a"];

// Synthetic play counts (placeholders, never authoritative)
pub const SYNTHETIC_PLAYS_BASE: u64 = 1000;
pub const PRIMARY_PLAYS_SPREAD: u64 = 50_000;
pub const SECONDARY_PLAYS_SPREAD: u64 = 10_000;

// === Storage ===
pub const DATA_DIR_NAME: &str = "isaithalam";
pub const DB_FILE_NAME: &str = "library.db";
