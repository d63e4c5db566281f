//! Local catalog storage - the system's own persisted tracks
use crate::constants::{DATA_DIR_NAME, DB_FILE_NAME};
use crate::models::Track;
use crate::utils::error_handling::safe_lock;
use crate::utils::errors::StoreError;
use rusqlite::{params, Connection, Row};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Persistence collaborator used by the catalog service.
///
/// Only local tracks are ever stored; `save` and `insert` reject provider-sourced ones.
pub trait LocalStore: Send + Sync {
    fn find_all(&self) -> Result<Vec<Track>, StoreError>;
    fn find_top_by_plays_desc(&self, limit: usize) -> Result<Vec<Track>, StoreError>;
    /// Case-insensitive substring match over title, artist and album
    fn find_by_substring(&self, query: &str) -> Result<Vec<Track>, StoreError>;
    fn find_by_id(&self, id: i64) -> Result<Option<Track>, StoreError>;
    /// Insert (id <= 0, store assigns one) or update; returns the stored track
    fn save(&self, track: &Track) -> Result<Track, StoreError>;
    /// Always a new row; any incoming id is ignored
    fn insert(&self, track: &Track) -> Result<Track, StoreError>;
    /// Atomic `plays + 1`; None when no local row has this id
    fn increment_plays(&self, id: i64) -> Result<Option<Track>, StoreError>;
    /// Atomic flip of `liked`; None when no local row has this id
    fn toggle_like(&self, id: i64) -> Result<Option<Track>, StoreError>;
    fn find_featured(&self) -> Result<Vec<Track>, StoreError>;
    fn find_liked(&self) -> Result<Vec<Track>, StoreError>;
    fn find_by_genre(&self, genre: &str) -> Result<Vec<Track>, StoreError>;
    fn find_genres(&self) -> Result<Vec<String>, StoreError>;
}

const COLUMNS: &str = "id, external_id, title, artist_name, album_name, genre, duration, \
                       audio_url, video_url, cover_image_url, plays, liked, featured";

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database file, creating parent directories as needed
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        log::info!("[Store] Opening {}", path.display());
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    /// `<data dir>/isaithalam/library.db`
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join(DATA_DIR_NAME).join(DB_FILE_NAME))
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS songs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                external_id TEXT NOT NULL DEFAULT '',
                title TEXT NOT NULL DEFAULT '',
                artist_name TEXT NOT NULL DEFAULT '',
                album_name TEXT NOT NULL DEFAULT '',
                genre TEXT NOT NULL DEFAULT '',
                duration INTEGER NOT NULL DEFAULT 0,
                audio_url TEXT NOT NULL DEFAULT '',
                video_url TEXT NOT NULL DEFAULT '',
                cover_image_url TEXT NOT NULL DEFAULT '',
                plays INTEGER NOT NULL DEFAULT 0,
                liked INTEGER NOT NULL DEFAULT 0,
                featured INTEGER NOT NULL DEFAULT 0
            )",
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_songs_plays ON songs(plays DESC)",
            [],
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn query(&self, sql: &str, args: &[&dyn rusqlite::ToSql]) -> Result<Vec<Track>, StoreError> {
        let conn = safe_lock(&self.conn, "Store");
        query_rows(&conn, sql, args)
    }

    // Update and re-read under one guard so concurrent callers never see a stale row
    fn update_and_fetch(&self, sql: &str, id: i64) -> Result<Option<Track>, StoreError> {
        let conn = safe_lock(&self.conn, "Store");
        if conn.execute(sql, params![id])? == 0 {
            return Ok(None);
        }
        let mut found = query_rows(
            &conn,
            &format!("SELECT {} FROM songs WHERE id = ?1", COLUMNS),
            &[&id as &dyn rusqlite::ToSql],
        )?;
        Ok(found.pop())
    }
}

fn query_rows(
    conn: &Connection,
    sql: &str,
    args: &[&dyn rusqlite::ToSql],
) -> Result<Vec<Track>, StoreError> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(args, row_to_track)?;

    let mut tracks = Vec::new();
    for track in rows {
        tracks.push(track?);
    }
    Ok(tracks)
}

fn insert_row(conn: &Connection, track: &Track) -> Result<i64, StoreError> {
    let plays = i64::try_from(track.plays).unwrap_or(i64::MAX);
    conn.execute(
        "INSERT INTO songs (external_id, title, artist_name, album_name, genre, duration, \
         audio_url, video_url, cover_image_url, plays, liked, featured) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            track.external_id,
            track.title,
            track.artist_name,
            track.album_name,
            track.genre,
            track.duration_seconds,
            track.audio_url,
            track.video_url,
            track.cover_image_url,
            plays,
            track.liked,
            track.featured
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

impl LocalStore for SqliteStore {
    fn find_all(&self) -> Result<Vec<Track>, StoreError> {
        self.query(&format!("SELECT {} FROM songs ORDER BY id", COLUMNS), &[])
    }

    fn find_top_by_plays_desc(&self, limit: usize) -> Result<Vec<Track>, StoreError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.query(
            &format!("SELECT {} FROM songs ORDER BY plays DESC, id LIMIT ?1", COLUMNS),
            &[&limit as &dyn rusqlite::ToSql],
        )
    }

    fn find_by_substring(&self, query: &str) -> Result<Vec<Track>, StoreError> {
        // SQLite's LOWER() is ASCII-only, match in Rust instead
        Ok(self
            .find_all()?
            .into_iter()
            .filter(|track| track.matches_query(query))
            .collect())
    }

    fn find_by_id(&self, id: i64) -> Result<Option<Track>, StoreError> {
        let mut found = self.query(
            &format!("SELECT {} FROM songs WHERE id = ?1", COLUMNS),
            &[&id as &dyn rusqlite::ToSql],
        )?;
        Ok(found.pop())
    }

    fn save(&self, track: &Track) -> Result<Track, StoreError> {
        if !track.is_local() {
            return Err(StoreError::ProviderSourced(track.id));
        }

        let plays = i64::try_from(track.plays).unwrap_or(i64::MAX);
        let conn = safe_lock(&self.conn, "Store");
        let id = if track.id > 0 {
            conn.execute(
                &format!(
                    "INSERT OR REPLACE INTO songs ({}) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                    COLUMNS
                ),
                params![
                    track.id,
                    track.external_id,
                    track.title,
                    track.artist_name,
                    track.album_name,
                    track.genre,
                    track.duration_seconds,
                    track.audio_url,
                    track.video_url,
                    track.cover_image_url,
                    plays,
                    track.liked,
                    track.featured
                ],
            )?;
            track.id
        } else {
            insert_row(&conn, track)?
        };

        log::debug!("[Store] Saved track {} '{}'", id, track.title);
        Ok(Track {
            id,
            ..track.clone()
        })
    }

    fn insert(&self, track: &Track) -> Result<Track, StoreError> {
        if !track.is_local() {
            return Err(StoreError::ProviderSourced(track.id));
        }

        let id = insert_row(&safe_lock(&self.conn, "Store"), track)?;
        log::debug!("[Store] Inserted track {} '{}'", id, track.title);
        Ok(Track {
            id,
            ..track.clone()
        })
    }

    fn increment_plays(&self, id: i64) -> Result<Option<Track>, StoreError> {
        self.update_and_fetch("UPDATE songs SET plays = plays + 1 WHERE id = ?1", id)
    }

    fn toggle_like(&self, id: i64) -> Result<Option<Track>, StoreError> {
        self.update_and_fetch(
            "UPDATE songs SET liked = CASE liked WHEN 0 THEN 1 ELSE 0 END WHERE id = ?1",
            id,
        )
    }

    fn find_featured(&self) -> Result<Vec<Track>, StoreError> {
        self.query(
            &format!("SELECT {} FROM songs WHERE featured = 1 ORDER BY id", COLUMNS),
            &[],
        )
    }

    fn find_liked(&self) -> Result<Vec<Track>, StoreError> {
        self.query(
            &format!("SELECT {} FROM songs WHERE liked = 1 ORDER BY id", COLUMNS),
            &[],
        )
    }

    fn find_by_genre(&self, genre: &str) -> Result<Vec<Track>, StoreError> {
        let wanted = genre.to_lowercase();
        Ok(self
            .find_all()?
            .into_iter()
            .filter(|track| track.genre.to_lowercase() == wanted)
            .collect())
    }

    fn find_genres(&self) -> Result<Vec<String>, StoreError> {
        let conn = safe_lock(&self.conn, "Store");
        let mut stmt =
            conn.prepare("SELECT DISTINCT genre FROM songs WHERE genre <> '' ORDER BY genre")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut genres = Vec::new();
        for genre in rows {
            genres.push(genre?);
        }
        Ok(genres)
    }
}

fn row_to_track(row: &Row) -> rusqlite::Result<Track> {
    Ok(Track {
        id: row.get(0)?,
        external_id: row.get(1)?,
        title: row.get(2)?,
        artist_name: row.get(3)?,
        album_name: row.get(4)?,
        genre: row.get(5)?,
        duration_seconds: row.get::<_, i64>(6)?.clamp(0, u32::MAX as i64) as u32,
        audio_url: row.get(7)?,
        video_url: row.get(8)?,
        cover_image_url: row.get(9)?,
        plays: row.get::<_, i64>(10)?.max(0) as u64,
        liked: row.get(11)?,
        featured: row.get(12)?,
        origin: crate::models::TrackOrigin::Local,
    })
}
