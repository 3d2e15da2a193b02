use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local, Utc};
use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::ranking::{RankingEntry, RankingError, RankingStore};

pub struct SqliteRankingStore {
    pool: SqlitePool,
    path: Option<PathBuf>,
}

#[derive(sqlx::FromRow)]
struct RankingRow {
    game_type: String,
    student_id: String,
    player_name: String,
    score: i64,
    elapsed_time: f64,
    timestamp: DateTime<Utc>,
}

impl From<RankingRow> for RankingEntry {
    fn from(row: RankingRow) -> Self {
        Self {
            category: row.game_type,
            player_id: row.student_id,
            player_name: row.player_name,
            score: u32::try_from(row.score).unwrap_or_default(),
            elapsed_secs: row.elapsed_time,
            timestamp: row.timestamp,
        }
    }
}

impl SqliteRankingStore {
    /// Opens (creating if needed) the database file at `path`.
    pub async fn open(path: &Path) -> Result<Self, RankingError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        Self::init(pool, Some(path.to_path_buf())).await
    }

    pub async fn in_memory() -> Result<Self, RankingError> {
        // Every connection to :memory: is a separate database, so keep exactly one alive
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect("sqlite::memory:")
            .await?;
        Self::init(pool, None).await
    }

    async fn init(pool: SqlitePool, path: Option<PathBuf>) -> Result<Self, RankingError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS ranking (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                game_type TEXT NOT NULL,
                student_id TEXT NOT NULL,
                player_name TEXT NOT NULL,
                score INTEGER NOT NULL,
                elapsed_time REAL NOT NULL,
                timestamp DATETIME NOT NULL
            )
        "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool, path })
    }
}

#[async_trait]
impl RankingStore for SqliteRankingStore {
    async fn insert(&self, entry: &RankingEntry) -> Result<(), RankingError> {
        sqlx::query(
            "INSERT INTO ranking (game_type, student_id, player_name, score, elapsed_time, timestamp)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&entry.category)
        .bind(&entry.player_id)
        .bind(&entry.player_name)
        .bind(i64::from(entry.score))
        .bind(entry.elapsed_secs)
        .bind(entry.timestamp)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn top(&self, category: &str, limit: usize) -> Result<Vec<RankingEntry>, RankingError> {
        let rows: Vec<RankingRow> = sqlx::query_as(
            "SELECT game_type, student_id, player_name, score, elapsed_time, timestamp
             FROM ranking
             WHERE game_type = ?
             ORDER BY score DESC, elapsed_time ASC, id ASC
             LIMIT ?",
        )
        .bind(category)
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(RankingEntry::from).collect())
    }

    async fn all(&self, category: &str) -> Result<Vec<RankingEntry>, RankingError> {
        let rows: Vec<RankingRow> = sqlx::query_as(
            "SELECT game_type, student_id, player_name, score, elapsed_time, timestamp
             FROM ranking
             WHERE game_type = ?
             ORDER BY elapsed_time ASC, id ASC",
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(RankingEntry::from).collect())
    }

    async fn backup(&self, dir: &Path) -> Result<Option<PathBuf>, RankingError> {
        if self.path.is_none() {
            return Ok(None);
        }

        tokio::fs::create_dir_all(dir).await?;
        let target = dir.join(format!("{}.db", Local::now().format("%Y-%m-%d")));
        if tokio::fs::metadata(&target).await.is_ok() {
            return Ok(None);
        }

        // VACUUM INTO gives a consistent snapshot even with a WAL journal
        sqlx::query("VACUUM INTO ?")
            .bind(target.to_string_lossy().into_owned())
            .execute(&self.pool)
            .await?;
        info!("Ranking database backed up to {}", target.display());
        Ok(Some(target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::tests::entry;

    #[tokio::test]
    async fn top_uses_score_then_time() {
        let store = SqliteRankingStore::in_memory().await.unwrap();
        for (name, score, secs) in [("a", 5, 10.0), ("b", 9, 40.0), ("c", 9, 35.0), ("d", 2, 5.0)] {
            store.insert(&entry("화학식 게임", name, score, secs)).await.unwrap();
        }
        store.insert(&entry("주기율표 게임", "e", 10, 1.0)).await.unwrap();

        let top = store.top("화학식 게임", 2).await.unwrap();
        let names: Vec<&str> = top.iter().map(|e| e.player_name.as_str()).collect();
        assert_eq!(names, vec!["c", "b"]);
        assert_eq!(top[0].score, 9);
        assert_eq!(top[0].elapsed_secs, 35.0);
    }

    #[tokio::test]
    async fn entries_round_trip_through_the_table() {
        let store = SqliteRankingStore::in_memory().await.unwrap();
        let original = entry("주기율표 게임", "하늘", 7, 63.25);
        store.insert(&original).await.unwrap();

        let all = store.all("주기율표 게임").await.unwrap();
        assert_eq!(all, vec![original]);
    }

    #[tokio::test]
    async fn all_is_fastest_first() {
        let store = SqliteRankingStore::in_memory().await.unwrap();
        store.insert(&entry("화학식 게임", "slow", 10, 80.0)).await.unwrap();
        store.insert(&entry("화학식 게임", "fast", 1, 8.0)).await.unwrap();

        let names: Vec<String> = store
            .all("화학식 게임")
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.player_name)
            .collect();
        assert_eq!(names, vec!["fast", "slow"]);
    }

    #[tokio::test]
    async fn file_store_persists_and_backs_up_once_a_day() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("ranking.db");
        let backup_dir = dir.path().join("db_backup");

        let store = SqliteRankingStore::open(&db_path).await.unwrap();
        store.insert(&entry("화학식 게임", "a", 4, 12.0)).await.unwrap();

        let backup = store.backup(&backup_dir).await.unwrap().expect("first backup of the day");
        assert!(backup.exists());
        assert_eq!(store.backup(&backup_dir).await.unwrap(), None);

        let restored = SqliteRankingStore::open(&backup).await.unwrap();
        assert_eq!(restored.all("화학식 게임").await.unwrap().len(), 1);

        let reopened = SqliteRankingStore::open(&db_path).await.unwrap();
        assert_eq!(reopened.top("화학식 게임", 10).await.unwrap()[0].player_name, "a");
    }

    #[tokio::test]
    async fn in_memory_store_skips_backup() {
        let store = SqliteRankingStore::in_memory().await.unwrap();
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(store.backup(dir.path()).await.unwrap(), None);
    }
}
