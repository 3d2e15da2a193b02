pub mod memory;
pub mod sqlite;

use std::cmp::Ordering;
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};

use crate::quiz::SessionSummary;

pub use memory::MemoryRankingStore;
pub use sqlite::SqliteRankingStore;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RankingEntry {
    pub category: String,
    pub player_id: String,
    pub player_name: String,
    pub score: u32,
    pub elapsed_secs: f64,
    pub timestamp: DateTime<Utc>,
}

impl RankingEntry {
    pub fn from_summary(
        category: impl Into<String>,
        player_id: impl Into<String>,
        player_name: impl Into<String>,
        summary: &SessionSummary,
    ) -> Self {
        Self {
            category: category.into(),
            player_id: player_id.into(),
            player_name: player_name.into(),
            score: u32::try_from(summary.score).unwrap_or(u32::MAX),
            elapsed_secs: summary.elapsed.as_secs_f64(),
            timestamp: Utc::now(),
        }
    }
}

/// Leaderboard order: higher score first, faster time breaks ties.
pub fn rank_order(a: &RankingEntry, b: &RankingEntry) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.elapsed_secs.total_cmp(&b.elapsed_secs))
}

/// Which finished sessions get written to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SavePolicy {
    #[default]
    AnyScore,
    PerfectOnly,
}

impl SavePolicy {
    pub fn allows(self, summary: &SessionSummary) -> bool {
        match self {
            SavePolicy::AnyScore => true,
            SavePolicy::PerfectOnly => summary.is_perfect(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RankingError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait RankingStore: Send + Sync {
    async fn insert(&self, entry: &RankingEntry) -> Result<(), RankingError>;

    /// Best `limit` entries of a category in [`rank_order`].
    async fn top(&self, category: &str, limit: usize) -> Result<Vec<RankingEntry>, RankingError>;

    /// Every entry of a category, fastest first.
    async fn all(&self, category: &str) -> Result<Vec<RankingEntry>, RankingError>;

    /// Copies the backing file into `dir` once per day. Returns the path of a
    /// newly written backup.
    async fn backup(&self, _dir: &Path) -> Result<Option<PathBuf>, RankingError> {
        Ok(None)
    }
}

#[derive(serde::Serialize)]
struct CsvRow<'a> {
    game_type: &'a str,
    student_id: &'a str,
    player_name: &'a str,
    score: u32,
    elapsed_time: f64,
    timestamp: String,
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Writes entries as CSV with a BOM so spreadsheet apps pick up the encoding.
/// Timestamps are shown in `offset`.
pub fn export_csv<W: Write>(
    entries: &[RankingEntry],
    offset: FixedOffset,
    mut writer: W,
) -> Result<(), RankingError> {
    writer.write_all(UTF8_BOM)?;
    let mut csv_writer = csv::Writer::from_writer(writer);
    for entry in entries {
        csv_writer.serialize(CsvRow {
            game_type: &entry.category,
            student_id: &entry.player_id,
            player_name: &entry.player_name,
            score: entry.score,
            elapsed_time: entry.elapsed_secs,
            timestamp: entry
                .timestamp
                .with_timezone(&offset)
                .format("%Y-%m-%d %H:%M:%S%:z")
                .to_string(),
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}
