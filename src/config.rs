use std::path::PathBuf;
use std::str::FromStr;

use chrono::FixedOffset;

use crate::ranking::SavePolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingBackend {
    Sqlite,
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub dialogue_db_path: PathBuf,
    pub ranking_backend: RankingBackend,
    pub ranking_db_path: PathBuf,
    pub backup_dir: PathBuf,
    pub ranking_limit: usize,
    pub save_policy: SavePolicy,
    /// Choices offered on the question-count keyboard.
    pub question_counts: Vec<usize>,
    pub export_offset: FixedOffset,
    pub custom_dataset: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
#[error("invalid value {value:?} for {key}: {reason}")]
pub struct ConfigError {
    key: &'static str,
    value: String,
    reason: String,
}

impl ConfigError {
    fn new(key: &'static str, value: &str, reason: impl ToString) -> Self {
        Self {
            key,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl Config {
    /// Reads the process environment. Call `dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let ranking_backend = match text("RANKING_STORE", "sqlite").as_str() {
            "sqlite" => RankingBackend::Sqlite,
            "memory" => RankingBackend::Memory,
            other => {
                return Err(ConfigError::new("RANKING_STORE", other, "expected sqlite or memory"))
            }
        };

        let save_policy = match text("SAVE_POLICY", "any").as_str() {
            "any" => SavePolicy::AnyScore,
            "perfect" => SavePolicy::PerfectOnly,
            other => return Err(ConfigError::new("SAVE_POLICY", other, "expected any or perfect")),
        };

        let ranking_limit = parse::<usize>("RANKING_LIMIT", &text("RANKING_LIMIT", "10"))?;

        let raw_counts = text("QUESTION_COUNTS", "5,10,15,20");
        let question_counts = raw_counts
            .split(',')
            .map(|count| parse::<usize>("QUESTION_COUNTS", count.trim()))
            .collect::<Result<Vec<_>, _>>()?;
        if question_counts.is_empty() || question_counts.contains(&0) {
            return Err(ConfigError::new(
                "QUESTION_COUNTS",
                &raw_counts,
                "counts must be positive",
            ));
        }

        let raw_offset = text("EXPORT_UTC_OFFSET_HOURS", "9");
        let offset_hours = parse::<i32>("EXPORT_UTC_OFFSET_HOURS", &raw_offset)?;
        let export_offset = FixedOffset::east_opt(offset_hours * 3600).ok_or_else(|| {
            ConfigError::new("EXPORT_UTC_OFFSET_HOURS", &raw_offset, "offset out of range")
        })?;

        Ok(Self {
            dialogue_db_path: text("DIALOGUE_DB_PATH", "db.sqlite").into(),
            ranking_backend,
            ranking_db_path: text("RANKING_DB_PATH", "ranking.db").into(),
            backup_dir: text("RANKING_BACKUP_DIR", "db_backup").into(),
            ranking_limit,
            save_policy,
            question_counts,
            export_offset,
            custom_dataset: lookup("QUIZ_DATASET_PATH")
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
        })
    }
}

fn parse<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
{
    value.parse().map_err(|e| ConfigError::new(key, value, e))
}
