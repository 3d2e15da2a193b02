use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::ranking::{rank_order, RankingEntry, RankingError, RankingStore};

/// Keeps the table for the lifetime of the process only.
#[derive(Debug, Default)]
pub struct MemoryRankingStore {
    entries: RwLock<Vec<RankingEntry>>,
}

impl MemoryRankingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RankingStore for MemoryRankingStore {
    async fn insert(&self, entry: &RankingEntry) -> Result<(), RankingError> {
        self.entries.write().await.push(entry.clone());
        Ok(())
    }

    async fn top(&self, category: &str, limit: usize) -> Result<Vec<RankingEntry>, RankingError> {
        let mut ranked = self.all(category).await?;
        ranked.sort_by(rank_order);
        ranked.truncate(limit);
        Ok(ranked)
    }

    async fn all(&self, category: &str) -> Result<Vec<RankingEntry>, RankingError> {
        let mut matching: Vec<RankingEntry> = self
            .entries
            .read()
            .await
            .iter()
            .filter(|e| e.category == category)
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.elapsed_secs.total_cmp(&b.elapsed_secs));
        Ok(matching)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::tests::entry;

    #[tokio::test]
    async fn top_is_ranked_and_truncated() {
        let store = MemoryRankingStore::new();
        for (name, score, secs) in [("a", 5, 10.0), ("b", 9, 40.0), ("c", 9, 35.0), ("d", 2, 5.0)] {
            store.insert(&entry("화학식 게임", name, score, secs)).await.unwrap();
        }

        let top = store.top("화학식 게임", 3).await.unwrap();
        let names: Vec<&str> = top.iter().map(|e| e.player_name.as_str()).collect();
        assert_eq!(names, vec!["c", "b", "a"]);
    }

    #[tokio::test]
    async fn categories_are_isolated() {
        let store = MemoryRankingStore::new();
        store.insert(&entry("화학식 게임", "a", 5, 10.0)).await.unwrap();
        store.insert(&entry("주기율표 게임", "b", 6, 12.0)).await.unwrap();

        assert_eq!(store.all("화학식 게임").await.unwrap().len(), 1);
        assert_eq!(store.top("주기율표 게임", 10).await.unwrap()[0].player_name, "b");
        assert!(store.all("사용자 게임").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn all_is_fastest_first() {
        let store = MemoryRankingStore::new();
        store.insert(&entry("화학식 게임", "slow", 10, 80.0)).await.unwrap();
        store.insert(&entry("화학식 게임", "fast", 1, 8.0)).await.unwrap();

        let all = store.all("화학식 게임").await.unwrap();
        assert_eq!(all[0].player_name, "fast");
    }

    #[tokio::test]
    async fn backup_is_a_no_op() {
        let store = MemoryRankingStore::new();
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(store.backup(dir.path()).await.unwrap(), None);
    }
}
