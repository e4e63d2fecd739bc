//! In-memory health record store

use std::sync::Arc;

use application::error::ApplicationError;
use application::flow_context::FlowContext;
use application::ports::RecordProvider;
use async_trait::async_trait;
use domain::HealthRecordItem;
use parking_lot::RwLock;
use tracing::debug;

#[derive(Debug, Clone)]
struct StoredRecord {
    user_id: String,
    item: HealthRecordItem,
}

/// In-memory implementation of [`RecordProvider`]
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    records: Arc<RwLock<Vec<StoredRecord>>>,
}

impl InMemoryRecordStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record owned by `user_id`
    pub fn insert(&self, user_id: impl Into<String>, item: HealthRecordItem) {
        self.records.write().push(StoredRecord {
            user_id: user_id.into(),
            item,
        });
    }
}

#[async_trait]
impl RecordProvider for InMemoryRecordStore {
    async fn get_records_by_scope(
        &self,
        _ctx: &FlowContext,
        user_id: &str,
        scope: &[String],
        limit: usize,
    ) -> Result<Vec<HealthRecordItem>, ApplicationError> {
        let mut records: Vec<HealthRecordItem> = self
            .records
            .read()
            .iter()
            .filter(|r| r.user_id == user_id && scope.contains(&r.item.record_type))
            .map(|r| r.item.clone())
            .collect();

        records.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        records.truncate(limit);

        debug!(user_id, count = records.len(), "Records fetched by scope");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    fn record(id: &str, record_type: &str, age_days: i64) -> HealthRecordItem {
        HealthRecordItem {
            record_id: id.into(),
            record_type: record_type.into(),
            title: id.into(),
            data_json: "{}".into(),
            recorded_at: Utc::now() - Duration::days(age_days),
        }
    }

    #[tokio::test]
    async fn filters_by_owner_and_scope_newest_first() {
        let store = InMemoryRecordStore::new();
        store.insert("user-1", record("old", "vital_sign", 10));
        store.insert("user-1", record("new", "vital_sign", 1));
        store.insert("user-1", record("lab", "lab_result", 2));
        store.insert("user-1", record("img", "imaging", 0));
        store.insert("user-2", record("other", "vital_sign", 0));

        let scope = vec!["vital_sign".to_string(), "lab_result".to_string()];
        let records = store
            .get_records_by_scope(&FlowContext::new(), "user-1", &scope, 100)
            .await
            .unwrap();

        let ids: Vec<_> = records.iter().map(|r| r.record_id.as_str()).collect();
        assert_eq!(ids, ["new", "lab", "old"]);
    }

    #[tokio::test]
    async fn truncates_to_limit() {
        let store = InMemoryRecordStore::new();
        for day in 0..5 {
            store.insert("user-1", record(&format!("r{day}"), "vital_sign", day));
        }

        let records = store
            .get_records_by_scope(&FlowContext::new(), "user-1", &["vital_sign".to_string()], 2)
            .await
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].record_id, "r0");
    }

    #[tokio::test]
    async fn empty_scope_matches_nothing() {
        let store = InMemoryRecordStore::new();
        store.insert("user-1", record("r", "vital_sign", 0));

        let records = store
            .get_records_by_scope(&FlowContext::new(), "user-1", &[], 100)
            .await
            .unwrap();

        assert!(records.is_empty());
    }
}
