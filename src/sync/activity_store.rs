use std::sync::Arc;

use thiserror::Error;

use crate::calendar::{ActivityIndex, CalendarDate, ViewState};
use crate::storage::config::Config;
use crate::sync::activity_api::{ActivityApi, ActivityRecord, ApiError, HttpActivityApi};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to load activities: {0}")]
    Api(#[from] ApiError),
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Failed to save activity: {0}")]
    Api(#[from] ApiError),
}

/// Loads and saves activities through the remote service.
#[derive(Clone)]
pub struct ActivityStore {
    api: Arc<dyn ActivityApi>,
}

impl ActivityStore {
    pub fn new(api: Arc<dyn ActivityApi>) -> Self {
        Self { api }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(HttpActivityApi::new(config.remote.base_url.clone())))
    }

    pub async fn load(&self, view: ViewState) -> Result<ActivityIndex, FetchError> {
        let records = self.api.fetch_month(view).await?;
        Ok(index_from_records(records))
    }

    pub async fn load_all(&self) -> Result<ActivityIndex, FetchError> {
        let records = self.api.fetch_all().await?;
        Ok(index_from_records(records))
    }

    pub async fn persist(&self, date: CalendarDate, text: &str) -> Result<i64, PersistError> {
        let record = ActivityRecord {
            date: date.key(),
            activity: text.to_string(),
        };
        let created = self.api.create_activity(&record).await?;
        Ok(created.id)
    }

    /// Persists, then appends to `index` once the service has confirmed.
    pub async fn append(
        &self,
        index: &mut ActivityIndex,
        date: CalendarDate,
        text: &str,
    ) -> Result<(), PersistError> {
        self.persist(date, text).await?;
        index.push(date, text);
        Ok(())
    }
}

fn index_from_records(records: Vec<ActivityRecord>) -> ActivityIndex {
    records
        .into_iter()
        .filter_map(|record| match CalendarDate::parse_key(&record.date) {
            Ok(date) => Some((date, record.activity)),
            Err(e) => {
                tracing::warn!("Skipping activity with unusable date: {}", e);
                None
            }
        })
        .collect()
}
