use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::calendar::{CalendarDate, ViewState};
use crate::storage::activity_db::{ActivityDb, DbError, StoredActivity};
use crate::sync::activity_api::{ActivityListResponse, ActivityRecord, CreatedActivity, ErrorBody};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    BadRequest(String),
    #[error("Storage error: {0}")]
    Storage(#[from] DbError),
    #[error("Storage is unavailable")]
    StorageUnavailable,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::Storage(_) | ServiceError::StorageUnavailable => {
                tracing::error!("Activity service failure: {}", self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = ErrorBody {
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Clone)]
pub struct ServiceState {
    db: Arc<Mutex<ActivityDb>>,
}

impl ServiceState {
    pub fn new(db: ActivityDb) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
        }
    }

    fn with_db<T>(
        &self,
        f: impl FnOnce(&ActivityDb) -> Result<T, DbError>,
    ) -> Result<T, ServiceError> {
        let db = self.db.lock().map_err(|_| ServiceError::StorageUnavailable)?;
        Ok(f(&db)?)
    }
}

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

impl MonthQuery {
    /// `None` selects every activity. The wire month is 1-based.
    fn view(&self) -> Result<Option<ViewState>, ServiceError> {
        match (self.month, self.year) {
            (None, None) => Ok(None),
            (Some(month), Some(year)) => month
                .checked_sub(1)
                .and_then(|month0| ViewState::new(month0, year))
                .map(Some)
                .ok_or_else(|| ServiceError::BadRequest(format!("Invalid month {} of {}", month, year))),
            _ => Err(ServiceError::BadRequest(
                "month and year must be given together".to_string(),
            )),
        }
    }
}

pub fn router(db: ActivityDb) -> Router {
    Router::new()
        .route(
            "/activities",
            get(list_activities)
                .post(create_activity)
                .fallback(method_not_allowed),
        )
        .with_state(ServiceState::new(db))
}

pub async fn serve(listener: TcpListener, db: ActivityDb) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Activity service listening on {}", addr);
    }
    axum::serve(listener, router(db)).await
}

async fn list_activities(
    State(state): State<ServiceState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<ActivityListResponse>, ServiceError> {
    let view = query.view()?;
    let rows = state.with_db(|db| match view {
        Some(view) => db.list_month(view),
        None => db.list_all(),
    })?;

    tracing::info!("Listing {} activities", rows.len());

    Ok(Json(ActivityListResponse {
        activities: rows.into_iter().map(to_record).collect(),
    }))
}

async fn create_activity(
    State(state): State<ServiceState>,
    Json(record): Json<ActivityRecord>,
) -> Result<Json<CreatedActivity>, ServiceError> {
    let date = CalendarDate::parse_key(&record.date)
        .map_err(|e| ServiceError::BadRequest(e.to_string()))?;

    if record.activity.trim().is_empty() {
        return Err(ServiceError::BadRequest("Activity text is empty".to_string()));
    }

    let id = state.with_db(|db| db.insert(date, &record.activity))?;
    tracing::info!("Stored activity {} on {}", id, date);

    Ok(Json(CreatedActivity {
        message: "Activity added".to_string(),
        id,
    }))
}

async fn method_not_allowed(method: Method) -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "GET, POST")],
        format!("Method {} not allowed", method),
    )
}

/// Rows leave the service as unpadded date keys.
fn to_record(row: StoredActivity) -> ActivityRecord {
    let date = match CalendarDate::parse_key(&row.date) {
        Ok(date) => date.key(),
        Err(e) => {
            tracing::warn!("Activity {} has an unusable date: {}", row.id, e);
            row.date
        }
    };
    ActivityRecord {
        date,
        activity: row.activity,
    }
}
