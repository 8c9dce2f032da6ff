use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calendar::ViewState;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Request error: {0}")]
    RequestError(String),
}

/// One `(date, activity)` row as it travels over the wire. `date` is a
/// serialized [`crate::calendar::CalendarDate`] key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub date: String,
    pub activity: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActivityListResponse {
    pub activities: Vec<ActivityRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedActivity {
    pub message: String,
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityApi: Send + Sync {
    async fn fetch_month(&self, view: ViewState) -> Result<Vec<ActivityRecord>, ApiError>;

    async fn fetch_all(&self) -> Result<Vec<ActivityRecord>, ApiError>;

    async fn create_activity(&self, record: &ActivityRecord) -> Result<CreatedActivity, ApiError>;
}

/// Query string for a month. The wire month is 1-based.
pub fn month_query(view: ViewState) -> [(&'static str, String); 2] {
    [
        ("month", (view.month() + 1).to_string()),
        ("year", view.year().to_string()),
    ]
}

pub struct HttpActivityApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpActivityApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn activities_url(&self) -> String {
        format!("{}/activities", self.base_url)
    }

    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
        action: &str,
    ) -> Result<T, ApiError> {
        let status = response.status();
        tracing::info!("{} response status: {}", action, status);

        if !status.is_success() {
            let body = response.text().await?;
            tracing::error!("{} failed. Status: {}, Body: {}", action, status, body);
            return Err(ApiError::RequestError(format!("Status {}: {}", status, body)));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl ActivityApi for HttpActivityApi {
    async fn fetch_month(&self, view: ViewState) -> Result<Vec<ActivityRecord>, ApiError> {
        tracing::info!("Fetching activities for month {} of {}", view.month() + 1, view.year());

        let response = self.client
            .get(self.activities_url())
            .query(&month_query(view))
            .send()
            .await?;

        let list: ActivityListResponse = Self::read_json(response, "Fetch activities").await?;
        tracing::info!("Fetched {} activities", list.activities.len());
        Ok(list.activities)
    }

    async fn fetch_all(&self) -> Result<Vec<ActivityRecord>, ApiError> {
        tracing::info!("Fetching all activities");

        let response = self.client
            .get(self.activities_url())
            .send()
            .await?;

        let list: ActivityListResponse = Self::read_json(response, "Fetch all activities").await?;
        tracing::info!("Fetched {} activities", list.activities.len());
        Ok(list.activities)
    }

    async fn create_activity(&self, record: &ActivityRecord) -> Result<CreatedActivity, ApiError> {
        tracing::info!("Creating activity on {}", record.date);
        tracing::debug!("POST {} with payload: {:?}", self.activities_url(), record);

        let response = self.client
            .post(self.activities_url())
            .json(record)
            .send()
            .await?;

        let created: CreatedActivity = Self::read_json(response, "Create activity").await?;
        tracing::info!("Activity created with ID: {}", created.id);
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn view(month: u32, year: i32) -> ViewState {
        ViewState::new(month, year).unwrap()
    }

    #[test]
    fn month_query_is_one_based() {
        let [month, year] = month_query(view(0, 2024));

        assert_eq!(month, ("month", "1".to_string()));
        assert_eq!(year, ("year", "2024".to_string()));
    }

    #[test]
    fn december_query_is_twelve() {
        let [month, _] = month_query(view(11, 2023));
        assert_eq!(month.1, "12");
    }

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let api = HttpActivityApi::new("http://localhost:3000/");
        assert_eq!(api.base_url(), "http://localhost:3000");
    }

    #[tokio::test]
    async fn fetch_month_sends_one_based_month() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/activities"))
            .and(query_param("month", "1"))
            .and(query_param("year", "2024"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "activities": [
                    {"date": "2024-1-15", "activity": "Dentist"},
                    {"date": "2024-1-15", "activity": "Groceries"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = HttpActivityApi::new(server.uri());
        let records = api.fetch_month(view(0, 2024)).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].activity, "Groceries");
    }

    #[tokio::test]
    async fn fetch_month_reports_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/activities"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let api = HttpActivityApi::new(server.uri());
        let result = api.fetch_month(view(0, 2024)).await;

        assert!(matches!(result, Err(ApiError::RequestError(msg)) if msg.contains("500")));
    }

    #[tokio::test]
    async fn fetch_all_sends_no_month_filter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/activities"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "activities": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let api = HttpActivityApi::new(server.uri());
        let records = api.fetch_all().await.unwrap();

        assert!(records.is_empty());
        let received = server.received_requests().await.unwrap();
        assert_eq!(received[0].url.query(), None);
    }

    #[tokio::test]
    async fn create_activity_posts_date_and_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/activities"))
            .and(body_json(json!({"date": "2024-1-15", "activity": "Dentist"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Activity added",
                "id": 7
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = HttpActivityApi::new(server.uri());
        let record = ActivityRecord {
            date: "2024-1-15".to_string(),
            activity: "Dentist".to_string(),
        };
        let created = api.create_activity(&record).await.unwrap();

        assert_eq!(created.id, 7);
    }

    #[tokio::test]
    async fn create_activity_reports_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({"message": "bad date"})))
            .mount(&server)
            .await;

        let api = HttpActivityApi::new(server.uri());
        let record = ActivityRecord {
            date: "garbage".to_string(),
            activity: "Dentist".to_string(),
        };

        assert!(api.create_activity(&record).await.is_err());
    }

    #[tokio::test]
    async fn unreachable_service_is_an_http_error() {
        let api = HttpActivityApi::new("http://127.0.0.1:9");
        let result = api.fetch_all().await;

        assert!(matches!(result, Err(ApiError::HttpError(_))));
    }
}
