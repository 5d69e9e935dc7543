use std::fmt;
use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ApiError;
use crate::stats::FocusStats;
use crate::storage::SessionKind;

const STATS_PATH: &str = "session-records/stats";
const RECORDS_PATH: &str = "session-records";
const CURRENT_USER_PATH: &str = "auth/me";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Text(String),
    Number(i64),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Text(s) => f.write_str(s),
            UserId::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Identity returned by the current-user lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, alias = "_id")]
    pub id: Option<UserId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

#[derive(Deserialize)]
struct CurrentUserResponse {
    #[serde(default)]
    user: Option<User>,
}

#[derive(Serialize)]
struct NewRecordBody {
    duration: u32,
    #[serde(rename = "type")]
    kind: SessionKind,
}

/// Client for the session-record endpoints under one base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    http_client: Client,
}

impl ApiClient {
    /// Create a client rooted at `base_url` (e.g. `https://host/api`).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url,
            http_client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    /// `GET session-records/stats`.
    pub async fn fetch_stats(&self) -> Result<FocusStats, ApiError> {
        let resp = self
            .http_client
            .get(self.endpoint(STATS_PATH)?)
            .send()
            .await?;
        let stats = ensure_success(resp).await?.json::<FocusStats>().await?;
        Ok(stats)
    }

    /// `POST session-records` for one completed focus interval.
    pub async fn post_record(&self, duration_minutes: u32) -> Result<(), ApiError> {
        let body = NewRecordBody {
            duration: duration_minutes,
            kind: SessionKind::Focus,
        };
        let resp = self
            .http_client
            .post(self.endpoint(RECORDS_PATH)?)
            .json(&body)
            .send()
            .await?;
        ensure_success(resp).await?;
        Ok(())
    }

    /// Current user, or `None` when signed out.
    pub async fn current_user(&self) -> Result<Option<User>, ApiError> {
        let resp = self
            .http_client
            .get(self.endpoint(CURRENT_USER_PATH)?)
            .send()
            .await?;
        if matches!(
            resp.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND
        ) {
            return Ok(None);
        }
        let body = ensure_success(resp)
            .await?
            .json::<CurrentUserResponse>()
            .await?;
        Ok(body.user)
    }
}

async fn ensure_success(resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn client(server: &mockito::Server, prefix: &str) -> ApiClient {
        ApiClient::new(&format!("{}{prefix}", server.url()), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn base_url_keeps_path_prefix() {
        let api = ApiClient::new("http://localhost:3000/api", Duration::from_secs(1)).unwrap();
        assert_eq!(
            api.endpoint(STATS_PATH).unwrap().as_str(),
            "http://localhost:3000/api/session-records/stats"
        );
        assert!(ApiClient::new("not a url", Duration::from_secs(1)).is_err());
    }

    #[tokio::test]
    async fn fetch_stats_parses_payload() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/session-records/stats")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "totalFocusMinutes": 75,
                    "totalBreakMinutes": 0,
                    "totalSessions": 3,
                    "completedSessions": 3,
                    "weeklyData": [0, 0, 0, 0, 0, 25, 50],
                    "focusStreak": 2
                })
                .to_string(),
            )
            .create_async()
            .await;

        let stats = client(&server, "/api").fetch_stats().await.unwrap();
        assert_eq!(stats.total_focus_minutes, 75);
        assert_eq!(stats.weekly_data[6], 50);
        assert_eq!(stats.focus_streak, 2);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn post_record_sends_focus_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/session-records")
            .match_body(Matcher::Json(json!({"duration": 25, "type": "focus"})))
            .with_status(201)
            .create_async()
            .await;

        client(&server, "").post_record(25).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn post_record_non_2xx_is_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/session-records")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let err = client(&server, "").post_record(25).await.unwrap_err();
        match err {
            ApiError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("Expected Status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn current_user_present() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/auth/me")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"user": {"_id": "u1", "name": "Sam"}}).to_string())
            .create_async()
            .await;

        let user = client(&server, "").current_user().await.unwrap().unwrap();
        assert_eq!(user.id, Some(UserId::Text("u1".into())));
        assert_eq!(user.name.as_deref(), Some("Sam"));
    }

    #[tokio::test]
    async fn current_user_absent_when_unauthorized() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/auth/me")
            .with_status(401)
            .expect(1)
            .create_async()
            .await;
        assert!(client(&server, "").current_user().await.unwrap().is_none());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn current_user_absent_when_field_missing() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/auth/me")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create_async()
            .await;
        assert!(client(&server, "").current_user().await.unwrap().is_none());
    }
}
