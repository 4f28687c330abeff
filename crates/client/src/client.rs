use dash_config::BackendConfig;
use dash_core::{DashError, DiskIoSample, HistoryRow, Result, StatusSample};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

pub const STATUS_PATH: &str = "/status";
pub const DISKIO_PATH: &str = "/diskio";
pub const HISTORY_PATH: &str = "/history";

/// HTTP client for the monitoring backend.
///
/// Cheap to clone: every clone shares one connection pool.
#[derive(Debug, Clone)]
pub struct MetricsClient {
    http:     reqwest::Client,
    base_url: String,
    username: Option<String>,
    password: Option<String>,
}

impl MetricsClient {
    /// Build a client from the `[backend]` config section.
    pub fn new(cfg: &BackendConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .build()
            .map_err(|e| DashError::Config(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            username: cfg.username.clone(),
            password: cfg.password.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /status`.
    pub async fn status(&self) -> Result<StatusSample> {
        self.get_json(STATUS_PATH).await
    }

    /// `GET /diskio`.
    pub async fn disk_io(&self) -> Result<DiskIoSample> {
        self.get_json(DISKIO_PATH).await
    }

    /// `GET /history`.  Individual odd rows survive decoding; only a
    /// non-array body is an error.
    pub async fn history(&self) -> Result<Vec<HistoryRow>> {
        self.get_json(HISTORY_PATH).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        let http_err = |e: reqwest::Error| DashError::Http {
            endpoint: path.to_string(),
            reason:   e.to_string(),
        };

        let mut request = self.http.get(&url);
        if let Some(user) = &self.username {
            request = request.basic_auth(user, self.password.as_ref());
        }

        let response = request.send().await.map_err(http_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(DashError::Status {
                endpoint: path.to_string(),
                status:   status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(http_err)?;
        debug!(endpoint = path, bytes = body.len(), "response received");

        serde_json::from_slice(&body).map_err(|e| DashError::Decode {
            endpoint: path.to_string(),
            reason:   e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        http::{HeaderMap, StatusCode},
        routing::get,
        Json, Router,
    };
    use serde_json::json;

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client(base_url: String) -> MetricsClient {
        MetricsClient::new(&BackendConfig { base_url, ..BackendConfig::default() }).unwrap()
    }

    fn backend() -> Router {
        Router::new()
            .route(
                "/status",
                get(|| async {
                    Json(json!({
                        "cpu_percent": 12.5, "memory_percent": 61.0,
                        "disk_percent": 80.0, "uptime": "02:03:04"
                    }))
                }),
            )
            .route(
                "/diskio",
                get(|| async {
                    Json(json!({"read_speed": 1.25, "write_speed": 2.0, "total_speed": 3.25}))
                }),
            )
            .route(
                "/history",
                get(|| async {
                    Json(json!([
                        {"timestamp": "2024-01-05T10:00:05", "cpu_percent": 5.0,
                         "memory_percent": 6.0, "disk_percent": 7.0, "disk_io_mb_sec": 0.5},
                        {"timestamp": "2024-01-05T10:00:00", "cpu_percent": "oops",
                         "memory_percent": 6.0, "disk_percent": 7.0, "disk_io_mb_sec": 0.0},
                    ]))
                }),
            )
    }

    #[tokio::test]
    async fn decodes_all_three_endpoints() {
        let client = client(serve(backend()).await);

        let status = client.status().await.unwrap();
        assert_eq!(status.cpu_percent, 12.5);
        assert_eq!(status.uptime.as_deref(), Some("02:03:04"));

        let io = client.disk_io().await.unwrap();
        assert_eq!(io.total_speed, 3.25);
        assert_eq!(io.read_speed, Some(1.25));

        let history = client.history().await.unwrap();
        assert_eq!(history.len(), 2);
        assert!(history[0].values().is_ok());
        assert!(history[1].values().is_err());
    }

    #[tokio::test]
    async fn non_2xx_is_a_status_error() {
        let app = Router::new().route("/status", get(|| async { StatusCode::SERVICE_UNAVAILABLE }));
        let err = client(serve(app).await).status().await.unwrap_err();
        assert_eq!(
            err,
            DashError::Status { endpoint: "/status".into(), status: 503 }
        );
    }

    #[tokio::test]
    async fn non_json_body_is_a_decode_error() {
        let app = Router::new().route("/diskio", get(|| async { "<html>nope</html>" }));
        let err = client(serve(app).await).disk_io().await.unwrap_err();
        assert!(matches!(err, DashError::Decode { ref endpoint, .. } if endpoint == "/diskio"));
    }

    #[tokio::test]
    async fn history_object_body_is_a_decode_error() {
        let app = Router::new().route("/history", get(|| async { Json(json!({"rows": []})) }));
        let err = client(serve(app).await).history().await.unwrap_err();
        assert!(matches!(err, DashError::Decode { .. }));
    }

    #[tokio::test]
    async fn unreachable_backend_is_an_http_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(format!("http://{addr}")).status().await.unwrap_err();
        assert!(matches!(err, DashError::Http { .. }));
    }

    #[tokio::test]
    async fn sends_basic_auth_when_configured() {
        let app = Router::new().route(
            "/status",
            get(|headers: HeaderMap| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                if auth == "Basic YWRtaW46c2VjcmV0" {
                    Ok(Json(json!({
                        "cpu_percent": 1.0, "memory_percent": 1.0, "disk_percent": 1.0
                    })))
                } else {
                    Err(StatusCode::UNAUTHORIZED)
                }
            }),
        );
        let base_url = serve(app).await;

        let anonymous = client(base_url.clone()).status().await.unwrap_err();
        assert_eq!(anonymous, DashError::Status { endpoint: "/status".into(), status: 401 });

        let authed = MetricsClient::new(&BackendConfig {
            base_url,
            username: Some("admin".into()),
            password: Some("secret".into()),
            ..BackendConfig::default()
        })
        .unwrap();
        let status: StatusSample = authed.status().await.unwrap();
        assert_eq!(status.uptime, None);
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let c = client("http://example.test:8000/".into());
        assert_eq!(c.base_url(), "http://example.test:8000");
    }
}
