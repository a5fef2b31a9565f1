//! Sync gateway
//!
//! Maps store operations onto the REST API:
//!
//! | operation | request |
//! |---|---|
//! | list   | `GET    /{collection}` |
//! | fetch  | `GET    /{collection}/{id}` |
//! | create | `POST   /{collection}` |
//! | update | `PUT    /{collection}/{id}` |
//! | delete | `DELETE /{collection}/{id}` |
//! | link   | `POST   /{owner}/{id}/{relation}` |
//! | unlink | `DELETE /{owner}/{id}/{relation}` |
//!
//! Failures come back as [`AppError`] values; nothing here retries.

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Method, Response, StatusCode};
use serde_json::Value;
use url::Url;

use crate::error::{AppError, AppResult};
use crate::http_config::HttpConfig;
use crate::models::{Record, RecordKind, Relation};

/// Longest backend error text carried into an [`AppError::Backend`]
const MAX_ERROR_BODY: usize = 300;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn list(&self, kind: RecordKind) -> AppResult<Vec<Record>>;

    async fn fetch(&self, kind: RecordKind, id: &str) -> AppResult<Record>;

    async fn create(&self, record: &Record) -> AppResult<Record>;

    async fn update(&self, id: &str, record: &Record) -> AppResult<Record>;

    async fn delete(&self, kind: RecordKind, id: &str) -> AppResult<()>;

    /// Attach `ids` to the owner record, returning the updated owner.
    async fn link(&self, relation: Relation, owner_id: &str, ids: &[String]) -> AppResult<Record>;

    /// Detach `ids` from the owner record, returning the updated owner.
    async fn unlink(
        &self,
        relation: Relation,
        owner_id: &str,
        ids: &[String],
    ) -> AppResult<Record>;
}

/// REST client for the records API
#[derive(Debug, Clone)]
pub struct HttpGateway {
    http: Client,
    base_url: Url,
}

impl HttpGateway {
    pub fn new(base_url: Url) -> AppResult<Self> {
        Self::with_config(base_url, &HttpConfig::gateway())
    }

    pub fn with_config(base_url: Url, config: &HttpConfig) -> AppResult<Self> {
        if base_url.cannot_be_a_base() {
            return Err(AppError::config(format!(
                "API URL '{}' cannot carry path segments",
                base_url
            )));
        }
        Ok(Self {
            http: config.build_client()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL with `parts` appended as percent-encoded path segments.
    pub fn endpoint(&self, parts: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(parts);
        }
        url
    }

    async fn send(&self, method: Method, url: Url, body: Option<&Value>) -> AppResult<Response> {
        debug!("{} {}", method, url);
        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        check_status(response).await
    }

    /// Decode a single-record response, falling back to what was sent when
    /// the backend answers with an empty body.
    async fn record_response(response: Response, sent: &Record) -> AppResult<Record> {
        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(sent.clone());
        }
        let value: Value = serde_json::from_slice(&bytes)?;
        Ok(Record::from_json(sent.kind(), value)?)
    }

    async fn send_link(
        &self,
        method: Method,
        relation: Relation,
        owner_id: &str,
        ids: &[String],
    ) -> AppResult<Record> {
        let owner = relation.owner();
        let url = self.endpoint(&[owner.segment(), owner_id, relation.target().segment()]);
        let body = serde_json::to_value(ids)?;
        let response = self.send(method, url, Some(&body)).await?;

        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return self.fetch(owner, owner_id).await;
        }
        let value: Value = serde_json::from_slice(&bytes)?;
        Ok(Record::from_json(owner, value)?)
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn list(&self, kind: RecordKind) -> AppResult<Vec<Record>> {
        let response = self
            .send(Method::GET, self.endpoint(&[kind.segment()]), None)
            .await?;
        let values: Vec<Value> = response.json().await?;
        let records = values
            .into_iter()
            .map(|value| Record::from_json(kind, value))
            .collect::<Result<Vec<_>, _>>()?;
        debug!("Listed {} {}", records.len(), kind.segment());
        Ok(records)
    }

    async fn fetch(&self, kind: RecordKind, id: &str) -> AppResult<Record> {
        let response = self
            .send(Method::GET, self.endpoint(&[kind.segment(), id]), None)
            .await?;
        let value: Value = response.json().await?;
        Ok(Record::from_json(kind, value)?)
    }

    async fn create(&self, record: &Record) -> AppResult<Record> {
        let url = self.endpoint(&[record.kind().segment()]);
        let body = record.to_json()?;
        let response = self.send(Method::POST, url, Some(&body)).await?;
        Self::record_response(response, record).await
    }

    async fn update(&self, id: &str, record: &Record) -> AppResult<Record> {
        let url = self.endpoint(&[record.kind().segment(), id]);
        let body = record.to_json()?;
        let response = self.send(Method::PUT, url, Some(&body)).await?;
        Self::record_response(response, record).await
    }

    async fn delete(&self, kind: RecordKind, id: &str) -> AppResult<()> {
        self.send(Method::DELETE, self.endpoint(&[kind.segment(), id]), None)
            .await?;
        Ok(())
    }

    async fn link(&self, relation: Relation, owner_id: &str, ids: &[String]) -> AppResult<Record> {
        self.send_link(Method::POST, relation, owner_id, ids).await
    }

    async fn unlink(
        &self,
        relation: Relation,
        owner_id: &str,
        ids: &[String],
    ) -> AppResult<Record> {
        self.send_link(Method::DELETE, relation, owner_id, ids).await
    }
}

/// Turn non-2xx responses into errors, keeping a short reason.
async fn check_status(response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().clone();
    let text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unable to read error response".to_string());
    let reason = error_reason(&text, status);

    if status == StatusCode::NOT_FOUND {
        return Err(AppError::not_found(format!("{} ({})", url.path(), reason)));
    }
    Err(AppError::backend(status.as_u16(), reason))
}

/// Prefer the `message`/`error` field of a JSON error body.
fn error_reason(text: &str, status: StatusCode) -> String {
    let from_json = serde_json::from_str::<Value>(text).ok().and_then(|v| {
        ["message", "error"]
            .iter()
            .find_map(|key| v.get(*key).and_then(Value::as_str).map(str::to_string))
    });

    let reason = from_json.unwrap_or_else(|| text.trim().to_string());
    if reason.is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string();
    }
    reason.chars().take(MAX_ERROR_BODY).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway(base: &str) -> HttpGateway {
        HttpGateway::new(Url::parse(base).unwrap()).unwrap()
    }

    #[test]
    fn test_endpoint_appends_segments() {
        let gw = gateway("http://localhost:5000/api");
        assert_eq!(
            gw.endpoint(&["meetings"]).as_str(),
            "http://localhost:5000/api/meetings"
        );

        let gw = gateway("http://localhost:8080/");
        assert_eq!(
            gw.endpoint(&["calendars", "c-1"]).as_str(),
            "http://localhost:8080/calendars/c-1"
        );
    }

    #[test]
    fn test_endpoint_encodes_ids() {
        let gw = gateway("http://localhost:8080");
        assert_eq!(
            gw.endpoint(&["participants", "a/b c"]).as_str(),
            "http://localhost:8080/participants/a%2Fb%20c"
        );
    }

    #[test]
    fn test_error_reason_prefers_json_message() {
        let body = r#"{"status":400,"error":"Bad Request","message":"title can not be null"}"#;
        assert_eq!(
            error_reason(body, StatusCode::BAD_REQUEST),
            "title can not be null"
        );
        assert_eq!(
            error_reason(r#"{"error":"Bad Request"}"#, StatusCode::BAD_REQUEST),
            "Bad Request"
        );
        assert_eq!(
            error_reason("", StatusCode::SERVICE_UNAVAILABLE),
            "Service Unavailable"
        );
        assert_eq!(error_reason("x".repeat(400).as_str(), StatusCode::BAD_GATEWAY).len(), 300);
    }
}
