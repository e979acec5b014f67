use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::{
    domain::{VisitorDraft, VisitorId, VisitorRecord},
    error::ApiErrorBody,
};
use tracing::debug;

use crate::error::GatewayError;

/// The three calls the controller depends on. Nothing else (paging, filtering,
/// auth) is assumed of the backend.
#[async_trait]
pub trait VisitorGateway: Send + Sync {
    async fn list_visitors(&self) -> Result<Vec<VisitorRecord>, GatewayError>;
    async fn create_visitor(&self, draft: &VisitorDraft) -> Result<(), GatewayError>;
    async fn delete_visitor(&self, id: VisitorId) -> Result<(), GatewayError>;
}

pub struct HttpVisitorGateway {
    http: Client,
    base_url: String,
}

impl HttpVisitorGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn visitors_url(&self) -> String {
        format!("{}/visitors", self.base_url)
    }
}

/// Maps a non-2xx response to [`GatewayError::Status`], keeping the backend's
/// `{"error": ...}` message when it sent one.
async fn ensure_success(response: Response) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(GatewayError::Status {
        status: status.as_u16(),
        message: ApiErrorBody::message_from(&body),
    })
}

#[async_trait]
impl VisitorGateway for HttpVisitorGateway {
    async fn list_visitors(&self) -> Result<Vec<VisitorRecord>, GatewayError> {
        let response = self.http.get(self.visitors_url()).send().await?;
        let visitors: Vec<VisitorRecord> = ensure_success(response).await?.json().await?;
        debug!(count = visitors.len(), "gateway: listed visitors");
        Ok(visitors)
    }

    async fn create_visitor(&self, draft: &VisitorDraft) -> Result<(), GatewayError> {
        let response = self
            .http
            .post(self.visitors_url())
            .json(draft)
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn delete_visitor(&self, id: VisitorId) -> Result<(), GatewayError> {
        let response = self
            .http
            .delete(format!("{}/{}", self.visitors_url(), id.0))
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/gateway_tests.rs"]
mod tests;
