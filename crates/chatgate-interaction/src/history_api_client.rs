//! HistoryApiClient - user lookup and the remote Q/A history.

use crate::service_client::ServiceClient;
use async_trait::async_trait;
use chatgate_core::history::{HistoryRecord, HistoryStore, QaPair, RecordId, UserDirectory, UserId};
use chatgate_core::{ChatGateError, Result};
use reqwest::Method;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: i64,
}

/// Remote history service.
///
/// Endpoints:
/// - `GET /users/by-email/{email}`
/// - `GET|POST|DELETE /users/{user_id}/messages`
/// - `PUT /messages/{id}`
#[derive(Debug, Clone)]
pub struct HistoryApiClient {
    service: ServiceClient,
}

impl HistoryApiClient {
    pub fn new(service: ServiceClient) -> Self {
        Self { service }
    }
}

#[async_trait]
impl UserDirectory for HistoryApiClient {
    async fn lookup(&self, email: &str) -> Result<UserId> {
        let request = self
            .service
            .request(Method::GET, &["users", "by-email", email])?;
        match self.service.send_json::<UserResponse>(request).await {
            Ok(user) => Ok(UserId(user.id)),
            Err(ChatGateError::Service { status: 404, .. }) => {
                Err(ChatGateError::not_found("user", email))
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl HistoryStore for HistoryApiClient {
    async fn load(&self, user: UserId) -> Result<Vec<HistoryRecord>> {
        let user_segment = user.to_string();
        let request = self
            .service
            .request(Method::GET, &["users", &user_segment, "messages"])?;
        let records: Vec<HistoryRecord> = self.service.send_json(request).await?;
        tracing::debug!(%user, count = records.len(), "loaded history");
        Ok(records)
    }

    async fn append(&self, user: UserId, pair: &QaPair) -> Result<HistoryRecord> {
        let user_segment = user.to_string();
        let request = self
            .service
            .request(Method::POST, &["users", &user_segment, "messages"])?
            .json(pair);
        let record: HistoryRecord = self.service.send_json(request).await?;
        tracing::debug!(%user, record = %record.id, "appended history record");
        Ok(record)
    }

    async fn update(&self, record: RecordId, pair: &QaPair) -> Result<()> {
        let record_segment = record.to_string();
        let request = self
            .service
            .request(Method::PUT, &["messages", &record_segment])?
            .json(pair);
        self.service.send(request).await?;
        tracing::debug!(%record, "updated history record");
        Ok(())
    }

    async fn clear(&self, user: UserId) -> Result<()> {
        let user_segment = user.to_string();
        let request = self
            .service
            .request(Method::DELETE, &["users", &user_segment, "messages"])?;
        self.service.send(request).await?;
        tracing::info!(%user, "cleared history");
        Ok(())
    }
}
