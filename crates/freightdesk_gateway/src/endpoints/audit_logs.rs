//! Audit trail, read-only.

use crate::client::GatewayClient;
use crate::error::GatewayError;
use crate::request::RequestDescriptor;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct AuditLogQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Only entries recorded on this day.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

pub struct AuditLogsApi<'a> {
    client: &'a GatewayClient,
}

impl<'a> AuditLogsApi<'a> {
    pub(crate) fn new(client: &'a GatewayClient) -> Self {
        Self { client }
    }

    /// `GET /audit-logs`
    pub async fn list<T: DeserializeOwned>(&self, query: &AuditLogQuery) -> Result<T, GatewayError> {
        let request = RequestDescriptor::get("/audit-logs").with_query(query)?;
        self.client.json(&request).await
    }
}
