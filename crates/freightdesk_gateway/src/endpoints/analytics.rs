//! Read-only dashboard aggregates.

use crate::client::GatewayClient;
use crate::error::GatewayError;
use crate::request::RequestDescriptor;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct AnalyticsQuery {
    /// Bucket size understood by the server, e.g. `week`, `month`, `year`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(rename = "startDate", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "endDate", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

pub struct AnalyticsApi<'a> {
    client: &'a GatewayClient,
}

impl<'a> AnalyticsApi<'a> {
    pub(crate) fn new(client: &'a GatewayClient) -> Self {
        Self { client }
    }

    async fn aggregate<T: DeserializeOwned>(
        &self,
        name: &str,
        query: &AnalyticsQuery,
    ) -> Result<T, GatewayError> {
        let request = RequestDescriptor::get(format!("/analytics/{name}")).with_query(query)?;
        self.client.json(&request).await
    }

    /// `GET /analytics/dashboard`
    pub async fn dashboard<T: DeserializeOwned>(&self, query: &AnalyticsQuery) -> Result<T, GatewayError> {
        self.aggregate("dashboard", query).await
    }

    /// `GET /analytics/revenue`
    pub async fn revenue<T: DeserializeOwned>(&self, query: &AnalyticsQuery) -> Result<T, GatewayError> {
        self.aggregate("revenue", query).await
    }

    /// `GET /analytics/performance`
    pub async fn performance<T: DeserializeOwned>(
        &self,
        query: &AnalyticsQuery,
    ) -> Result<T, GatewayError> {
        self.aggregate("performance", query).await
    }

    /// `GET /analytics/volume`
    pub async fn volume<T: DeserializeOwned>(&self, query: &AnalyticsQuery) -> Result<T, GatewayError> {
        self.aggregate("volume", query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_are_sent_as_iso_days() {
        let query = AnalyticsQuery {
            period: Some("month".into()),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            end_date: None,
        };
        let request = RequestDescriptor::get("/analytics/revenue")
            .with_query(&query)
            .unwrap();
        assert_eq!(request.query(), Some("period=month&startDate=2024-01-01"));
    }
}
