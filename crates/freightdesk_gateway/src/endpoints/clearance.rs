//! Customs clearance records.

use super::crud::Crud;
use crate::client::GatewayClient;
use crate::error::GatewayError;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Display;

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ClearanceQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Import or export.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub clearance_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

pub struct ClearanceApi<'a> {
    crud: Crud<'a>,
}

impl<'a> ClearanceApi<'a> {
    pub(crate) fn new(client: &'a GatewayClient) -> Self {
        Self {
            crud: Crud::new(client, "/clearances"),
        }
    }

    pub async fn list<T: DeserializeOwned>(&self, query: &ClearanceQuery) -> Result<T, GatewayError> {
        self.crud.list(query).await
    }

    pub async fn get<T: DeserializeOwned>(&self, id: impl Display) -> Result<T, GatewayError> {
        self.crud.get(id).await
    }

    pub async fn create<T, B>(&self, clearance: &B) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.crud.create(clearance).await
    }

    pub async fn update<T, B>(&self, id: impl Display, clearance: &B) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.crud.update(id, clearance).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, id: impl Display) -> Result<T, GatewayError> {
        self.crud.delete(id).await
    }
}
