//! Container tracking across all shipments.

use super::crud::Crud;
use crate::client::GatewayClient;
use crate::error::GatewayError;
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ContainerQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

pub struct ContainersApi<'a> {
    crud: Crud<'a>,
}

impl<'a> ContainersApi<'a> {
    pub(crate) fn new(client: &'a GatewayClient) -> Self {
        Self {
            crud: Crud::new(client, "/containers"),
        }
    }

    /// `GET /containers`
    pub async fn list<T: DeserializeOwned>(&self, query: &ContainerQuery) -> Result<T, GatewayError> {
        self.crud.list(query).await
    }
}
