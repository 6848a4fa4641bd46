//! Delivery notes and their status workflow.

use super::crud::Crud;
use super::ListQuery;
use crate::client::GatewayClient;
use crate::error::GatewayError;
use crate::request::RequestDescriptor;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::fmt::Display;

const BASE: &str = "/delivery-notes";

pub struct DeliveryNotesApi<'a> {
    client: &'a GatewayClient,
    crud: Crud<'a>,
}

impl<'a> DeliveryNotesApi<'a> {
    pub(crate) fn new(client: &'a GatewayClient) -> Self {
        Self {
            client,
            crud: Crud::new(client, BASE),
        }
    }

    pub async fn list<T: DeserializeOwned>(&self, query: &ListQuery) -> Result<T, GatewayError> {
        self.crud.list(query).await
    }

    pub async fn get<T: DeserializeOwned>(&self, id: impl Display) -> Result<T, GatewayError> {
        self.crud.get(id).await
    }

    pub async fn create<T, B>(&self, note: &B) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.crud.create(note).await
    }

    pub async fn update<T, B>(&self, id: impl Display, note: &B) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.crud.update(id, note).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, id: impl Display) -> Result<T, GatewayError> {
        self.crud.delete(id).await
    }

    /// `PATCH /delivery-notes/{id}/status`. Valid transitions are enforced server-side.
    pub async fn update_status<T: DeserializeOwned>(
        &self,
        id: impl Display,
        status: &str,
    ) -> Result<T, GatewayError> {
        let request = RequestDescriptor::patch(format!("{}/status", self.crud.item_path(id)))
            .with_json(&json!({ "status": status }))?;
        self.client.json(&request).await
    }
}
