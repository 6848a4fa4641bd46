// Shared shape of the plain CRUD resources.

use super::{BulkDelete, IMPORT_FIELD};
use crate::client::GatewayClient;
use crate::error::GatewayError;
use crate::request::{segment, FilePart, MultipartPayload, RequestDescriptor};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Display;

#[derive(Debug, Clone)]
pub(crate) struct Crud<'a> {
    client: &'a GatewayClient,
    base: String,
}

impl<'a> Crud<'a> {
    pub(crate) fn new(client: &'a GatewayClient, base: impl Into<String>) -> Self {
        Self {
            client,
            base: base.into(),
        }
    }

    pub(crate) fn item_path(&self, id: impl Display) -> String {
        format!("{}/{}", self.base, segment(id))
    }

    pub(crate) fn sub_path(&self, suffix: &str) -> String {
        format!("{}/{}", self.base, suffix)
    }

    pub(crate) async fn list<T, Q>(&self, query: &Q) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = RequestDescriptor::get(self.base.as_str()).with_query(query)?;
        self.client.json(&request).await
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, id: impl Display) -> Result<T, GatewayError> {
        self.client
            .json(&RequestDescriptor::get(self.item_path(id)))
            .await
    }

    pub(crate) async fn create<T, B>(&self, body: &B) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = RequestDescriptor::post(self.base.as_str()).with_json(body)?;
        self.client.json(&request).await
    }

    pub(crate) async fn update<T, B>(&self, id: impl Display, body: &B) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = RequestDescriptor::put(self.item_path(id)).with_json(body)?;
        self.client.json(&request).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, id: impl Display) -> Result<T, GatewayError> {
        self.client
            .json(&RequestDescriptor::delete(self.item_path(id)))
            .await
    }

    pub(crate) async fn bulk_delete<T, I>(&self, ids: &[I]) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
        I: Serialize,
    {
        let request =
            RequestDescriptor::post(self.sub_path("bulk-delete")).with_json(&BulkDelete { ids })?;
        self.client.json(&request).await
    }

    pub(crate) async fn import<T: DeserializeOwned>(&self, file: FilePart) -> Result<T, GatewayError> {
        self.client.json(&import_request(&self.base, file)).await
    }
}

/// `POST <base>/import` with the spreadsheet as the `file` part.
pub(crate) fn import_request(base: &str, file: FilePart) -> RequestDescriptor {
    RequestDescriptor::post(format!("{}/import", base))
        .with_multipart(MultipartPayload::new().file(IMPORT_FIELD, file))
}
