//! Fleet assets (trucks, trailers, vessels).

use super::crud::Crud;
use super::ListQuery;
use crate::client::GatewayClient;
use crate::error::GatewayError;
use crate::request::{FilePart, RequestDescriptor};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Display;

const BASE: &str = "/fleet";

pub struct FleetApi<'a> {
    client: &'a GatewayClient,
    crud: Crud<'a>,
}

impl<'a> FleetApi<'a> {
    pub(crate) fn new(client: &'a GatewayClient) -> Self {
        Self {
            client,
            crud: Crud::new(client, BASE),
        }
    }

    /// `GET /fleet`
    pub async fn list<T: DeserializeOwned>(&self, query: &ListQuery) -> Result<T, GatewayError> {
        self.crud.list(query).await
    }

    /// `GET /fleet/{id}`
    pub async fn get<T: DeserializeOwned>(&self, id: impl Display) -> Result<T, GatewayError> {
        self.crud.get(id).await
    }

    /// `POST /fleet`
    pub async fn create<T, B>(&self, asset: &B) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.crud.create(asset).await
    }

    /// `PUT /fleet/{id}`
    pub async fn update<T, B>(&self, id: impl Display, asset: &B) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.crud.update(id, asset).await
    }

    /// `DELETE /fleet/{id}`
    pub async fn delete<T: DeserializeOwned>(&self, id: impl Display) -> Result<T, GatewayError> {
        self.crud.delete(id).await
    }

    /// `POST /fleet/bulk-delete`
    pub async fn bulk_delete<T, I>(&self, ids: &[I]) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
        I: Serialize,
    {
        self.crud.bulk_delete(ids).await
    }

    /// `POST /fleet/import` (multipart)
    pub async fn import<T: DeserializeOwned>(&self, file: FilePart) -> Result<T, GatewayError> {
        self.crud.import(file).await
    }

    /// `GET /fleet/stats`: counts by status and type.
    pub async fn stats<T: DeserializeOwned>(&self) -> Result<T, GatewayError> {
        self.client
            .json(&RequestDescriptor::get(self.crud.sub_path("stats")))
            .await
    }
}
