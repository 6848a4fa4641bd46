//! Payments recorded against a job, and the payment item catalogue.

use super::crud::Crud;
use super::ListQuery;
use crate::client::GatewayClient;
use crate::error::GatewayError;
use crate::request::{segment, FilePart, RequestDescriptor};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Display;

pub struct PaymentsApi<'a> {
    client: &'a GatewayClient,
    crud: Crud<'a>,
}

impl<'a> PaymentsApi<'a> {
    pub(crate) fn new(client: &'a GatewayClient) -> Self {
        Self {
            client,
            crud: Crud::new(client, "/payments"),
        }
    }

    /// `POST /payments`
    pub async fn create<T, B>(&self, payment: &B) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.crud.create(payment).await
    }

    /// `GET /payments/job/{job}`: every payment booked on one job number.
    pub async fn list_by_job<T: DeserializeOwned>(&self, job: impl Display) -> Result<T, GatewayError> {
        let path = format!("{}/{}", self.crud.sub_path("job"), segment(job));
        self.client.json(&RequestDescriptor::get(path)).await
    }

    /// `DELETE /payments/{id}`
    pub async fn delete<T: DeserializeOwned>(&self, id: impl Display) -> Result<T, GatewayError> {
        self.crud.delete(id).await
    }
}

pub struct PaymentItemsApi<'a> {
    crud: Crud<'a>,
}

impl<'a> PaymentItemsApi<'a> {
    pub(crate) fn new(client: &'a GatewayClient) -> Self {
        Self {
            crud: Crud::new(client, "/payment-items"),
        }
    }

    pub async fn list<T: DeserializeOwned>(&self, query: &ListQuery) -> Result<T, GatewayError> {
        self.crud.list(query).await
    }

    pub async fn get<T: DeserializeOwned>(&self, id: impl Display) -> Result<T, GatewayError> {
        self.crud.get(id).await
    }

    pub async fn create<T, B>(&self, item: &B) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.crud.create(item).await
    }

    pub async fn update<T, B>(&self, id: impl Display, item: &B) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.crud.update(id, item).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, id: impl Display) -> Result<T, GatewayError> {
        self.crud.delete(id).await
    }

    pub async fn bulk_delete<T, I>(&self, ids: &[I]) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
        I: Serialize,
    {
        self.crud.bulk_delete(ids).await
    }

    pub async fn import<T: DeserializeOwned>(&self, file: FilePart) -> Result<T, GatewayError> {
        self.crud.import(file).await
    }
}
