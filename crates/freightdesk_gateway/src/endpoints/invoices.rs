//! Invoices. Issued server-side, so the client can only read them.

use super::crud::Crud;
use super::ListQuery;
use crate::client::GatewayClient;
use crate::error::GatewayError;
use serde::de::DeserializeOwned;
use std::fmt::Display;

pub struct InvoicesApi<'a> {
    crud: Crud<'a>,
}

impl<'a> InvoicesApi<'a> {
    pub(crate) fn new(client: &'a GatewayClient) -> Self {
        Self {
            crud: Crud::new(client, "/invoices"),
        }
    }

    /// `GET /invoices`
    pub async fn list<T: DeserializeOwned>(&self, query: &ListQuery) -> Result<T, GatewayError> {
        self.crud.list(query).await
    }

    /// `GET /invoices/{id}`
    pub async fn get<T: DeserializeOwned>(&self, id: impl Display) -> Result<T, GatewayError> {
        self.crud.get(id).await
    }
}
