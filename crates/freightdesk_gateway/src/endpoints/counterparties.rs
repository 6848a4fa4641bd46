//! Counterparty directories. All five share one shape and differ only in
//! their path.

use super::crud::Crud;
use super::ListQuery;
use crate::client::GatewayClient;
use crate::error::GatewayError;
use crate::request::FilePart;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directory {
    Consignees,
    Customers,
    Exporters,
    Vendors,
    DeliveryAgents,
}

impl Directory {
    pub const ALL: [Directory; 5] = [
        Directory::Consignees,
        Directory::Customers,
        Directory::Exporters,
        Directory::Vendors,
        Directory::DeliveryAgents,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Directory::Consignees => "/consignees",
            Directory::Customers => "/customers",
            Directory::Exporters => "/exporters",
            Directory::Vendors => "/vendors",
            Directory::DeliveryAgents => "/delivery-agents",
        }
    }
}

impl Display for Directory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path().trim_start_matches('/'))
    }
}

pub struct CounterpartyApi<'a> {
    crud: Crud<'a>,
}

impl<'a> CounterpartyApi<'a> {
    pub(crate) fn new(client: &'a GatewayClient, directory: Directory) -> Self {
        Self {
            crud: Crud::new(client, directory.path()),
        }
    }

    pub async fn list<T: DeserializeOwned>(&self, query: &ListQuery) -> Result<T, GatewayError> {
        self.crud.list(query).await
    }

    pub async fn get<T: DeserializeOwned>(&self, id: impl Display) -> Result<T, GatewayError> {
        self.crud.get(id).await
    }

    pub async fn create<T, B>(&self, record: &B) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.crud.create(record).await
    }

    pub async fn update<T, B>(&self, id: impl Display, record: &B) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.crud.update(id, record).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, id: impl Display) -> Result<T, GatewayError> {
        self.crud.delete(id).await
    }

    /// `POST <directory>/bulk-delete` with `{"ids": [...]}`.
    pub async fn bulk_delete<T, I>(&self, ids: &[I]) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
        I: Serialize,
    {
        self.crud.bulk_delete(ids).await
    }

    /// `POST <directory>/import` (multipart)
    pub async fn import<T: DeserializeOwned>(&self, file: FilePart) -> Result<T, GatewayError> {
        self.crud.import(file).await
    }
}
