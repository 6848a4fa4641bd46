//! Shipment records, their documents, and the containers and bills of lading
//! nested under them.

use super::crud::{import_request, Crud};
use crate::client::{BinaryPayload, GatewayClient};
use crate::error::GatewayError;
use crate::request::{segment, FilePart, MultipartPayload, RequestDescriptor};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Display;

const BASE: &str = "/shipments";

/// Multipart field carrying the file on create-with-attachment.
pub const ATTACHMENT_FIELD: &str = "attachment";
/// Multipart field carrying the file on document upload.
pub const DOCUMENT_FIELD: &str = "document";

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ShipmentQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

pub struct ShipmentsApi<'a> {
    client: &'a GatewayClient,
    crud: Crud<'a>,
}

impl<'a> ShipmentsApi<'a> {
    pub(crate) fn new(client: &'a GatewayClient) -> Self {
        Self {
            client,
            crud: Crud::new(client, BASE),
        }
    }

    /// `GET /shipments`
    pub async fn list<T: DeserializeOwned>(&self, query: &ShipmentQuery) -> Result<T, GatewayError> {
        self.crud.list(query).await
    }

    /// `GET /shipments/{id}`
    pub async fn get<T: DeserializeOwned>(&self, id: impl Display) -> Result<T, GatewayError> {
        self.crud.get(id).await
    }

    /// `POST /shipments` with a JSON body.
    pub async fn create<T, B>(&self, shipment: &B) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.crud.create(shipment).await
    }

    /// `POST /shipments` as multipart: the record's fields plus one attachment.
    pub async fn create_with_attachment<T, B>(
        &self,
        shipment: &B,
        attachment: FilePart,
    ) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let payload = MultipartPayload::new()
            .json_fields(shipment)?
            .file(ATTACHMENT_FIELD, attachment);
        self.client
            .json(&RequestDescriptor::post(BASE).with_multipart(payload))
            .await
    }

    /// `PUT /shipments/{id}`
    pub async fn update<T, B>(&self, id: impl Display, shipment: &B) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.crud.update(id, shipment).await
    }

    /// `DELETE /shipments/{id}`
    pub async fn delete<T: DeserializeOwned>(&self, id: impl Display) -> Result<T, GatewayError> {
        self.crud.delete(id).await
    }

    /// `POST /shipments/import` (multipart)
    pub async fn import<T: DeserializeOwned>(&self, file: FilePart) -> Result<T, GatewayError> {
        self.client.json(&import_request(BASE, file)).await
    }

    // --- documents ---

    /// `POST /shipments/{id}/documents` (multipart)
    pub async fn upload_document<T: DeserializeOwned>(
        &self,
        shipment_id: impl Display,
        document_type: Option<&str>,
        document: FilePart,
    ) -> Result<T, GatewayError> {
        self.client
            .json(&upload_document_request(shipment_id, document_type, document))
            .await
    }

    /// `DELETE /shipments/{id}/documents/{doc}`
    pub async fn delete_document<T: DeserializeOwned>(
        &self,
        shipment_id: impl Display,
        document_id: impl Display,
    ) -> Result<T, GatewayError> {
        let path = document_path(&shipment_id, &document_id, None);
        self.client.json(&RequestDescriptor::delete(path)).await
    }

    /// `GET /shipments/{id}/documents/{doc}/view`, raw bytes for inline display.
    pub async fn view_document(
        &self,
        shipment_id: impl Display,
        document_id: impl Display,
    ) -> Result<BinaryPayload, GatewayError> {
        self.client
            .binary(&document_request(&shipment_id, &document_id, "view"))
            .await
    }

    /// `GET /shipments/{id}/documents/{doc}/download`, raw bytes as an attachment.
    pub async fn download_document(
        &self,
        shipment_id: impl Display,
        document_id: impl Display,
    ) -> Result<BinaryPayload, GatewayError> {
        self.client
            .binary(&document_request(&shipment_id, &document_id, "download"))
            .await
    }

    // --- nested resources ---

    /// Containers loaded on one shipment.
    pub fn containers(&self, shipment_id: impl Display) -> NestedApi<'a> {
        NestedApi::new(self.client, &shipment_id, "containers")
    }

    /// Bills of lading issued for one shipment.
    pub fn bills_of_lading(&self, shipment_id: impl Display) -> NestedApi<'a> {
        NestedApi::new(self.client, &shipment_id, "bills-of-lading")
    }
}

fn document_path(shipment_id: &dyn Display, document_id: &dyn Display, action: Option<&str>) -> String {
    let mut path = format!(
        "{}/{}/documents/{}",
        BASE,
        segment(shipment_id),
        segment(document_id)
    );
    if let Some(action) = action {
        path.push('/');
        path.push_str(action);
    }
    path
}

pub(crate) fn document_request(
    shipment_id: &dyn Display,
    document_id: &dyn Display,
    action: &str,
) -> RequestDescriptor {
    RequestDescriptor::get(document_path(shipment_id, document_id, Some(action))).expect_binary()
}

pub(crate) fn upload_document_request(
    shipment_id: impl Display,
    document_type: Option<&str>,
    document: FilePart,
) -> RequestDescriptor {
    let mut payload = MultipartPayload::new();
    if let Some(kind) = document_type {
        payload = payload.text("type", kind);
    }
    payload = payload.file(DOCUMENT_FIELD, document);
    RequestDescriptor::post(format!("{}/{}/documents", BASE, segment(shipment_id)))
        .with_multipart(payload)
}

/// CRUD over `/shipments/{id}/<collection>`.
pub struct NestedApi<'a> {
    crud: Crud<'a>,
}

impl<'a> NestedApi<'a> {
    fn new(client: &'a GatewayClient, shipment_id: &dyn Display, collection: &str) -> Self {
        Self {
            crud: Crud::new(
                client,
                format!("{}/{}/{}", BASE, segment(shipment_id), collection),
            ),
        }
    }

    pub async fn list<T: DeserializeOwned>(&self) -> Result<T, GatewayError> {
        self.crud.list(&()).await
    }

    pub async fn get<T: DeserializeOwned>(&self, id: impl Display) -> Result<T, GatewayError> {
        self.crud.get(id).await
    }

    pub async fn create<T, B>(&self, body: &B) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.crud.create(body).await
    }

    pub async fn update<T, B>(&self, id: impl Display, body: &B) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.crud.update(id, body).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, id: impl Display) -> Result<T, GatewayError> {
        self.crud.delete(id).await
    }
}
