//! User accounts and profile photos.

use super::crud::Crud;
use super::ListQuery;
use crate::client::GatewayClient;
use crate::error::GatewayError;
use crate::request::{FilePart, MultipartPayload, RequestDescriptor};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Display;

const BASE: &str = "/users";

/// Multipart field carrying the profile photo.
pub const PHOTO_FIELD: &str = "photo";

pub struct UsersApi<'a> {
    client: &'a GatewayClient,
    crud: Crud<'a>,
}

impl<'a> UsersApi<'a> {
    pub(crate) fn new(client: &'a GatewayClient) -> Self {
        Self {
            client,
            crud: Crud::new(client, BASE),
        }
    }

    /// `GET /users`
    pub async fn list<T: DeserializeOwned>(&self, query: &ListQuery) -> Result<T, GatewayError> {
        self.crud.list(query).await
    }

    /// `GET /users/{id}`
    pub async fn get<T: DeserializeOwned>(&self, id: impl Display) -> Result<T, GatewayError> {
        self.crud.get(id).await
    }

    /// `POST /users`
    pub async fn create<T, B>(&self, user: &B) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.crud.create(user).await
    }

    /// `PUT /users/{id}`
    pub async fn update<T, B>(&self, id: impl Display, user: &B) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.crud.update(id, user).await
    }

    /// `DELETE /users/{id}`
    pub async fn delete<T: DeserializeOwned>(&self, id: impl Display) -> Result<T, GatewayError> {
        self.crud.delete(id).await
    }

    /// `POST /users/{id}/photo` (multipart)
    pub async fn upload_photo<T: DeserializeOwned>(
        &self,
        id: impl Display,
        photo: FilePart,
    ) -> Result<T, GatewayError> {
        self.client.json(&self.photo_upload_request(id, photo)).await
    }

    /// `DELETE /users/{id}/photo`
    pub async fn remove_photo<T: DeserializeOwned>(&self, id: impl Display) -> Result<T, GatewayError> {
        let path = format!("{}/photo", self.crud.item_path(id));
        self.client.json(&RequestDescriptor::delete(path)).await
    }

    fn photo_upload_request(&self, id: impl Display, photo: FilePart) -> RequestDescriptor {
        RequestDescriptor::post(format!("{}/photo", self.crud.item_path(id)))
            .with_multipart(MultipartPayload::new().file(PHOTO_FIELD, photo))
    }
}
