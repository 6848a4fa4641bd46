//! Request descriptors.
//!
//! A [`RequestDescriptor`] is assembled by an endpoint wrapper and handed to
//! [`GatewayClient::dispatch`](crate::GatewayClient::dispatch), which only
//! reads it. Multipart payloads are kept as plain data until dispatch so they
//! can be inspected (and re-dispatched) freely.

use crate::error::GatewayError;
use http::Method;
use reqwest::multipart::{Form, Part};
use serde::Serialize;

/// Path fragment identifying the login endpoint.
pub const LOGIN_PATH: &str = "/auth/login";

/// How the response body should be handed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseKind {
    /// Decode as JSON.
    #[default]
    Json,
    /// Return raw bytes, never decoded.
    Binary,
}

/// Request payload.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    Multipart(MultipartPayload),
}

/// A file attached to a multipart request.
#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    pub file_name: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl FilePart {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
enum MultipartField {
    Text(String),
    File(FilePart),
}

/// Ordered multipart form fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultipartPayload {
    fields: Vec<(String, MultipartField)>,
}

impl MultipartPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields
            .push((name.into(), MultipartField::Text(value.into())));
        self
    }

    pub fn file(mut self, name: impl Into<String>, file: FilePart) -> Self {
        self.fields.push((name.into(), MultipartField::File(file)));
        self
    }

    /// Flatten a JSON object into text fields; nested values are sent as JSON text.
    pub fn json_fields<T: Serialize>(mut self, value: &T) -> Result<Self, GatewayError> {
        match serde_json::to_value(value)? {
            serde_json::Value::Object(map) => {
                for (name, value) in map {
                    let text = match value {
                        serde_json::Value::Null => continue,
                        serde_json::Value::String(s) => s,
                        other => other.to_string(),
                    };
                    self = self.text(name, text);
                }
                Ok(self)
            }
            serde_json::Value::Null => Ok(self),
            other => Err(GatewayError::InvalidRequest(format!(
                "multipart fields must come from an object, got {other}"
            ))),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.fields.iter().find_map(|(n, field)| match field {
            MultipartField::Text(value) if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn file_part(&self, name: &str) -> Option<&FilePart> {
        self.fields.iter().find_map(|(n, field)| match field {
            MultipartField::File(file) if n == name => Some(file),
            _ => None,
        })
    }

    pub(crate) fn to_form(&self) -> Result<Form, GatewayError> {
        let mut form = Form::new();
        for (name, field) in &self.fields {
            form = match field {
                MultipartField::Text(value) => form.text(name.clone(), value.clone()),
                MultipartField::File(file) => {
                    let mut part =
                        Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
                    if let Some(mime) = &file.mime_type {
                        part = part.mime_str(mime).map_err(|e| {
                            GatewayError::InvalidRequest(format!("invalid MIME type {mime}: {e}"))
                        })?;
                    }
                    form.part(name.clone(), part)
                }
            };
        }
        Ok(form)
    }
}

/// Everything needed to issue one API call.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    method: Method,
    path: String,
    query: Option<String>,
    body: RequestBody,
    response: ResponseKind,
}

impl RequestDescriptor {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: None,
            body: RequestBody::Empty,
            response: ResponseKind::Json,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach query parameters; `None` fields are omitted.
    pub fn with_query<Q: Serialize + ?Sized>(mut self, query: &Q) -> Result<Self, GatewayError> {
        let encoded = serde_urlencoded::to_string(query)
            .map_err(|e| GatewayError::InvalidRequest(format!("cannot encode query: {e}")))?;
        self.query = (!encoded.is_empty()).then_some(encoded);
        Ok(self)
    }

    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, GatewayError> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn with_multipart(mut self, payload: MultipartPayload) -> Self {
        self.body = RequestBody::Multipart(payload);
        self
    }

    /// Ask for the raw response bytes instead of decoded JSON.
    pub fn expect_binary(mut self) -> Self {
        self.response = ResponseKind::Binary;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    pub fn response_kind(&self) -> ResponseKind {
        self.response
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self.body, RequestBody::Multipart(_))
    }

    /// Whether this request targets the login endpoint; a 401 there is a
    /// rejected credential, not an expired session.
    pub fn is_login(&self) -> bool {
        self.path.contains(LOGIN_PATH)
    }
}

/// Percent-encode a caller-supplied identifier for use as one path segment.
pub fn segment(value: impl std::fmt::Display) -> String {
    urlencoding::encode(&value.to_string()).into_owned()
}
