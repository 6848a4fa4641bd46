//! Typed wrappers over the FreightDesk REST surface, one module per resource.
//!
//! Each wrapper only decides method, path, query and body encoding; all
//! session handling lives in [`GatewayClient`]. Record types are chosen by
//! the caller (`serde_json::Value` works for everything).

pub mod analytics;
pub mod audit_logs;
pub mod auth;
pub mod clearance;
pub mod containers;
pub mod counterparties;
pub mod delivery_notes;
pub mod fleet;
pub mod invoices;
pub mod payments;
pub mod shipments;
pub mod users;

mod crud;

pub use analytics::{AnalyticsApi, AnalyticsQuery};
pub use audit_logs::{AuditLogQuery, AuditLogsApi};
pub use auth::{AuthApi, LoginRequest, LoginResponse};
pub use clearance::{ClearanceApi, ClearanceQuery};
pub use containers::{ContainerQuery, ContainersApi};
pub use counterparties::{CounterpartyApi, Directory};
pub use delivery_notes::DeliveryNotesApi;
pub use fleet::FleetApi;
pub use invoices::InvoicesApi;
pub use payments::{PaymentItemsApi, PaymentsApi};
pub use shipments::{ShipmentQuery, ShipmentsApi};
pub use users::UsersApi;

use crate::client::GatewayClient;
use serde::Serialize;

/// Common list filter: pagination plus free-text search.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// Body of every `bulk-delete` endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct BulkDelete<'a, I: Serialize> {
    pub ids: &'a [I],
}

/// Multipart field name used by every bulk-import endpoint.
pub const IMPORT_FIELD: &str = "file";

impl GatewayClient {
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn shipments(&self) -> ShipmentsApi<'_> {
        ShipmentsApi::new(self)
    }

    pub fn fleet(&self) -> FleetApi<'_> {
        FleetApi::new(self)
    }

    pub fn analytics(&self) -> AnalyticsApi<'_> {
        AnalyticsApi::new(self)
    }

    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(self)
    }

    pub fn audit_logs(&self) -> AuditLogsApi<'_> {
        AuditLogsApi::new(self)
    }

    pub fn delivery_notes(&self) -> DeliveryNotesApi<'_> {
        DeliveryNotesApi::new(self)
    }

    pub fn invoices(&self) -> InvoicesApi<'_> {
        InvoicesApi::new(self)
    }

    pub fn directory(&self, directory: Directory) -> CounterpartyApi<'_> {
        CounterpartyApi::new(self, directory)
    }

    pub fn clearance(&self) -> ClearanceApi<'_> {
        ClearanceApi::new(self)
    }

    pub fn payments(&self) -> PaymentsApi<'_> {
        PaymentsApi::new(self)
    }

    pub fn payment_items(&self) -> PaymentItemsApi<'_> {
        PaymentItemsApi::new(self)
    }

    pub fn containers(&self) -> ContainersApi<'_> {
        ContainersApi::new(self)
    }
}
