//! Built-in Fleetio table registry
//!
//! Constructed once on first use and shared read-only by the schema and sync
//! paths. Order matters: tables are synced in the order listed here.

use super::types::{TableDefinition, TableRegistry};
use std::sync::LazyLock;

static BUILTIN_REGISTRY: LazyLock<TableRegistry> =
    LazyLock::new(|| TableRegistry::from_trusted(fleetio_tables()));

impl TableRegistry {
    /// The Fleetio tables shipped with the connector
    pub fn builtin() -> &'static TableRegistry {
        &BUILTIN_REGISTRY
    }
}

fn fleetio_tables() -> Vec<TableDefinition> {
    vec![
        TableDefinition::new(
            "submitted_inspection_forms",
            "/v1/submitted_inspection_forms",
        ),
        TableDefinition::new("issues", "/v2/issues")
            .json_column("custom_fields")
            .json_column("attachment_permissions")
            .json_column("assigned_contacts")
            .json_column("labels"),
        TableDefinition::new("service_entries", "/v2/service_entries")
            .json_column("custom_fields")
            .json_column("attachment_permissions")
            .json_column("labels"),
        TableDefinition::new("vehicles", "/v1/vehicles")
            .json_column("custom_fields")
            .json_column("labels"),
        TableDefinition::new("expense_entries", "/v1/expense_entries"),
        TableDefinition::new("contacts", "/v2/contacts"),
        TableDefinition::new("fuel_entries", "/v1/fuel_entries"),
        TableDefinition::new("parts", "/v1/parts"),
        TableDefinition::new("purchase_orders", "/v1/purchase_orders")
            .json_column("custom_fields")
            .json_column("labels"),
        TableDefinition::new("vehicle_assignments", "/v1/vehicle_assignments"),
    ]
}
