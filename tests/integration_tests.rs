//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: configuration → HTTP requests → flattened upserts → JSON lines

use fleetio_connector::cli::write_upserts;
use fleetio_connector::output::{JsonlWriter, OutputFormat, UpsertMessage};
use fleetio_connector::{
    Configuration, Connector, ConnectorSettings, FleetioConnector, State, TableRegistry, UpsertOp,
};
use futures::StreamExt;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::Write;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn connector_for(server: &MockServer, tables: &[&str]) -> FleetioConnector {
    let configuration = Configuration::new()
        .with("Authorization", "Token secret")
        .with("Account-Token", "acct-1");
    let settings = ConnectorSettings::new().with_base_url(format!("{}/api", server.uri()));

    FleetioConnector::from_configuration(&configuration, &settings)
        .unwrap()
        .with_registry(TableRegistry::builtin().select(tables).unwrap())
}

/// Mount a two page endpoint: page one carries `per_page`, page two only the cursor
async fn mount_two_pages(
    server: &MockServer,
    endpoint: &str,
    first: serde_json::Value,
    second: serde_json::Value,
) {
    Mock::given(method("GET"))
        .and(path(format!("/api{endpoint}")))
        .and(query_param("per_page", "100"))
        .and(query_param_is_missing("next_cursor"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"records": first, "next_cursor": "page-2"})),
        )
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/api{endpoint}")))
        .and(query_param("next_cursor", "page-2"))
        .and(query_param_is_missing("per_page"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"records": second, "next_cursor": null})),
        )
        .expect(1)
        .mount(server)
        .await;
}

// ============================================================================
// Schema
// ============================================================================

#[test]
fn test_schema_declares_every_builtin_table() {
    let connector = FleetioConnector::from_configuration(
        &Configuration::new(),
        &ConnectorSettings::default(),
    )
    .unwrap();

    let schema = serde_json::to_value(connector.schema()).unwrap();
    let tables = schema.as_array().unwrap();
    assert_eq!(tables.len(), 10);
    assert_eq!(tables[0]["table"], "submitted_inspection_forms");
    assert_eq!(tables[9]["table"], "vehicle_assignments");

    let issues = &tables[1];
    assert_eq!(
        issues,
        &json!({
            "table": "issues",
            "primary_key": ["id"],
            "columns": {
                "assigned_contacts": "JSON",
                "attachment_permissions": "JSON",
                "custom_fields": "JSON",
                "labels": "JSON"
            }
        })
    );
    for table in tables {
        assert!(table.get("request").is_none());
        assert!(table.get("path").is_none());
    }
}

// ============================================================================
// Sync
// ============================================================================

#[tokio::test]
async fn test_sync_follows_cursor_across_tables() {
    let server = MockServer::start().await;
    mount_two_pages(
        &server,
        "/v1/vehicles",
        json!([
            {"id": 1, "name": "Truck", "specs": {"engine": {"cylinders": 6}}, "labels": ["red"]},
            {"id": 2, "name": "Van", "specs": null, "labels": []}
        ]),
        json!([{"id": 3, "name": "Car", "custom_fields": {}}]),
    )
    .await;
    mount_two_pages(
        &server,
        "/v1/parts",
        json!([{"id": 10, "number": "P-10"}]),
        json!([{"id": 11, "number": "P-11"}]),
    )
    .await;

    let connector = connector_for(&server, &["parts", "vehicles"]);
    let ops: Vec<UpsertOp> = connector.update(&State::new()).collect().await;

    // Registry order, not selection order
    let emitted: Vec<(String, i64)> = ops
        .iter()
        .map(|op| (op.table.clone(), op.data["id"].as_i64().unwrap()))
        .collect();
    assert_eq!(
        emitted,
        vec![
            ("vehicles".to_string(), 1),
            ("vehicles".to_string(), 2),
            ("vehicles".to_string(), 3),
            ("parts".to_string(), 10),
            ("parts".to_string(), 11),
        ]
    );

    assert_eq!(ops[0].data["specs.engine.cylinders"], json!(6));
    assert_eq!(ops[0].data["labels"], json!("[\"red\"]"));
    assert_eq!(ops[1].data["specs"], json!(null));
    assert_eq!(ops[1].data["labels"], json!("[]"));
    assert_eq!(ops[2].data["custom_fields"], json!("{}"));
    assert_eq!(ops[3].data["number"], json!("P-10"));
}

#[tokio::test]
async fn test_sync_sends_configuration_and_fixed_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/contacts"))
        .and(header("Authorization", "Token secret"))
        .and(header("Account-Token", "acct-1"))
        .and(header("Accept", "application/json"))
        .and(header("X-Api-Version", "2024-03-15"))
        .and(header("X-Client-Name", "data_connector"))
        .and(header("X-Client-Platform", "fleetio_fivetran"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"records": [{"id": 5}]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let connector = connector_for(&server, &["contacts"]);
    let ops: Vec<UpsertOp> = connector.update(&State::new()).collect().await;
    assert_eq!(ops.len(), 1);
    assert_eq!(ops[0].table, "contacts");
}

#[tokio::test]
async fn test_failing_table_is_skipped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/issues"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/fuel_entries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": [{"id": 1, "gallons": 12.5}],
            "next_cursor": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let connector = connector_for(&server, &["issues", "fuel_entries"]);
    let ops: Vec<UpsertOp> = connector.update(&State::new()).collect().await;

    assert_eq!(ops.len(), 1);
    assert_eq!(ops[0].table, "fuel_entries");
    assert_eq!(ops[0].data["gallons"], json!(12.5));
}

#[tokio::test]
async fn test_failure_mid_table_keeps_earlier_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/parts"))
        .and(query_param_is_missing("next_cursor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": [{"id": 1}, {"id": 2}],
            "next_cursor": "c2"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/parts"))
        .and(query_param("next_cursor", "c2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let connector = connector_for(&server, &["parts"]);
    let ops: Vec<UpsertOp> = connector.update(&State::new()).collect().await;
    let ids: Vec<i64> = ops.iter().map(|op| op.data["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn test_sync_is_lazy() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/expense_entries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": [{"id": 1}, {"id": 2}],
            "next_cursor": "more"
        })))
        .mount(&server)
        .await;

    let connector = connector_for(&server, &["expense_entries"]);
    let upserts = connector.update(&State::new());
    assert!(server.received_requests().await.unwrap().is_empty());

    // One page is enough for the first upsert
    let first: Vec<UpsertOp> = upserts.take(1).collect().await;
    assert_eq!(first.len(), 1);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_sync_to_jsonl_file() {
    let server = MockServer::start().await;
    mount_two_pages(
        &server,
        "/v1/vehicle_assignments",
        json!([{"id": 1, "vehicle": {"id": 7}}]),
        json!([{"id": 2, "vehicle": {"id": 8}}]),
    )
    .await;

    let connector = connector_for(&server, &["vehicle_assignments"]);
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("upserts.jsonl");
    let writer = JsonlWriter::create(&out, OutputFormat::Json).unwrap();

    let stats = write_upserts(connector.update(&State::new()), writer)
        .await
        .unwrap();
    assert_eq!(stats.records_synced, 2);
    assert_eq!(stats.table_count("vehicle_assignments"), 2);

    let content = std::fs::read_to_string(&out).unwrap();
    let messages: Vec<UpsertMessage> = content
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].kind, "UPSERT");
    assert_eq!(messages[1].data["vehicle.id"], json!(8));
}

#[tokio::test]
async fn test_sync_with_registry_file() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/meter_entries"))
        .and(query_param("per_page", "25"))
        .and(query_param("include_void", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": [{"id": 100, "value": 12000}],
            "next_cursor": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(
        br"
tables:
  - name: meter_entries
    primary_key: [id]
    request:
      path: /v1/meter_entries
      params:
        per_page: 25
        include_void: true
",
    )
    .unwrap();

    let registry = TableRegistry::from_file(file.path()).unwrap();
    let settings = ConnectorSettings::new().with_base_url(format!("{}/api", server.uri()));
    let connector = FleetioConnector::from_configuration(&Configuration::new(), &settings)
        .unwrap()
        .with_registry(registry);

    let ops: Vec<UpsertOp> = connector.update(&State::new()).collect().await;
    assert_eq!(ops.len(), 1);
    assert_eq!(ops[0].table, "meter_entries");
    assert_eq!(ops[0].data["value"], json!(12000));
}
