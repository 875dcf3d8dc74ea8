//! Tests for YAML loader module

use super::*;
use crate::auth::{AuthConfig, Location};
use crate::error::Error;
use crate::template::TemplateContext;
use serde_json::json;
use std::io::Write;

const HTTP_TO_HTTP: &str = r#"
name: warehouse-to-inventory
source:
  type: http
  url: "{{ config.warehouse_url }}/items"
  items_path: data.items
  pagination:
    limit: 50
    has_more_path: data.hasMore
  auth:
    type: bearer
    token: "{{ config.token }}"
  params:
    status: available
sink:
  type: http
  url: "{{ config.inventory_url }}/items"
  method: PUT
http:
  timeout_secs: 10
headers:
  X-Client: pagerelay
"#;

// ============================================================================
// Basic Loading Tests
// ============================================================================

#[test]
fn test_load_minimal_definition() {
    let yaml = r#"
name: replay
source:
  type: file
  path: pages.jsonl
sink:
  type: stdout
"#;

    let def = load_definition_from_str(yaml).unwrap();
    assert_eq!(def.name, "replay");
    assert_eq!(def.source.kind(), "file");
    assert_eq!(def.sink.kind(), "stdout");
    assert_eq!(def.http.timeout_secs, 30);
    assert!(def.http.user_agent.is_none());
    assert!(def.headers.is_empty());
}

#[test]
fn test_load_http_definition() {
    let def = load_definition_from_str(HTTP_TO_HTTP).unwrap();
    assert_eq!(def.http.timeout_secs, 10);
    assert_eq!(def.headers.get("X-Client").unwrap(), "pagerelay");

    let SourceDefinition::Http {
        url,
        items_path,
        pagination,
        auth,
        params,
    } = &def.source
    else {
        panic!("expected http source");
    };
    assert_eq!(url, "{{ config.warehouse_url }}/items");
    assert_eq!(items_path.as_deref(), Some("data.items"));
    assert_eq!(pagination.limit, 50);
    assert_eq!(pagination.offset_param, "offset");
    assert_eq!(pagination.limit_param, "limit");
    assert_eq!(pagination.has_more_path.as_deref(), Some("data.hasMore"));
    assert!(matches!(auth, Some(AuthDefinition::Bearer { .. })));
    assert_eq!(params.get("status").unwrap(), "available");

    let SinkDefinition::Http { method, auth, .. } = &def.sink else {
        panic!("expected http sink");
    };
    assert_eq!(method, "PUT");
    assert!(auth.is_none());
}

#[test]
fn test_sink_method_defaults_to_post() {
    let yaml = r#"
name: t
source: { type: file, path: in.json }
sink: { type: http, url: "http://localhost/items" }
"#;
    let def = load_definition_from_str(yaml).unwrap();
    let SinkDefinition::Http { method, .. } = &def.sink else {
        panic!("expected http sink");
    };
    assert_eq!(method, "POST");
}

#[test]
fn test_load_definition_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(HTTP_TO_HTTP.as_bytes()).unwrap();

    let def = load_definition(file.path()).unwrap();
    assert_eq!(def.name, "warehouse-to-inventory");
}

#[test]
fn test_load_definition_missing_file() {
    let err = load_definition("/no/such/transfer.yaml").unwrap_err();
    assert!(matches!(err, Error::FileNotFound { .. }));
}

// ============================================================================
// Validation Tests
// ============================================================================

#[test]
fn test_invalid_yaml() {
    let err = load_definition_from_str("name: [unclosed").unwrap_err();
    assert!(err.to_string().contains("Failed to parse transfer YAML"));
}

#[test]
fn test_unknown_source_type() {
    let yaml = r#"
name: t
source: { type: ftp, path: x }
sink: { type: stdout }
"#;
    assert!(load_definition_from_str(yaml).is_err());
}

#[test]
fn test_empty_name_rejected() {
    let yaml = r#"
name: ""
source: { type: file, path: in.json }
sink: { type: stdout }
"#;
    let err = load_definition_from_str(yaml).unwrap_err();
    assert!(err.to_string().contains("name cannot be empty"));
}

#[test]
fn test_zero_limit_rejected() {
    let yaml = r#"
name: t
source:
  type: http
  url: http://localhost/items
  pagination: { limit: 0 }
sink: { type: stdout }
"#;
    let err = load_definition_from_str(yaml).unwrap_err();
    assert!(matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "source.pagination.limit"));
}

#[test]
fn test_get_sink_method_rejected() {
    let yaml = r#"
name: t
source: { type: file, path: in.json }
sink: { type: http, url: "http://localhost/items", method: GET }
"#;
    let err = load_definition_from_str(yaml).unwrap_err();
    assert!(matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "sink.method"));
}

#[test]
fn test_empty_sink_path_rejected() {
    let yaml = r#"
name: t
source: { type: file, path: in.json }
sink: { type: jsonl, path: "" }
"#;
    assert!(load_definition_from_str(yaml).is_err());
}

// ============================================================================
// Rendering Tests
// ============================================================================

#[test]
fn test_render_definition() {
    let def = load_definition_from_str(HTTP_TO_HTTP).unwrap();
    let ctx = TemplateContext::with_config(json!({
        "warehouse_url": "https://warehouse.example.com",
        "inventory_url": "https://inventory.example.com",
        "token": "secret"
    }));

    let rendered = render_definition(&def, &ctx).unwrap();
    let SourceDefinition::Http { url, auth, .. } = &rendered.source else {
        panic!("expected http source");
    };
    assert_eq!(url, "https://warehouse.example.com/items");
    assert_eq!(
        auth.as_ref().unwrap().to_config().unwrap(),
        AuthConfig::Bearer {
            token: "secret".to_string()
        }
    );

    let SinkDefinition::Http { url, .. } = &rendered.sink else {
        panic!("expected http sink");
    };
    assert_eq!(url, "https://inventory.example.com/items");
}

#[test]
fn test_render_definition_from_env() {
    let yaml = r#"
name: t
source: { type: file, path: "{{ env.PAGERELAY_TEST_DIR }}/pages.json" }
sink: { type: stdout }
"#;
    let def = load_definition_from_str(yaml).unwrap();
    let mut ctx = TemplateContext::new();
    ctx.set_env(json!({ "PAGERELAY_TEST_DIR": "/data" }));

    let rendered = render_definition(&def, &ctx).unwrap();
    let SourceDefinition::File { path } = &rendered.source else {
        panic!("expected file source");
    };
    assert_eq!(path, "/data/pages.json");
}

#[test]
fn test_render_definition_missing_variable() {
    let def = load_definition_from_str(HTTP_TO_HTTP).unwrap();
    let err = render_definition(&def, &TemplateContext::new()).unwrap_err();
    assert!(matches!(err, Error::UndefinedVariable { .. }));
}

#[test]
fn test_pagination_strategy_and_layout() {
    let pagination = PaginationDefinition {
        limit: 25,
        start_offset: 50,
        total_path: Some("meta.total".to_string()),
        ..Default::default()
    };
    let strategy = pagination.strategy();
    assert_eq!(strategy.limit, 25);
    assert_eq!(strategy.initial_cursor().offset, 50);

    let layout = pagination.layout(Some("items"));
    assert_eq!(layout.items_path.as_deref(), Some("items"));
    assert_eq!(layout.total_path.as_deref(), Some("meta.total"));
    assert!(layout.has_more_path.is_none());
}

#[test]
fn test_api_key_auth_to_config() {
    let auth = AuthDefinition::ApiKey {
        key: "api_key".to_string(),
        value: "k".to_string(),
        location: "query".to_string(),
    };
    assert_eq!(
        auth.to_config().unwrap(),
        AuthConfig::ApiKey {
            location: Location::Query,
            key: "api_key".to_string(),
            value: "k".to_string(),
        }
    );
    assert!(AuthDefinition::None.to_config().unwrap().is_none());
}
