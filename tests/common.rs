//! Common test fixtures: schemas and instances shared by the integration tests.
use formwork::prelude::*;
use serde_json::{Value, json};

/// The smallest schema with a repeatable section.
#[allow(dead_code)]
pub fn routes_schema() -> Schema {
    json!({
        "parameters": [
            {"name": "port", "type": "integer"},
            {"name": "routes", "type": [
                {"name": "path", "type": "string"}
            ]}
        ]
    })
    .into_schema()
    .expect("routes schema parses")
}

/// A schema exercising every scalar kind, two levels of nested lists and all
/// three enumeration flavours (short list, multiselect, long list edited by label).
#[allow(dead_code)]
pub fn service_schema() -> Schema {
    json!({
        "parameters": [
            {"name": "id", "label": "Id", "type": "string", "readonly": true},
            {"name": "name", "label": "Name", "type": "string", "default_value": "svc"},
            {"name": "port", "label": "Port", "type": "integer"},
            {"name": "ratio", "label": "Ratio", "type": "float"},
            {"name": "enabled", "label": "Enabled", "type": "boolean"},
            {"name": "since", "label": "Since", "type": "date"},
            {"name": "schedule", "label": "Schedule", "type": "cron"},
            {"name": "color", "label": "Color", "type": "color"},
            {"name": "tags", "label": "Tags", "type": "tag"},
            {"name": "country", "label": "Country", "type": "country"},
            {"name": "endpoints", "label": "Endpoints", "type": [
                {"name": "path", "label": "Path", "type": "string"},
                {"name": "method", "label": "Method", "type": "method", "default_value": "get"},
                {"name": "timeout", "label": "Timeout", "type": "integer"},
                {"name": "headers", "label": "Headers", "type": [
                    {"name": "key", "label": "Key", "type": "string"},
                    {"name": "value", "label": "Value", "type": "string"}
                ]}
            ]}
        ],
        "option_types": [
            {"option_name": "color", "multiselect": false, "options": [
                {"id": "r", "label": "Red"},
                {"id": "g", "label": "Green"},
                {"id": "b", "label": "Blue"}
            ]},
            {"option_name": "tag", "multiselect": true, "options": [
                {"id": "a", "label": "Alpha"},
                {"id": "b", "label": "Beta"},
                {"id": "c", "label": "Gamma"}
            ]},
            {"option_name": "method", "options": [
                {"id": "get", "label": "GET"},
                {"id": "post", "label": "POST"}
            ]},
            {"option_name": "country", "options": [
                {"id": "at", "label": "Austria"},
                {"id": "be", "label": "Belgium"},
                {"id": "ch", "label": "Switzerland"},
                {"id": "de", "label": "Germany"},
                {"id": "dk", "label": "Denmark"},
                {"id": "es", "label": "Spain"},
                {"id": "fi", "label": "Finland"},
                {"id": "fr", "label": "France"},
                {"id": "it", "label": "Italy"},
                {"id": "nl", "label": "Netherlands"},
                {"id": "no", "label": "Norway"},
                {"id": "se", "label": "Sweden"}
            ]}
        ]
    })
    .into_schema()
    .expect("service schema parses")
}

/// A well-typed instance of [`service_schema`].
#[allow(dead_code)]
pub fn service_instance() -> Group {
    as_group(json!({
        "id": "svc-1",
        "name": "api",
        "port": 8080,
        "ratio": 0.75,
        "enabled": true,
        "since": "2024-01-31",
        "schedule": "*/5 * * * *",
        "color": "g",
        "tags": "a,c",
        "country": "de",
        "endpoints": [
            {"path": "/health", "method": "get", "timeout": 5, "headers": []},
            {"path": "/items", "method": "post", "timeout": 30, "headers": [
                {"key": "accept", "value": "json"}
            ]}
        ]
    }))
}

#[allow(dead_code)]
pub fn as_group(value: Value) -> Group {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}

/// Entry names of a group node, in tree order.
#[allow(dead_code)]
pub fn entry_names(tree: &NodeTree, group: NodeId) -> Vec<String> {
    tree.group(group)
        .expect("group exists")
        .entries
        .iter()
        .map(|entry| entry.name.clone())
        .collect()
}
