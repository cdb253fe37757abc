//! Lookup tables from internal node vocabulary to the external engine's types.
//!
//! Every row is data, not logic. A key with no row resolves to [`FALLBACK`].

use std::str::FromStr;

use serde_json::{Map, Value, json};

use crate::workflow::consts::NOOP_NODE_TYPE;

/// Internal node vocabulary, as stored in `NodeData::kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::AsRefStr, strum::EnumString, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum NodeKind {
    Trigger,
    Webhook,
    Schedule,
    Http,
    Email,
    Slack,
    Condition,
    Code,
    Transform,
    Delay,
    Database,
}

/// One row of the type table.
#[derive(Debug)]
pub struct NodeTypeEntry {
    /// `None` only for the fallback row.
    pub kind: Option<NodeKind>,
    pub external: &'static str,
    pub version: u32,
    pub defaults: fn() -> Map<String, Value>,
}

pub const NODE_TYPES: &[NodeTypeEntry] = &[
    NodeTypeEntry {
        kind: Some(NodeKind::Trigger),
        external: "n8n-nodes-base.manualTrigger",
        version: 1,
        defaults: empty,
    },
    NodeTypeEntry {
        kind: Some(NodeKind::Webhook),
        external: "n8n-nodes-base.webhook",
        version: 2,
        defaults: webhook,
    },
    NodeTypeEntry {
        kind: Some(NodeKind::Schedule),
        external: "n8n-nodes-base.scheduleTrigger",
        version: 1,
        defaults: schedule,
    },
    NodeTypeEntry {
        kind: Some(NodeKind::Http),
        external: "n8n-nodes-base.httpRequest",
        version: 4,
        defaults: http,
    },
    NodeTypeEntry {
        kind: Some(NodeKind::Email),
        external: "n8n-nodes-base.emailSend",
        version: 2,
        defaults: email,
    },
    NodeTypeEntry {
        kind: Some(NodeKind::Slack),
        external: "n8n-nodes-base.slack",
        version: 2,
        defaults: slack,
    },
    NodeTypeEntry {
        kind: Some(NodeKind::Condition),
        external: "n8n-nodes-base.if",
        version: 2,
        defaults: condition,
    },
    NodeTypeEntry {
        kind: Some(NodeKind::Code),
        external: "n8n-nodes-base.code",
        version: 2,
        defaults: code,
    },
    NodeTypeEntry {
        kind: Some(NodeKind::Transform),
        external: "n8n-nodes-base.set",
        version: 3,
        defaults: transform,
    },
    NodeTypeEntry {
        kind: Some(NodeKind::Delay),
        external: "n8n-nodes-base.wait",
        version: 1,
        defaults: delay,
    },
    NodeTypeEntry {
        kind: Some(NodeKind::Database),
        external: "n8n-nodes-base.postgres",
        version: 2,
        defaults: database,
    },
];

pub static FALLBACK: NodeTypeEntry = NodeTypeEntry {
    kind: None,
    external: NOOP_NODE_TYPE,
    version: 1,
    defaults: empty,
};

/// Resolve an internal type key. Never fails.
pub fn resolve(key: &str) -> &'static NodeTypeEntry {
    NodeKind::from_str(key).ok().and_then(|kind| NODE_TYPES.iter().find(|entry| entry.kind == Some(kind))).unwrap_or(&FALLBACK)
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn empty() -> Map<String, Value> {
    Map::new()
}

fn webhook() -> Map<String, Value> {
    object(json!({
        "httpMethod": "POST",
        "path": "",
        "responseMode": "onReceived"
    }))
}

fn schedule() -> Map<String, Value> {
    object(json!({
        "rule": { "interval": [{ "field": "hours", "hoursInterval": 1 }] }
    }))
}

fn http() -> Map<String, Value> {
    object(json!({
        "method": "GET",
        "url": "",
        "authentication": "none",
        "options": {}
    }))
}

fn email() -> Map<String, Value> {
    object(json!({
        "from": "",
        "to": "",
        "subject": "",
        "body": ""
    }))
}

fn slack() -> Map<String, Value> {
    object(json!({
        "channel": "",
        "text": ""
    }))
}

fn condition() -> Map<String, Value> {
    object(json!({
        "conditions": {},
        "combinator": "and"
    }))
}

fn code() -> Map<String, Value> {
    object(json!({
        "language": "javaScript",
        "jsCode": "return items;"
    }))
}

fn transform() -> Map<String, Value> {
    object(json!({
        "mode": "manual",
        "values": {}
    }))
}

fn delay() -> Map<String, Value> {
    object(json!({
        "amount": 1,
        "unit": "minutes"
    }))
}

fn database() -> Map<String, Value> {
    object(json!({
        "operation": "executeQuery",
        "query": ""
    }))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_every_kind_has_exactly_one_row() {
        for kind in NodeKind::iter() {
            let rows = NODE_TYPES.iter().filter(|entry| entry.kind == Some(kind)).count();
            assert_eq!(rows, 1, "{:?}", kind);
        }
        assert_eq!(NODE_TYPES.len(), NodeKind::iter().count());
    }

    #[test]
    fn test_external_types_are_unique_and_not_noop() {
        let externals: HashSet<&str> = NODE_TYPES.iter().map(|entry| entry.external).collect();
        assert_eq!(externals.len(), NODE_TYPES.len());
        assert!(!externals.contains(NOOP_NODE_TYPE));
    }

    #[test]
    fn test_resolve_known_keys() {
        for kind in NodeKind::iter() {
            let entry = resolve(kind.as_ref());
            assert_eq!(entry.kind, Some(kind));
        }
        assert_eq!(resolve("http").external, "n8n-nodes-base.httpRequest");
        assert_eq!(resolve("trigger").external, "n8n-nodes-base.manualTrigger");
    }

    #[test]
    fn test_resolve_falls_back() {
        for key in ["", "unknown", "HTTP", "http_request", " email"] {
            let entry = resolve(key);
            assert!(entry.kind.is_none(), "{}", key);
            assert_eq!(entry.external, NOOP_NODE_TYPE);
            assert!((entry.defaults)().is_empty());
        }
    }

    #[test]
    fn test_defaults_are_objects() {
        assert_eq!((resolve("email").defaults)()["to"], json!(""));
        assert_eq!((resolve("http").defaults)()["method"], json!("GET"));
        assert_eq!((resolve("delay").defaults)()["unit"], json!("minutes"));
        assert!((resolve("trigger").defaults)().is_empty());
        for entry in NODE_TYPES {
            // an object default would degrade to {} silently if the literal were wrong
            if entry.kind != Some(NodeKind::Trigger) {
                assert!(!(entry.defaults)().is_empty(), "{}", entry.external);
            }
        }
    }
}
