//! Bundled automations offered by [`TemplateRegistry::builtin`](super::TemplateRegistry::builtin).

use serde_json::{Map, Value, json};

use crate::model::{EdgeModel, NodeData, NodeModel, Position, WorkflowTemplate};

fn node(
    id: &str,
    kind: &str,
    label: &str,
    x: f64,
    y: f64,
    parameters: Value,
) -> NodeModel {
    let parameters = match parameters {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    NodeModel {
        id: id.to_string(),
        kind: kind.to_string(),
        position: Position::new(x, y),
        data: NodeData {
            label: label.to_string(),
            kind: kind.to_string(),
            parameters,
        },
        selected: false,
        dragging: false,
    }
}

fn edge(
    id: &str,
    source: &str,
    target: &str,
    source_handle: Option<&str>,
) -> EdgeModel {
    EdgeModel {
        id: id.to_string(),
        source: source.to_string(),
        target: target.to_string(),
        source_handle: source_handle.map(str::to_string),
        target_handle: None,
        selected: false,
    }
}

pub fn builtin_templates() -> Vec<WorkflowTemplate> {
    vec![welcome_email(), daily_report(), lead_routing(), data_sync()]
}

fn welcome_email() -> WorkflowTemplate {
    WorkflowTemplate {
        id: "welcome-email".to_string(),
        name: "Welcome Email".to_string(),
        description: "Greet every new signup with a personalised email.".to_string(),
        category: "marketing".to_string(),
        nodes: vec![
            node("signup", "webhook", "New signup", 100.0, 200.0, json!({"path": "signup"})),
            node("greeting", "transform", "Prepare greeting", 350.0, 200.0, json!({"values": {"firstName": "={{ $json.name.split(' ')[0] }}"}})),
            node(
                "send",
                "email",
                "Send welcome email",
                600.0,
                200.0,
                json!({"to": "={{ $json.email }}", "subject": "Welcome aboard!", "body": "Hi {{ $json.firstName }}, thanks for joining."}),
            ),
        ],
        edges: vec![edge("signup-greeting", "signup", "greeting", None), edge("greeting-send", "greeting", "send", None)],
    }
}

fn daily_report() -> WorkflowTemplate {
    WorkflowTemplate {
        id: "daily-report".to_string(),
        name: "Daily Metrics Report".to_string(),
        description: "Fetch yesterday's metrics every morning and post a summary to Slack.".to_string(),
        category: "reporting".to_string(),
        nodes: vec![
            node("morning", "schedule", "Every morning", 100.0, 200.0, json!({"rule": {"interval": [{"field": "days", "triggerAtHour": 8}]}})),
            node("fetch", "http", "Fetch metrics", 350.0, 200.0, json!({"url": "https://api.example.com/metrics/daily"})),
            node("summarize", "code", "Summarize", 600.0, 200.0, json!({"jsCode": "return [{ json: { total: items.length } }];"})),
            node("post", "slack", "Post to #reports", 850.0, 200.0, json!({"channel": "#reports", "text": "Daily total: {{ $json.total }}"})),
        ],
        edges: vec![
            edge("morning-fetch", "morning", "fetch", None),
            edge("fetch-summarize", "fetch", "summarize", None),
            edge("summarize-post", "summarize", "post", None),
        ],
    }
}

fn lead_routing() -> WorkflowTemplate {
    WorkflowTemplate {
        id: "lead-routing".to_string(),
        name: "Lead Routing".to_string(),
        description: "Alert sales about high-value leads and nurture the rest by email.".to_string(),
        category: "sales".to_string(),
        nodes: vec![
            node("lead", "webhook", "Lead captured", 100.0, 250.0, json!({"path": "lead"})),
            node(
                "qualify",
                "condition",
                "High value?",
                350.0,
                250.0,
                json!({"conditions": {"number": [{"value1": "={{ $json.budget }}", "operation": "larger", "value2": 10000}]}}),
            ),
            node("alert", "slack", "Alert sales", 600.0, 150.0, json!({"channel": "#sales", "text": "New lead: {{ $json.company }}"})),
            node("wait", "delay", "Wait a day", 600.0, 350.0, json!({"amount": 1, "unit": "days"})),
            node("nurture", "email", "Nurture email", 850.0, 350.0, json!({"to": "={{ $json.email }}", "subject": "Resources to get you started"})),
        ],
        edges: vec![
            edge("lead-qualify", "lead", "qualify", None),
            edge("qualify-alert", "qualify", "alert", Some("true")),
            edge("qualify-wait", "qualify", "wait", Some("false")),
            edge("wait-nurture", "wait", "nurture", None),
        ],
    }
}

fn data_sync() -> WorkflowTemplate {
    WorkflowTemplate {
        id: "data-sync".to_string(),
        name: "Customer Data Sync".to_string(),
        description: "Push changed customer rows to the CRM hourly or on demand.".to_string(),
        category: "operations".to_string(),
        nodes: vec![
            node("hourly", "schedule", "Every hour", 100.0, 150.0, json!({})),
            node("manual", "trigger", "Run manually", 100.0, 350.0, json!({})),
            node(
                "load",
                "database",
                "Load changed rows",
                350.0,
                250.0,
                json!({"query": "SELECT * FROM customers WHERE updated_at > now() - interval '1 hour'"}),
            ),
            node("push", "http", "Push to CRM", 600.0, 250.0, json!({"method": "POST", "url": "https://crm.example.com/api/contacts"})),
        ],
        edges: vec![
            edge("hourly-load", "hourly", "load", None),
            edge("manual-load", "manual", "load", None),
            edge("load-push", "load", "push", None),
        ],
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use strum::IntoEnumIterator;

    use super::*;
    use crate::workflow::compiler::NodeKind;

    #[test]
    fn test_catalog_is_well_formed() {
        let templates = builtin_templates();
        let ids: HashSet<&str> = templates.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), templates.len());

        for template in templates.iter() {
            let node_ids: HashSet<&str> = template.nodes.iter().map(|n| n.id.as_str()).collect();
            assert_eq!(node_ids.len(), template.nodes.len(), "{}", template.id);
            for e in template.edges.iter() {
                assert!(node_ids.contains(e.source.as_str()), "{}: {}", template.id, e.id);
                assert!(node_ids.contains(e.target.as_str()), "{}: {}", template.id, e.id);
            }
        }
    }

    #[test]
    fn test_catalog_covers_every_node_kind() {
        let used: HashSet<String> = builtin_templates().iter().flat_map(|t| t.nodes.iter().map(|n| n.data.kind.clone())).collect();
        for kind in NodeKind::iter() {
            assert!(used.contains(kind.as_ref()), "{:?}", kind);
        }
    }
}
