use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::{Map, Value};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationType {
    #[default]
    NoAuth,
    ApiKey(ApiKeyType),
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ApiKeyType {
    Basic,
    Bearer,
    Custom,
}

/// How the engine credential is put on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationConfig {
    #[serde(default)]
    pub auth_type: AuthorizationType,
    /// used by [`StaticCredential`](super::StaticCredential); other sources ignore it
    #[serde(default)]
    pub api_key: Option<String>,
    /// header name override
    #[serde(default)]
    pub header: Option<String>,
}

/// A workflow as the engine reports it back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteWorkflow {
    /// Engine-assigned identifier, numeric ids are carried as strings.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl RemoteWorkflow {
    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    pub fn active(&self) -> Option<bool> {
        self.fields.get("active").and_then(Value::as_bool)
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) if !s.is_empty() => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!("invalid workflow id: {}", other))),
    }
}
