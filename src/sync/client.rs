//! HTTP client for the external workflow engine.
//!
//! Every call is a single request: no retries, no client-side timeout, no
//! locking. A 401 becomes [`FlowError::Unauthorized`]; any other non-2xx
//! becomes [`FlowError::Remote`] carrying the status and body text.

use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use reqwest::{
    Method, RequestBuilder, StatusCode, Url,
    header::{ACCEPT, HeaderMap, HeaderName, HeaderValue, InvalidHeaderValue},
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, trace, warn};

use crate::{
    FlowError, Result,
    config::EngineConfig,
    model::CompiledDocument,
    sync::{
        credential::{CredentialSource, StaticCredential},
        models::{ApiKeyType, AuthorizationConfig, AuthorizationType, RemoteWorkflow},
        query::{Paging, WorkflowQuery},
    },
    workflow::consts::DEFAULT_API_KEY_HEADER,
};

pub struct SyncClient {
    base_url: Url,
    auth: AuthorizationConfig,
    credentials: Arc<dyn CredentialSource>,
    client: reqwest::Client,
}

impl SyncClient {
    /// Build a client for the configured engine, using the config's api key.
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|err| FlowError::Config(format!("invalid engine base_url '{}': {}", config.base_url, err)))?;
        if base_url.cannot_be_a_base() {
            return Err(FlowError::Config(format!("engine base_url '{}' cannot carry a path", config.base_url)));
        }
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            base_url,
            auth: config.auth.clone(),
            credentials: Arc::new(StaticCredential::new(config.auth.api_key.clone())),
            client,
        })
    }

    /// Replace where the api key is read from.
    pub fn with_credentials(
        mut self,
        credentials: Arc<dyn CredentialSource>,
    ) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// POST a compiled document as a new workflow.
    pub async fn create_workflow(
        &self,
        document: &CompiledDocument,
    ) -> Result<RemoteWorkflow> {
        debug!("sync::create_workflow({})", document.name);
        let request = self.request(Method::POST, &["workflows"])?.json(document);
        self.send_json(request).await
    }

    /// PUT a compiled document over an existing workflow.
    pub async fn update_workflow(
        &self,
        id: &str,
        document: &CompiledDocument,
    ) -> Result<RemoteWorkflow> {
        require_id(id)?;
        debug!("sync::update_workflow({})", id);
        let request = self.request(Method::PUT, &["workflows", id])?.json(&document.with_id(id));
        self.send_json(request).await
    }

    pub async fn get_workflow(
        &self,
        id: &str,
    ) -> Result<RemoteWorkflow> {
        require_id(id)?;
        let request = self.request(Method::GET, &["workflows", id])?;
        self.send_json(request).await
    }

    /// Paged listing. The engine decides the response shape.
    pub async fn list_workflows(
        &self,
        query: &WorkflowQuery,
    ) -> Result<Value> {
        let request = self.request(Method::GET, &["workflows"])?.query(query);
        self.send_value(request).await
    }

    pub async fn delete_workflow(
        &self,
        id: &str,
    ) -> Result<Value> {
        require_id(id)?;
        debug!("sync::delete_workflow({})", id);
        let request = self.request(Method::DELETE, &["workflows", id])?;
        self.send_value(request).await
    }

    /// Trigger a run. Returns the engine's acknowledgement, not the run result.
    pub async fn execute_workflow(
        &self,
        id: &str,
        trigger_data: Value,
    ) -> Result<Value> {
        require_id(id)?;
        debug!("sync::execute_workflow({})", id);
        let request = self.request(Method::POST, &["workflows", id, "execute"])?.json(&json!({ "triggerData": trigger_data }));
        self.send_value(request).await
    }

    pub async fn get_workflow_executions(
        &self,
        id: &str,
        paging: Paging,
    ) -> Result<Value> {
        require_id(id)?;
        let request = self.request(Method::GET, &["workflows", id, "executions"])?.query(&paging);
        self.send_value(request).await
    }

    /// Each segment is appended percent-encoded, so an id never changes the route.
    fn request(
        &self,
        method: Method,
        segments: &[&str],
    ) -> Result<RequestBuilder> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FlowError::Config(format!("engine base_url '{}' cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(self.client.request(method, url))
    }

    /// Apply authorization headers based on auth config
    async fn auth_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let AuthorizationType::ApiKey(api_key_type) = self.auth.auth_type else {
            return Ok(headers);
        };
        let api_key = self.credentials.api_key().await?.ok_or_else(|| FlowError::Unauthorized("no api key available for the workflow engine".to_string()))?;

        let header_name = match (&self.auth.header, api_key_type) {
            (Some(header), _) => header.as_str(),
            (None, ApiKeyType::Custom) => DEFAULT_API_KEY_HEADER,
            (None, _) => "Authorization",
        };
        let header_key: HeaderName = header_name.parse().map_err(|err: reqwest::header::InvalidHeaderName| FlowError::Config(err.to_string()))?;

        let header_value = match api_key_type {
            ApiKeyType::Bearer => format!("Bearer {}", api_key),
            ApiKeyType::Basic => {
                let encoded = if api_key.contains(':') {
                    STANDARD.encode(api_key.as_bytes())
                } else {
                    api_key
                };
                format!("Basic {}", encoded)
            }
            ApiKeyType::Custom => api_key,
        };

        headers.insert(header_key, header_value.parse().map_err(|err: InvalidHeaderValue| FlowError::Config(err.to_string()))?);
        Ok(headers)
    }

    /// Send and return the body text of a 2xx response.
    async fn send(
        &self,
        request: RequestBuilder,
    ) -> Result<String> {
        let request = request.headers(self.auth_headers().await?);
        let response = request.send().await?;
        let status = response.status();
        trace!("sync::send -> {}", status);

        if status.is_success() {
            return Ok(response.text().await?);
        }
        Err(status_error(status, response.text().await.unwrap_or_default()))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T> {
        let body = self.send(request).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Like `send_json`, but an empty body reads as `null`.
    async fn send_value(
        &self,
        request: RequestBuilder,
    ) -> Result<Value> {
        let body = self.send(request).await?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }
}

/// Map a non-2xx status to an error. The body is informational only.
fn status_error(
    status: StatusCode,
    body: String,
) -> FlowError {
    if status == StatusCode::UNAUTHORIZED {
        warn!("workflow engine rejected credentials");
        return FlowError::Unauthorized(body);
    }
    FlowError::Remote {
        status: status.as_u16(),
        body,
    }
}

fn require_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(FlowError::Workflow("missing workflow id".to_string()));
    }
    Ok(())
}
