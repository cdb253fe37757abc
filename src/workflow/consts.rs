/// Name given to a fresh or cleared workflow.
pub const DEFAULT_WORKFLOW_NAME: &str = "My Workflow";

/// External type every unknown internal node type compiles to.
pub const NOOP_NODE_TYPE: &str = "n8n-nodes-base.noOp";

/// Header the engine reads its API key from unless configured otherwise.
pub const DEFAULT_API_KEY_HEADER: &str = "X-N8N-API-KEY";
