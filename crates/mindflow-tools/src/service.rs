use std::sync::Arc;

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ErrorData, Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    transport::streamable_http_server::{
        session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
    },
    ServerHandler,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::affirmation;
use crate::crisis;
use crate::resources::ResourceSearch;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchParams {
    /// The wellness topic to search for (e.g. 'anxiety management', 'sleep hygiene', 'mindfulness')
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CrisisParams {
    /// The user message or context to assess for crisis signals
    pub context: String,
}

/// MCP server exposing the MindFlow wellness tools
#[derive(Clone)]
pub struct WellnessServer {
    tool_router: ToolRouter<Self>,
    search: Arc<ResourceSearch>,
}

impl WellnessServer {
    pub fn new(search: Arc<ResourceSearch>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            search,
        }
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, ErrorData> {
    let text = serde_json::to_string_pretty(value).map_err(|e| {
        ErrorData::internal_error(format!("Failed to serialize tool output: {}", e), None)
    })?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

#[tool_router]
impl WellnessServer {
    #[tool(
        description = "Search for mental health and wellness resources, articles, and guides on a given topic. Returns curated resources from trusted mental health organizations."
    )]
    pub async fn search_wellness_resources(
        &self,
        params: Parameters<SearchParams>,
    ) -> Result<CallToolResult, ErrorData> {
        tracing::info!("Searching wellness resources: query='{}'", params.0.query);
        let response = self.search.search(&params.0.query).await;
        json_result(&response)
    }

    #[tool(
        description = "Returns a positive, encouraging affirmation for mental wellness. Use this to uplift the user or start a conversation on a positive note."
    )]
    pub async fn get_daily_affirmation(&self) -> Result<CallToolResult, ErrorData> {
        json_result(&affirmation::today())
    }

    #[tool(
        description = "Assess a user message for crisis signals and return safety resources if needed. If in doubt, call this tool."
    )]
    pub async fn get_crisis_resources(
        &self,
        params: Parameters<CrisisParams>,
    ) -> Result<CallToolResult, ErrorData> {
        json_result(&crisis::assess(&params.0.context))
    }
}

#[tool_handler]
impl ServerHandler for WellnessServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "MindFlow wellness tools: resource search, daily affirmations and crisis resources."
                    .to_string(),
            ),
            ..Default::default()
        }
    }
}

/// Stateless streamable-HTTP service; each request gets a fresh server
pub fn streamable_http_service(
    search: Arc<ResourceSearch>,
) -> StreamableHttpService<WellnessServer, LocalSessionManager> {
    StreamableHttpService::new(
        move || Ok(WellnessServer::new(search.clone())),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig {
            stateful_mode: false,
            ..Default::default()
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exposes_wellness_tools() {
        let server = WellnessServer::new(Arc::new(ResourceSearch::curated_only()));
        let mut names: Vec<String> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();

        assert_eq!(
            names,
            vec![
                "get_crisis_resources",
                "get_daily_affirmation",
                "search_wellness_resources",
            ]
        );
    }

    #[test]
    fn test_server_info_enables_tools() {
        let server = WellnessServer::new(Arc::new(ResourceSearch::curated_only()));
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.is_some());
    }
}
