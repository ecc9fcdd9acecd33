//! Pokemon Encounter MCP Server
//!
//! Exposes the encounter engine's formulas as Model Context Protocol tools over stdio.
//! Logs go to stderr; stdout belongs to the transport.

use std::borrow::Cow;
use std::fmt::Display;
use std::sync::Arc;

use pokemon_encounter::mcp_interface::*;
use pokemon_encounter::{EngineConfig, GameData, StdRandom};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ErrorData as McpError, *},
    tool, tool_handler, tool_router, ServerHandler, ServiceExt,
};
use serde::Serialize;
use tokio::io::{stdin, stdout};
use tokio::sync::Mutex;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

const INVALID_PARAMS: i32 = -32602;
const INTERNAL_ERROR: i32 = -32603;

#[derive(Debug, Clone)]
pub struct EncounterService {
    tool_router: ToolRouter<EncounterService>,
    data: &'static GameData,
    config: Arc<EngineConfig>,
    rng: Arc<Mutex<StdRandom>>,
}

fn tool_error(code: i32, err: impl Display) -> McpError {
    McpError {
        code: ErrorCode(code),
        message: Cow::from(err.to_string()),
        data: None,
    }
}

/// Pretty JSON of a tool response, or the rejection as an invalid-params error.
fn respond<T: Serialize, E: Display>(result: Result<T, E>) -> Result<CallToolResult, McpError> {
    let value = result.map_err(|err| tool_error(INVALID_PARAMS, err))?;
    let text =
        serde_json::to_string_pretty(&value).map_err(|err| tool_error(INTERNAL_ERROR, err))?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

#[tool_router]
impl EncounterService {
    pub fn new(data: &'static GameData, config: EngineConfig) -> Self {
        Self {
            tool_router: Self::tool_router(),
            data,
            config: Arc::new(config),
            rng: Arc::new(Mutex::new(StdRandom::from_os())),
        }
    }

    fn context(&self) -> EngineContext<'_> {
        EngineContext::new(self.data, &self.config)
    }

    #[tool(description = "Resolve one attack between two described combatants and return the damage result")]
    async fn calculate_damage(
        &self,
        Parameters(request): Parameters<DamageRequest>,
    ) -> Result<CallToolResult, McpError> {
        let mut rng = self.rng.lock().await;
        respond(calculate_damage(&self.context(), &request, &mut *rng))
    }

    #[tool(description = "Compute the six derived stats of a described combatant")]
    async fn calculate_stats(
        &self,
        Parameters(request): Parameters<StatsRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(calculate_stats(&self.context(), &request))
    }

    #[tool(description = "Type effectiveness multiplier of an attack type against one or two defending types")]
    async fn type_effectiveness(
        &self,
        Parameters(request): Parameters<EffectivenessRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(type_effectiveness(&request))
    }

    #[tool(description = "Generate a wild encounter scaled to the companion's level")]
    async fn generate_encounter(
        &self,
        Parameters(request): Parameters<EncounterRequest>,
    ) -> Result<CallToolResult, McpError> {
        let mut rng = self.rng.lock().await;
        respond(generate_encounter(&self.context(), &request, &mut *rng))
    }

    #[tool(description = "Throw a capture tool at a described wild combatant")]
    async fn attempt_capture(
        &self,
        Parameters(request): Parameters<CaptureRequest>,
    ) -> Result<CallToolResult, McpError> {
        let mut rng = self.rng.lock().await;
        respond(attempt_capture(&self.context(), &request, &mut *rng))
    }

    #[tool(description = "Experience, EV gains and level-ups for defeating an opponent")]
    async fn experience_gain(
        &self,
        Parameters(request): Parameters<ExperienceRequest>,
    ) -> Result<CallToolResult, McpError> {
        respond(experience_gain(&self.context(), &request))
    }

    #[tool(description = "Look up a species by name or dex number")]
    async fn lookup_species(
        &self,
        Parameters(request): Parameters<LookupRequest>,
    ) -> Result<CallToolResult, McpError> {
        let text = lookup_species(&self.context(), &request.query)
            .map_err(|err| tool_error(INVALID_PARAMS, err))?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Look up a move by name")]
    async fn lookup_move(
        &self,
        Parameters(request): Parameters<LookupRequest>,
    ) -> Result<CallToolResult, McpError> {
        let text = lookup_move(&self.context(), &request.query)
            .map_err(|err| tool_error(INVALID_PARAMS, err))?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_handler]
impl ServerHandler for EncounterService {}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = EngineConfig::from_env()?;
    let data = GameData::shared()?;
    info!(
        species = data.species.len(),
        moves = data.moves.len(),
        "Pokemon Encounter MCP server starting"
    );

    let service = EncounterService::new(data, config);
    let server = service.serve((stdin(), stdout())).await?;

    let quit_reason = server.waiting().await?;
    info!(?quit_reason, "Pokemon Encounter MCP server exiting");
    Ok(())
}
