use axum::{extract::State, Json};
use sen_core::identity::{self, IdentityError};
use sen_core::records::{AgentRecord, LeadData};
use sen_core::store::first_row;
use tracing::{info, warn};
use validator::Validate;

use crate::api::{
    CreateAgentRequest, CreateAgentResponse, DataResponse, ExecuteRequest, ExecuteResponse,
    HeartbeatResponse,
};
use crate::error::{AppError, ValidJson};
use crate::AppState;

const CREATE_FAILED: &str = "failed to create agent";
const LOG_FAILED: &str = "failed to log lead";
const REGISTRATION_FAILED: &str = "registration failed";

pub async fn create_agent(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<CreateAgentRequest>,
) -> Result<Json<CreateAgentResponse>, AppError> {
    let store = state.store()?;

    let record = AgentRecord::new(
        payload.agent_name,
        payload.purpose,
        payload.functions,
        payload.tone,
        state.clock.now(),
    );
    info!("Creating agent '{}' ({})", record.name, record.id);

    let row = serde_json::to_value(&record).map_err(|e| AppError::internal(CREATE_FAILED, e))?;
    let response = store
        .insert_row(&state.tables.agents, &row)
        .await
        .map_err(|e| AppError::internal(CREATE_FAILED, e))?;

    Ok(Json(CreateAgentResponse {
        status: "agent created".to_string(),
        id: record.id,
        response,
    }))
}

// Placeholder for the command subsystem: acknowledges, never executes.
pub async fn execute(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<ExecuteRequest>,
) -> Json<ExecuteResponse> {
    let result = state.commands.run(&payload.command);
    Json(ExecuteResponse { status: "ok", result })
}

pub async fn heartbeat(State(state): State<AppState>) -> Json<HeartbeatResponse> {
    let timestamp = state.clock.now();
    info!("Heartbeat at {}", timestamp);
    Json(HeartbeatResponse {
        status: "OK".to_string(),
        timestamp,
    })
}

pub async fn log_lead(
    State(state): State<AppState>,
    ValidJson(lead): ValidJson<LeadData>,
) -> Result<Json<DataResponse>, AppError> {
    let store = state.store()?;
    lead.validate()?;

    let record = lead.received(state.clock.now());
    info!("Logging lead from '{}'", record.lead.source);

    let row = serde_json::to_value(&record).map_err(|e| AppError::internal(LOG_FAILED, e))?;
    let body = store
        .insert_row(&state.tables.leads, &row)
        .await
        .map_err(|e| AppError::internal(LOG_FAILED, e))?;
    let data = first_row(body)
        .ok_or_else(|| AppError::internal(LOG_FAILED, "store returned no row"))?;

    Ok(Json(DataResponse { ok: true, data }))
}

pub async fn register(State(state): State<AppState>) -> Result<Json<DataResponse>, AppError> {
    // 1. Load the identity before touching the store
    let agent = identity::load(&state.identity_path).await.map_err(|e| match e {
        IdentityError::NotFound(path) => {
            warn!("Registration skipped, no identity file at {}", path.display());
            AppError::NotFound("agent identity file not found")
        }
        other => AppError::internal(REGISTRATION_FAILED, other),
    })?;

    // 2. Stamp and upsert
    let store = state.store()?;
    let record = agent.into_registration(state.clock.now());
    info!("Registering agent '{}' ({})", record.name, record.id);

    let row = serde_json::to_value(&record).map_err(|e| AppError::internal(REGISTRATION_FAILED, e))?;
    let body = store
        .upsert_row(&state.tables.registry, &row, "id")
        .await
        .map_err(|e| AppError::internal(REGISTRATION_FAILED, e))?;
    let data = first_row(body)
        .ok_or_else(|| AppError::internal(REGISTRATION_FAILED, "store returned no row"))?;

    Ok(Json(DataResponse { ok: true, data }))
}
