use chrono::{DateTime, Utc};
use sen_core::commands::CommandAck;
use sen_core::records::DEFAULT_TONE;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

// Input: a new agent to create
#[derive(Debug, Deserialize)]
pub struct CreateAgentRequest {
    pub agent_name: String,
    pub purpose: String,
    pub functions: Vec<String>,
    #[serde(default = "default_tone")]
    pub tone: String,
}

fn default_tone() -> String {
    DEFAULT_TONE.to_string()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateAgentResponse {
    pub status: String,
    pub id: Uuid,
    /// The store's body, relayed untouched.
    pub response: Value,
}

#[derive(Debug, Deserialize)]
pub struct ExecuteRequest {
    pub command: String,
}

#[derive(Debug, Serialize)]
pub struct ExecuteResponse {
    pub status: &'static str,
    pub result: CommandAck,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HeartbeatResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

// Output shared by the lead and registration routes
#[derive(Debug, Serialize, Deserialize)]
pub struct DataResponse {
    pub ok: bool,
    pub data: Value,
}
