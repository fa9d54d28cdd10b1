//! Records the gateway forwards to the store.
//!
//! Each outbound record is built with a timestamp taken from the injected
//! [`Clock`](crate::clock::Clock) at the moment it is assembled, so nothing
//! reaches the store unstamped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;
use validator::Validate;

pub const DEFAULT_TONE: &str = "friendly";

/// A fully-formed agent row, ready for insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRecord {
    pub id: Uuid,
    pub name: String,
    pub purpose: String,
    pub functions: Vec<String>,
    pub tone: String,
    pub created_at: DateTime<Utc>,
}

impl AgentRecord {
    /// Assigns a fresh v4 id and stamps `created_at`.
    pub fn new(
        name: String,
        purpose: String,
        functions: Vec<String>,
        tone: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            purpose,
            functions,
            tone,
            created_at,
        }
    }
}

/// An inbound lead as submitted by a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct LeadData {
    pub source: String,
    #[serde(default)]
    pub contact_info: Option<String>,
    #[serde(default)]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub misc_data: Option<Map<String, Value>>,
}

impl LeadData {
    pub fn received(self, received_at: DateTime<Utc>) -> LeadRecord {
        LeadRecord { lead: self, received_at }
    }
}

/// A lead stamped with its server-side receipt time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadRecord {
    #[serde(flatten)]
    pub lead: LeadData,
    pub received_at: DateTime<Utc>,
}

/// The default agent identity as it sits in the local identity file.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct AgentData {
    pub id: String,
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub role: String,
    /// Falls back to the registration call time when absent.
    #[serde(default)]
    pub registered_at: Option<DateTime<Utc>>,
}

impl AgentData {
    pub fn into_registration(self, now: DateTime<Utc>) -> RegistrationRecord {
        RegistrationRecord {
            registered_at: self.registered_at.unwrap_or(now),
            id: self.id,
            name: self.name,
            email: self.email,
            role: self.role,
        }
    }
}

/// The row upserted into the registry table, keyed by `id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistrationRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub registered_at: DateTime<Utc>,
}
