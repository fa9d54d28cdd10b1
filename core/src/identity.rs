use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use validator::Validate;

use crate::records::AgentData;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("identity file not found at '{}'", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read identity file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("identity file '{}' is malformed: {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },
}

/// Reads the default agent identity fresh on every call.
pub async fn load(path: &Path) -> Result<AgentData, IdentityError> {
    // 1. Read the file
    let content = fs::read_to_string(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => IdentityError::NotFound(path.to_path_buf()),
        _ => IdentityError::Io { path: path.to_path_buf(), source: e },
    })?;

    // 2. Parse it
    let data: AgentData = serde_json::from_str(&content).map_err(|e| IdentityError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    // 3. Check the shape beyond what serde enforces
    data.validate().map_err(|e| IdentityError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok(data)
}
