use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandStatus {
    Running,
}

/// What the runner hands back for a submitted command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandAck {
    pub status: CommandStatus,
    pub command: String,
}

/// Hook for the command-execution subsystem.
///
/// Only [`Acknowledger`] exists today; it records the command and reports it
/// as running without executing anything.
pub trait CommandRunner: Send + Sync {
    fn run(&self, command: &str) -> CommandAck;
}

pub struct Acknowledger;

impl CommandRunner for Acknowledger {
    fn run(&self, command: &str) -> CommandAck {
        info!("Sen received command: {}", command);
        CommandAck {
            status: CommandStatus::Running,
            command: command.to_string(),
        }
    }
}
