use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Please set APP_COMPONENT")]
    MissingComponent,

    #[error("Unknown APP_COMPONENT: {0}")]
    UnknownComponent(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization failed: {0}")]
    Toml(String),

    #[error("Failed to exec {}: {source}", .program.display())]
    Exec {
        program: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DispatchError {
    /// Process exit status for this error. Handoff failures follow the
    /// shell's `exec` conventions so callers see the same codes as before.
    pub fn exit_code(&self) -> u8 {
        match self {
            DispatchError::Exec { source, .. } => match source.kind() {
                io::ErrorKind::NotFound => 127,
                io::ErrorKind::PermissionDenied => 126,
                _ => 1,
            },
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, DispatchError>;
