use thiserror::Error;

use crate::guard::Role;
use crate::state_machine::{JobStatus, Transition};
use crate::wire::CallKind;

#[derive(Debug, Error)]
pub enum QlanceError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Corrupt state snapshot: {0}")]
    Snapshot(String),

    #[error("Procedures need a caller identity. Pass `--caller <hex>`.")]
    MissingCaller,

    #[error("The NULL identity cannot sign procedures.")]
    NullCaller,

    #[error("Payload error: {0}")]
    Payload(#[from] PayloadError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Why the lifecycle refused a call. The contract interface collapses every
/// variant to the same failure code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("job {0} does not exist")]
    JobNotFound(u64),

    #[error("registry is full ({capacity} jobs)")]
    RegistryFull { capacity: usize },

    #[error("job {job_id} cannot {transition} while {status}")]
    InvalidTransition {
        job_id: u64,
        status: JobStatus,
        transition: Transition,
    },

    #[error("caller is not the {role} of job {job_id}")]
    Unauthorized { job_id: u64, role: Role },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PayloadError {
    #[error("no {kind} registered with input type {input_type}")]
    UnknownInputType { kind: CallKind, input_type: u16 },

    #[error("expected {expected} payload bytes, got {actual}")]
    BadLength { expected: usize, actual: usize },

    #[error("invalid hex payload: {0}")]
    Hex(#[from] hex::FromHexError),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IdentityError {
    #[error("identity must be 64 hex digits, got {0} characters")]
    Length(usize),

    #[error("invalid hex in identity: {0}")]
    Hex(#[from] hex::FromHexError),
}
