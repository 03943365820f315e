//! Qlance: a deterministic job marketplace contract.
//!
//! Clients post jobs, workers claim them and submit work, and the posting
//! client approves or rejects the result. The contract is pure state-machine
//! logic over a fixed-capacity registry; ordering, signatures and storage
//! belong to the host that runs it. [`host::LocalHost`] is a single-process
//! host for development.

pub mod config;
pub mod contract;
pub mod error;
pub mod guard;
pub mod host;
pub mod identity;
pub mod lifecycle;
pub mod logging;
pub mod query;
pub mod registry;
pub mod state_machine;
pub mod ui;
pub mod wire;

pub use contract::{Invocation, Qlance, STATUS_FAILED, STATUS_OK};
pub use error::{LifecycleError, QlanceError};
pub use identity::Identity;
pub use registry::JOB_CAPACITY;
