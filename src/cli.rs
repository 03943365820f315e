//! Command line interface of the local Qlance host, built on clap.
//!
//! Each subcommand maps onto one contract call, except `call`, which sends a
//! raw `(kind, input_type, payload)` triple the way a ledger transaction
//! would carry it, and `stats`, which reads host-side state directly.

use clap::{Parser, Subcommand, ValueEnum};

use qlance::identity::Identity;
use qlance::wire::CallKind;

/// Qlance: run the job marketplace contract against a local state file.
#[derive(Debug, Parser)]
#[command(name = "qlance", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Identity signing the call, as 64 hex digits. Required for procedures.
    #[arg(long, global = true)]
    pub caller: Option<Identity>,

    /// Path of the contract state snapshot. Overrides `qlance.toml`.
    #[arg(long, global = true)]
    pub state: Option<String>,

    /// Log at debug level.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Function,
    Procedure,
}

impl From<KindArg> for CallKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Function => CallKind::Function,
            KindArg::Procedure => CallKind::Procedure,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Post a new job at the given price.
    Post { price: u64 },

    /// Claim an open job as its worker.
    Claim { job_id: u64 },

    /// Submit work for a job you claimed.
    Submit { job_id: u64 },

    /// Approve submitted work on a job you posted.
    Approve { job_id: u64 },

    /// Reject submitted work on a job you posted.
    Reject { job_id: u64 },

    /// Print the number of posted jobs.
    Count,

    /// GetJob as the ledger answers it: all zeros for unknown ids.
    Get { job_id: u64 },

    /// Print the full stored record of one job.
    Show { job_id: u64 },

    /// Print registry size, capacity and completed-job total.
    Stats,

    /// Send a raw call: kind, input type and hex-encoded little-endian payload.
    Call {
        #[arg(value_enum)]
        kind: KindArg,

        input_type: u16,

        #[arg(default_value = "")]
        payload: String,
    },
}
