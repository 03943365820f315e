//! A single-process stand-in for the ledger.
//!
//! [`LocalHost`] keeps one contract instance in a JSON snapshot on disk,
//! executes calls against it in the order they arrive, and writes the state
//! back after every procedure. Snapshots that break the contract's
//! invariants are refused rather than repaired.

use std::path::{Path, PathBuf};

use crate::contract::{Invocation, Qlance};
use crate::error::QlanceError;
use crate::identity::Identity;
use crate::state_machine::JobStatus;
use crate::wire::{Call, CallKind, Output};

pub struct LocalHost {
    contract: Qlance,
    path: PathBuf,
}

impl LocalHost {
    /// Load the snapshot at `path`, or start from empty state if there is none.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, QlanceError> {
        let path = path.into();
        let contract = match std::fs::read_to_string(&path) {
            Ok(data) if !data.trim().is_empty() => {
                let contract = parse_snapshot(&data)?;
                tracing::info!(
                    ?path,
                    jobs = contract.get_jobs_count().count,
                    "restored contract state"
                );
                contract
            }
            Ok(_) => Qlance::new(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(?path, "no snapshot found, starting with empty state");
                Qlance::new()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self { contract, path })
    }

    pub fn contract(&self) -> &Qlance {
        &self.contract
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Execute one call. Procedures need a non-NULL signer and run against
    /// a copy of the state that only replaces the live one once it is on
    /// disk; functions never write.
    pub fn invoke(&mut self, call: Call, caller: Option<Identity>) -> Result<Output, QlanceError> {
        let inv = match (call.kind(), caller) {
            (CallKind::Procedure, None) => return Err(QlanceError::MissingCaller),
            (CallKind::Procedure, Some(id)) if id.is_null() => {
                return Err(QlanceError::NullCaller);
            }
            (_, Some(id)) => Invocation::new(id),
            (CallKind::Function, None) => Invocation::new(Identity::NULL),
        };

        if call.kind() == CallKind::Function {
            let output = call.execute(&mut self.contract, &inv);
            tracing::debug!(call = call.name(), ?output, "function executed");
            return Ok(output);
        }

        let mut next = self.contract.clone();
        let output = call.execute(&mut next, &inv);
        tracing::debug!(call = call.name(), caller = %inv.invocator, ?output, "procedure executed");

        write_snapshot(&self.path, &next)?;
        self.contract = next;
        Ok(output)
    }

    /// Decode a raw `(kind, input_type, payload)` triple and invoke it.
    pub fn invoke_raw(
        &mut self,
        kind: CallKind,
        input_type: u16,
        payload: &[u8],
        caller: Option<Identity>,
    ) -> Result<Vec<u8>, QlanceError> {
        let call = Call::decode(kind, input_type, payload)?;
        Ok(self.invoke(call, caller)?.encode())
    }

    /// Write the snapshot to a temp file, then rename it over the old one.
    pub fn save(&self) -> Result<(), QlanceError> {
        write_snapshot(&self.path, &self.contract)
    }
}

fn write_snapshot(path: &Path, contract: &Qlance) -> Result<(), QlanceError> {
    let data = serde_json::to_string_pretty(contract)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, data)?;
    std::fs::rename(&tmp, path)?;
    tracing::debug!(?path, "contract state written");
    Ok(())
}

/// Decode and check a snapshot. JSON that parses but describes impossible
/// state is reported as [`QlanceError::Snapshot`], whichever layer caught it.
fn parse_snapshot(data: &str) -> Result<Qlance, QlanceError> {
    let contract: Qlance = serde_json::from_str(data).map_err(|e| {
        if e.is_data() {
            QlanceError::Snapshot(e.to_string())
        } else {
            QlanceError::Json(e)
        }
    })?;
    verify(&contract)?;
    Ok(contract)
}

/// Cross-record checks the registry cannot make on its own.
fn verify(contract: &Qlance) -> Result<(), QlanceError> {
    let lifecycle = contract.lifecycle();
    let approved = lifecycle
        .registry()
        .iter()
        .filter(|job| job.status == JobStatus::Approved)
        .count() as u64;

    if approved != lifecycle.total_jobs_completed() {
        return Err(QlanceError::Snapshot(format!(
            "total_jobs_completed is {} but {approved} jobs are approved",
            lifecycle.total_jobs_completed()
        )));
    }
    Ok(())
}
