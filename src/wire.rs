//! Call payload codec.
//!
//! Transactions address the contract by `(kind, input_type)` and carry the
//! input struct as raw little-endian bytes. Outputs come back the same way,
//! laid out like the contract's C-aligned output structs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::contract::{
    GetJobInput, GetJobOutput, GetJobsCountOutput, Invocation, JobInput, PostJobInput,
    PostJobOutput, Qlance, StatusOutput,
};
use crate::error::PayloadError;

pub const FN_GET_JOBS_COUNT: u16 = 1;
pub const FN_GET_JOB: u16 = 2;

pub const PROC_POST_JOB: u16 = 1;
pub const PROC_CLAIM_JOB: u16 = 2;
pub const PROC_SUBMIT_WORK: u16 = 3;
pub const PROC_APPROVE_WORK: u16 = 4;
pub const PROC_REJECT_WORK: u16 = 5;

/// Size of the `GetJob` output: two u64s, a u8, and padding to 8-byte alignment.
pub const GET_JOB_OUTPUT_LEN: usize = 24;

/// Read-only functions and state-changing procedures have separate id spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallKind {
    Function,
    Procedure,
}

impl fmt::Display for CallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallKind::Function => write!(f, "function"),
            CallKind::Procedure => write!(f, "procedure"),
        }
    }
}

/// A decoded contract call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Call {
    GetJobsCount,
    GetJob(GetJobInput),
    PostJob(PostJobInput),
    ClaimJob(JobInput),
    SubmitWork(JobInput),
    ApproveWork(JobInput),
    RejectWork(JobInput),
}

impl Call {
    pub fn kind(&self) -> CallKind {
        match self {
            Call::GetJobsCount | Call::GetJob(_) => CallKind::Function,
            _ => CallKind::Procedure,
        }
    }

    pub fn input_type(&self) -> u16 {
        match self {
            Call::GetJobsCount => FN_GET_JOBS_COUNT,
            Call::GetJob(_) => FN_GET_JOB,
            Call::PostJob(_) => PROC_POST_JOB,
            Call::ClaimJob(_) => PROC_CLAIM_JOB,
            Call::SubmitWork(_) => PROC_SUBMIT_WORK,
            Call::ApproveWork(_) => PROC_APPROVE_WORK,
            Call::RejectWork(_) => PROC_REJECT_WORK,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Call::GetJobsCount => "GetJobsCount",
            Call::GetJob(_) => "GetJob",
            Call::PostJob(_) => "PostJob",
            Call::ClaimJob(_) => "ClaimJob",
            Call::SubmitWork(_) => "SubmitWork",
            Call::ApproveWork(_) => "ApproveWork",
            Call::RejectWork(_) => "RejectWork",
        }
    }

    pub fn decode(kind: CallKind, input_type: u16, payload: &[u8]) -> Result<Self, PayloadError> {
        let call = match (kind, input_type) {
            (CallKind::Function, FN_GET_JOBS_COUNT) => {
                expect_len(payload, 0)?;
                Call::GetJobsCount
            }
            (CallKind::Function, FN_GET_JOB) => Call::GetJob(GetJobInput {
                job_id: read_u64(payload)?,
            }),
            (CallKind::Procedure, PROC_POST_JOB) => Call::PostJob(PostJobInput {
                price: read_u64(payload)?,
            }),
            (CallKind::Procedure, PROC_CLAIM_JOB) => Call::ClaimJob(job_input(payload)?),
            (CallKind::Procedure, PROC_SUBMIT_WORK) => Call::SubmitWork(job_input(payload)?),
            (CallKind::Procedure, PROC_APPROVE_WORK) => Call::ApproveWork(job_input(payload)?),
            (CallKind::Procedure, PROC_REJECT_WORK) => Call::RejectWork(job_input(payload)?),
            _ => return Err(PayloadError::UnknownInputType { kind, input_type }),
        };
        Ok(call)
    }

    pub fn encode(&self) -> Vec<u8> {
        match self {
            Call::GetJobsCount => Vec::new(),
            Call::GetJob(input) => input.job_id.to_le_bytes().to_vec(),
            Call::PostJob(input) => input.price.to_le_bytes().to_vec(),
            Call::ClaimJob(input)
            | Call::SubmitWork(input)
            | Call::ApproveWork(input)
            | Call::RejectWork(input) => input.job_id.to_le_bytes().to_vec(),
        }
    }

    /// Run the call against `contract`. Procedures without an invocation are
    /// never dispatched; the host checks that before getting here.
    pub fn execute(self, contract: &mut Qlance, inv: &Invocation) -> Output {
        match self {
            Call::GetJobsCount => Output::JobsCount(contract.get_jobs_count()),
            Call::GetJob(input) => Output::Job(contract.get_job(input)),
            Call::PostJob(input) => Output::Posted(contract.post_job(inv, input)),
            Call::ClaimJob(input) => Output::Status(contract.claim_job(inv, input)),
            Call::SubmitWork(input) => Output::Status(contract.submit_work(inv, input)),
            Call::ApproveWork(input) => Output::Status(contract.approve_work(inv, input)),
            Call::RejectWork(input) => Output::Status(contract.reject_work(inv, input)),
        }
    }
}

/// A contract call's result, before encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Output {
    JobsCount(GetJobsCountOutput),
    Job(GetJobOutput),
    Posted(PostJobOutput),
    Status(StatusOutput),
}

impl Output {
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Output::JobsCount(out) => out.count.to_le_bytes().to_vec(),
            Output::Job(out) => {
                let mut buf = vec![0u8; GET_JOB_OUTPUT_LEN];
                buf[0..8].copy_from_slice(&out.job_id.to_le_bytes());
                buf[8..16].copy_from_slice(&out.price.to_le_bytes());
                buf[16] = out.status;
                buf
            }
            Output::Posted(out) => out.job_id.to_le_bytes().to_vec(),
            Output::Status(out) => vec![out.status],
        }
    }
}

fn expect_len(payload: &[u8], expected: usize) -> Result<(), PayloadError> {
    if payload.len() != expected {
        return Err(PayloadError::BadLength {
            expected,
            actual: payload.len(),
        });
    }
    Ok(())
}

fn read_u64(payload: &[u8]) -> Result<u64, PayloadError> {
    let bytes: [u8; 8] = payload.try_into().map_err(|_| PayloadError::BadLength {
        expected: 8,
        actual: payload.len(),
    })?;
    Ok(u64::from_le_bytes(bytes))
}

fn job_input(payload: &[u8]) -> Result<JobInput, PayloadError> {
    Ok(JobInput {
        job_id: read_u64(payload)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Identity;

    #[test]
    fn decodes_little_endian_job_id() {
        let call = Call::decode(
            CallKind::Procedure,
            PROC_CLAIM_JOB,
            &[0x2a, 0x01, 0, 0, 0, 0, 0, 0],
        )
        .unwrap();
        assert_eq!(call, Call::ClaimJob(JobInput { job_id: 0x012a }));
        assert_eq!(call.kind(), CallKind::Procedure);
        assert_eq!(call.name(), "ClaimJob");
    }

    #[test]
    fn function_and_procedure_ids_overlap() {
        let payload = 5u64.to_le_bytes();
        assert_eq!(
            Call::decode(CallKind::Function, 2, &payload).unwrap(),
            Call::GetJob(GetJobInput { job_id: 5 })
        );
        assert_eq!(
            Call::decode(CallKind::Procedure, 2, &payload).unwrap(),
            Call::ClaimJob(JobInput { job_id: 5 })
        );
    }

    #[test]
    fn encode_matches_decode_layout() {
        let call = Call::PostJob(PostJobInput { price: 100 });
        assert_eq!(call.encode(), vec![100, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(
            Call::decode(call.kind(), call.input_type(), &call.encode()).unwrap(),
            call
        );
        assert!(Call::GetJobsCount.encode().is_empty());
    }

    #[test]
    fn rejects_unknown_input_type() {
        assert_eq!(
            Call::decode(CallKind::Function, 3, &[]),
            Err(PayloadError::UnknownInputType {
                kind: CallKind::Function,
                input_type: 3
            })
        );
        assert!(Call::decode(CallKind::Procedure, 0, &[0; 8]).is_err());
        assert!(Call::decode(CallKind::Procedure, 6, &[0; 8]).is_err());
    }

    #[test]
    fn rejects_wrong_payload_length() {
        assert_eq!(
            Call::decode(CallKind::Procedure, PROC_POST_JOB, &[1, 2, 3]),
            Err(PayloadError::BadLength {
                expected: 8,
                actual: 3
            })
        );
        assert_eq!(
            Call::decode(CallKind::Function, FN_GET_JOBS_COUNT, &[0]),
            Err(PayloadError::BadLength {
                expected: 0,
                actual: 1
            })
        );
    }

    #[test]
    fn get_job_output_is_padded() {
        let out = Output::Job(GetJobOutput {
            job_id: 1,
            price: 0x0102,
            status: 3,
        });
        let bytes = out.encode();
        assert_eq!(bytes.len(), GET_JOB_OUTPUT_LEN);
        assert_eq!(&bytes[0..8], &1u64.to_le_bytes());
        assert_eq!(&bytes[8..10], &[0x02, 0x01]);
        assert_eq!(bytes[16], 3);
        assert!(bytes[17..].iter().all(|&b| b == 0));
    }

    #[test]
    fn execute_dispatches_to_contract() {
        let mut contract = Qlance::new();
        let inv = Invocation::new(Identity([4; 32]));

        let out = Call::PostJob(PostJobInput { price: 9 }).execute(&mut contract, &inv);
        assert_eq!(out, Output::Posted(PostJobOutput { job_id: 0 }));

        let out = Call::ClaimJob(JobInput { job_id: 3 }).execute(&mut contract, &inv);
        assert_eq!(out.encode(), vec![1]);

        let out = Call::GetJobsCount.execute(&mut contract, &inv);
        assert_eq!(out.encode(), 1u64.to_le_bytes().to_vec());
    }
}
