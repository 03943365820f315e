mod job;
mod state;

pub use job::{Job, JobStatus};
pub use state::{StateMachine, Transition};
