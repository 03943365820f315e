//! Terminal output for the Qlance CLI.
//!
//! Uses `console` for colour: green for accepted calls, red for refused
//! ones, yellow for lookups that found nothing.

use console::Style;

use crate::contract::STATUS_OK;
use crate::state_machine::{Job, JobStatus};
use crate::wire::{Call, Output};

pub struct Report {
    green: Style,
    red: Style,
    yellow: Style,
    dim: Style,
}

impl Default for Report {
    fn default() -> Self {
        Self {
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
            yellow: Style::new().yellow(),
            dim: Style::new().dim(),
        }
    }
}

impl Report {
    /// Print the decoded result of a contract call.
    pub fn call(&self, call: &Call, output: &Output) {
        match output {
            Output::JobsCount(out) => println!("{}", out.count),
            Output::Job(out) => {
                println!(
                    "job {}  price {}  status {} ({})",
                    out.job_id,
                    out.price,
                    out.status,
                    status_name(out.status)
                );
            }
            Output::Posted(out) => {
                println!(
                    "  {} {} -> job_id {}",
                    self.green.apply_to("✓"),
                    call.name(),
                    out.job_id
                );
            }
            Output::Status(out) if out.status == STATUS_OK => {
                println!("  {} {} accepted", self.green.apply_to("✓"), call.name());
            }
            Output::Status(out) => {
                println!(
                    "  {} {} refused (status {})",
                    self.red.apply_to("✗"),
                    call.name(),
                    out.status
                );
            }
        }
    }

    /// Print a full job record as JSON, or a not-found notice.
    pub fn job(&self, job_id: u64, record: Option<&Job>) -> serde_json::Result<()> {
        match record {
            Some(job) => println!("{}", serde_json::to_string_pretty(job)?),
            None => println!("  {} job {job_id} not found", self.yellow.apply_to("?")),
        }
        Ok(())
    }

    pub fn raw(&self, bytes: &[u8]) {
        println!("{}", hex::encode(bytes));
    }

    pub fn stats(&self, count: u64, capacity: usize, completed: u64) {
        println!("{} {count}/{capacity}", self.dim.apply_to("jobs:     "));
        println!("{} {completed}", self.dim.apply_to("completed:"));
    }
}

fn status_name(status: u8) -> String {
    JobStatus::try_from(status)
        .map(|s| s.to_string())
        .unwrap_or_else(|b| format!("UNKNOWN({b})"))
}
