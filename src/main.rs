use anyhow::Result;
use clap::Parser;

use qlance::config::QlanceConfig;
use qlance::contract::{GetJobInput, JobInput, PostJobInput};
use qlance::host::LocalHost;
use qlance::logging::{self, LogFormat};
use qlance::ui::Report;
use qlance::wire::Call;

mod cli;

use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = QlanceConfig::load()?;
    if let Some(state) = &cli.state {
        config.state_file = state.into();
    }

    let level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    logging::init(level, LogFormat::parse(&config.log_format));

    let mut host = LocalHost::open(&config.state_file)?;
    let report = Report::default();

    let call = match cli.command {
        Command::Post { price } => Call::PostJob(PostJobInput { price }),
        Command::Claim { job_id } => Call::ClaimJob(JobInput { job_id }),
        Command::Submit { job_id } => Call::SubmitWork(JobInput { job_id }),
        Command::Approve { job_id } => Call::ApproveWork(JobInput { job_id }),
        Command::Reject { job_id } => Call::RejectWork(JobInput { job_id }),
        Command::Count => Call::GetJobsCount,
        Command::Get { job_id } => Call::GetJob(GetJobInput { job_id }),
        Command::Show { job_id } => {
            report.job(job_id, host.contract().lifecycle().registry().get(job_id))?;
            return Ok(());
        }
        Command::Stats => {
            let lifecycle = host.contract().lifecycle();
            report.stats(
                lifecycle.query().count(),
                lifecycle.registry().capacity(),
                lifecycle.total_jobs_completed(),
            );
            return Ok(());
        }
        Command::Call {
            kind,
            input_type,
            payload,
        } => {
            let payload = hex::decode(payload.trim()).map_err(qlance::error::PayloadError::from)?;
            let out = host.invoke_raw(kind.into(), input_type, &payload, cli.caller)?;
            report.raw(&out);
            return Ok(());
        }
    };

    let output = host.invoke(call, cli.caller)?;
    report.call(&call, &output);
    Ok(())
}
