mod args;
mod commands;
mod exit_status;
mod logging;
mod report;
mod run;

use anyhow::Result;

pub use args::{Arguments, Command, OutputFormat};
pub use exit_status::ExitStatus;
pub use logging::init_logging;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    let result = run::run(args)?;
    report::print(&result);

    Ok(ExitStatus::from_error_count(result.error_count))
}
