use std::process::ExitCode;

use clap::Parser;
use phrasectl::cli::{Arguments, ExitStatus};

fn main() -> ExitCode {
    let args = Arguments::parse();
    phrasectl::cli::init_logging(args.verbose);

    match phrasectl::cli::run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}
