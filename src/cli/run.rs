//! Dispatches a parsed command to its handler.
//!
//! Every command except `init` runs with the configuration discovered from
//! the working directory.

use std::env;

use anyhow::{Context, Result};

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult, convert::convert, extract::extract, init::init, list::list, lookup::lookup,
        translate::translate, trim::trim, update::update,
    },
};
use crate::config::{Config, load_config};

fn current_config() -> Result<Config> {
    let cwd = env::current_dir().context("Failed to determine the working directory")?;
    let loaded = load_config(&cwd)?;
    if !loaded.from_file {
        tracing::debug!("no config file found, using defaults");
    }
    Ok(loaded.config)
}

pub fn run(Arguments { command, .. }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Extract(cmd)) => extract(cmd, &current_config()?),
        Some(Command::Update(cmd)) => update(cmd),
        Some(Command::Translate(cmd)) => translate(cmd, &current_config()?),
        Some(Command::List(cmd)) => list(cmd),
        Some(Command::Trim(cmd)) => trim(cmd),
        Some(Command::Convert(cmd)) => convert(cmd),
        Some(Command::Lookup(cmd)) => lookup(cmd),
        Some(Command::Init) => {
            let cwd = env::current_dir().context("Failed to determine the working directory")?;
            init(&cwd)
        }
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
