use anyhow::{Context, Result};

use super::super::args::TrimCommand;
use super::{CommandResult, CommandSummary, WriteSummary};
use crate::{
    core::catalog::format::{load_catalog, release_projection},
    json_writer::{to_pretty_json, write_atomically},
};

pub fn trim(cmd: TrimCommand) -> Result<CommandResult> {
    let loaded = load_catalog(&cmd.source)?;
    let records = release_projection(&loaded.catalog);

    let content = to_pretty_json(&records)?;
    write_atomically(&cmd.target, &content)
        .with_context(|| format!("Failed to write catalog: {}", cmd.target.display()))?;

    Ok(CommandResult::new(CommandSummary::Trim(WriteSummary {
        source: cmd.source,
        target: cmd.target,
        record_count: records.len(),
    })))
}
