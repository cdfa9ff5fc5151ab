use anyhow::Result;

use super::super::args::ConvertCommand;
use super::{CommandResult, CommandSummary, WriteSummary};
use crate::core::catalog::{
    CatalogFormat,
    format::{load_catalog, save_catalog},
};

pub fn convert(cmd: ConvertCommand) -> Result<CommandResult> {
    let loaded = load_catalog(&cmd.source)?;
    if loaded.format == CatalogFormat::List {
        tracing::debug!(path = %cmd.source.display(), "catalog is already a record list");
    }

    save_catalog(&cmd.target, &loaded.catalog, CatalogFormat::List)?;

    Ok(CommandResult::new(CommandSummary::Convert(WriteSummary {
        source: cmd.source,
        target: cmd.target,
        record_count: loaded.catalog.len(),
    })))
}
