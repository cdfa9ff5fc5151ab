use anyhow::Result;

use super::super::args::UpdateCommand;
use super::{CommandResult, CommandSummary, UpdateSummary};
use crate::core::catalog::{
    format::{load_catalog, load_catalog_or_default, save_catalog},
    sync::{UpdateOptions, update as update_catalog},
};

pub fn update(cmd: UpdateCommand) -> Result<CommandResult> {
    let source = load_catalog(&cmd.source)?;
    // A new target takes the shape of its source.
    let mut target = load_catalog_or_default(&cmd.target, source.format)?;

    let options = UpdateOptions {
        copy_locations: !cmd.no_locations,
        trim: !cmd.no_trim,
    };
    let stats = update_catalog(&source.catalog, &mut target.catalog, options);
    tracing::debug!(
        added = stats.added,
        updated = stats.updated,
        removed = stats.removed,
        "updated catalog"
    );

    save_catalog(&cmd.target, &target.catalog, target.format)?;

    Ok(CommandResult::new(CommandSummary::Update(UpdateSummary {
        target: cmd.target,
        stats,
    })))
}
