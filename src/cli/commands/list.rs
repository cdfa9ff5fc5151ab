use anyhow::Result;

use super::super::args::ListCommand;
use super::{CommandResult, CommandSummary, ListEntry, ListSummary};
use crate::core::catalog::{
    format::load_catalog,
    sync::{ListFilter, list as list_records},
};

pub fn list(cmd: ListCommand) -> Result<CommandResult> {
    let loaded = load_catalog(&cmd.file)?;
    let filter = ListFilter {
        todo: cmd.todo,
        done: cmd.done,
    };

    let entries = list_records(&loaded.catalog, filter)
        .into_iter()
        .map(|record| ListEntry {
            phrase: record.phrase.clone(),
            context: record.context.clone(),
            translation: record.translation.clone(),
        })
        .collect();

    Ok(CommandResult::new(CommandSummary::List(ListSummary {
        entries,
    })))
}
