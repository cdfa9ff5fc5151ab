use anyhow::Result;

use super::super::args::LookupCommand;
use super::{CommandResult, CommandSummary, LookupSummary};
use crate::core::runtime::Translator;

pub fn lookup(cmd: LookupCommand) -> Result<CommandResult> {
    let translator = Translator::from_path(&cmd.file)?;
    let translation = translator
        .translate(&cmd.phrase, cmd.context.as_deref())
        .to_string();

    Ok(CommandResult::new(CommandSummary::Lookup(LookupSummary {
        translation,
    })))
}
