use std::path::Path;

use anyhow::{Result, bail};

use super::super::args::TranslateCommand;
use super::{CommandResult, CommandSummary, TranslateSummary};
use crate::{
    config::Config,
    core::{
        catalog::format::{load_catalog, save_catalog},
        translate::{GoogleTranslate, Retranslate, translate_catalog},
    },
};

/// Language code from a file name like `strings-fr.json` or `strings-pt-BR.json`.
fn language_from_file_name(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    match stem.find('-') {
        Some(index) if index > 0 && index + 1 < stem.len() => Some(stem[index + 1..].to_string()),
        _ => None,
    }
}

fn retranslate_mode(cmd: &TranslateCommand) -> Retranslate {
    if cmd.all {
        Retranslate::All
    } else if cmd.redo {
        Retranslate::Machine
    } else {
        Retranslate::Missing
    }
}

pub fn translate(cmd: TranslateCommand, config: &Config) -> Result<CommandResult> {
    let Some(language) = cmd
        .language
        .clone()
        .or_else(|| language_from_file_name(&cmd.file))
    else {
        bail!(
            "Cannot tell the target language of {} (use --language)",
            cmd.file.display()
        );
    };
    let mode = retranslate_mode(&cmd);

    let mut loaded = load_catalog(&cmd.file)?;
    let backend = GoogleTranslate::new(
        cmd.api_key,
        &config.translate_endpoint,
        &config.source_language,
    )?;

    let translated = translate_catalog(&mut loaded.catalog, &backend, &language, mode)?;
    if translated > 0 {
        save_catalog(&cmd.file, &loaded.catalog, loaded.format)?;
    }

    Ok(CommandResult::new(CommandSummary::Translate(
        TranslateSummary {
            file: cmd.file,
            language,
            translated,
        },
    )))
}
