//! `clear` command: forget every pending location.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{ARG_STATE_DIR, ARG_STORAGE_KEY, CliError, StoreConfig, write_line};

/// CLI arguments for the `clear` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(name = "clear", about = "Forget every pending location")]
#[ortho_config(prefix = "NEARSTOP")]
pub(crate) struct ClearArgs {
    /// Directory holding the pending list.
    #[arg(long = ARG_STATE_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) state_dir: Option<Utf8PathBuf>,
    /// Name of the pending list within the state directory.
    #[arg(long = ARG_STORAGE_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) storage_key: Option<String>,
}

impl ClearArgs {
    pub(crate) fn into_config(self) -> Result<StoreConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        Ok(StoreConfig::resolve(merged.state_dir, merged.storage_key))
    }
}

pub(crate) fn run_clear_with(args: ClearArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let store = args.into_config()?.open()?;
    if store.clear()? {
        write_line(writer, "Cleared pending locations")
    } else {
        write_line(writer, "No locations stored")
    }
}
