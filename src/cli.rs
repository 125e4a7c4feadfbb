use clap::Parser;
use std::path::PathBuf;

use anyhow::{Context, Result};

// Build version with target info
const VERSION_INFO: &str = const_format::concatcp!(
    env!("CARGO_PKG_VERSION"), "\n",
    "Target: ", std::env::consts::ARCH, "-", std::env::consts::OS
);

/// Render and edit the properties of a unit-file object
#[derive(Parser, Debug)]
#[command(author, version = VERSION_INFO, about, long_about = None)]
pub struct Args {
    /// Unit file (JSON) to open
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// Id of the object to select (unit, page, element or table cell)
    #[arg(short = 's', long = "select", value_name = "ID")]
    pub select: Option<String>,

    /// Edit a panel input before applying (can be specified multiple times)
    #[arg(long = "set", value_name = "NAME=VALUE")]
    pub set: Vec<String>,

    /// Fire this trigger instead of the apply button (e.g. btnAddRow)
    #[arg(short = 't', long = "trigger", value_name = "ID")]
    pub trigger: Option<String>,

    /// Write the edited unit here (defaults to printing only)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Custom configuration directory (overrides default platform paths)
    #[arg(short = 'c', long = "config-dir", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
}

impl Args {
    /// `--set` pairs split at the first `=`.
    pub fn edits(&self) -> Result<Vec<(String, String)>> {
        self.set
            .iter()
            .map(|pair| {
                let (name, value) = pair
                    .split_once('=')
                    .with_context(|| format!("--set expects NAME=VALUE, got {pair:?}"))?;
                Ok((name.to_string(), value.to_string()))
            })
            .collect()
    }
}
