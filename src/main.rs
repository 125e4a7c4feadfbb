use propbox::cli::Args;
use propbox::config::PanelConfig;
use propbox::document::Document;
use propbox::paths::{self, PathConfig};
use propbox::shell::{self, Shell};

use anyhow::Result;
use clap::Parser;
use log::{debug, info};

fn main() -> Result<()> {
    let args = Args::parse();

    shell::init_logger(args.verbosity);
    info!("Propbox starting...");
    debug!("Command-line args: {:?}", args);

    // Create path configuration from CLI args and environment
    let path_config = PathConfig::from_env_and_cli(args.config_dir.clone());
    info!(
        "Config path: {}",
        paths::config_file(propbox::config::CONFIG_FILE, &path_config).display()
    );
    let config = PanelConfig::load(&path_config)?;

    let edits = args.edits()?;
    let document = Document::from_json(&args.document)?;
    let mut shell = Shell::new(document, &config);

    shell.select(args.select.as_deref())?;
    shell.run(&edits, args.trigger.as_deref())?;
    shell.process_events();

    println!("{}", shell.render_text());

    if let Some(output) = &args.output {
        shell.document.to_json(output)?;
        info!("Saved unit to {}", output.display());
    }
    Ok(())
}
