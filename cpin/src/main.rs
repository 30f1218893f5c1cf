use anyhow::{Context, Result};
use clap::Parser;
use cpin::cli::Args;
use cpin::lister::CondaLister;
use cpin::output::ReportRenderer;
use cpin::sync::Synchronizer;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    if args.no_color {
        colored::control::set_override(false);
    }

    let config = args.config();
    let synchronizer = Synchronizer::new(CondaLister::new(&args.conda)).dry_run(args.dry_run);

    let report = synchronizer.run(&config).with_context(|| {
        format!(
            "Failed to pin {} against the {} environment",
            config.manifest_path().display(),
            config.env_name
        )
    })?;

    ReportRenderer::new(!args.no_color).render(&report);

    Ok(())
}
