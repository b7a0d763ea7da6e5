use crate::args::Args;
use crate::logging::init_logging;
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info, trace};

mod args;
mod logging;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_logging(args.logging().log_level_filter())?;
    trace!("starting inkc with args: {args:?}");
    debug!("inkc version: {}", env!("CARGO_PKG_VERSION"));

    let written = run(&args).await?;
    info!("generated {} files", written.len());
    Ok(())
}

/// Compiles every file named by the args, returning what was written
async fn run(args: &Args) -> eyre::Result<Vec<PathBuf>> {
    let inkc = args.builder().build()?;
    debug!("paths to compile: {:#?}", args.files);
    let written = inkc.compile_all(args.files.clone()).await?;
    Ok(written)
}
