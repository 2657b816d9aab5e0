//! `edgeefy`: Canny edge detection for PNG and JPEG files.
//!
//! Run from the workspace root:
//!   cargo run -p edgeefy-cli -- --input photo.jpg --output edges.png
//!   cargo run -p edgeefy-cli -- --config run.json --max 0.5

mod app;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = app::Cli::parse();
    let cfg = app::resolve_config(cli)?;
    app::init_logging(cfg.log_level.as_deref())?;
    app::run(&cfg)?;
    Ok(())
}
