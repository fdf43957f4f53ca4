use anvilcheck::check_path;
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "anvilcheck", about = "Report structural damage in region archive files")]
struct Cli {
    /// Region file, or directory of region files (default: current directory)
    path: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let path = match Cli::parse().path {
        Some(p) => p,
        None    => std::env::current_dir()?,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = check_path(&mut out, &path)?;
    out.flush()?;

    log::info!("checked {} file(s), {} unreadable", summary.checked, summary.unreadable);
    Ok(())
}
