use std::{error::Error, io};
use tracing_subscriber::EnvFilter;

/// decode a captured Ethernet frame and print an annotated report
#[derive(argh::FromArgs, Debug)]
struct Args {
    /// path of the binary frame to decode
    #[argh(positional)]
    path: String,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();

    let Args { path } = argh::from_env::<Args>();
    tracing::debug!(%path, "reading frame");
    let bytes = std::fs::read(&path).map_err(|e| format!("can't read {path}: {e}"))?;

    let frame = pktview::decode(&bytes)?;
    pktview::write_report(&frame, io::stdout().lock())?;
    Ok(())
}
