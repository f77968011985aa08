use std::io;

use anyhow::Result;
use bikeshare::{session, ExploreError, TripExplorer};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // Logs go to stderr and stay quiet unless RUST_LOG asks for more.
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();

    let explorer = TripExplorer::new(".");
    info!("reading datasets from {}", explorer.base_path().display());

    let mut input = io::stdin().lock();
    let mut out = io::stdout().lock();

    match session::run(&explorer, &mut input, &mut out) {
        Ok(()) | Err(ExploreError::InputClosed) => Ok(()),
        Err(e) => Err(e.into()),
    }
}
