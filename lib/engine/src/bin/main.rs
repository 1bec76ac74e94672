use std::io;

use engine::engine::Session;
use tracing_subscriber::EnvFilter;

fn main() -> io::Result<()> {
    // stdout carries the protocol, diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new().run(stdin.lock(), stdout.lock())
}
