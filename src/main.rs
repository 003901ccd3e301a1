use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr so stdout stays clean for JSON and the message loops.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("PHISHSENSE_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    phishsense_lib::run()
}
