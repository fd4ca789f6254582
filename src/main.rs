//! Lark compiler CLI entry point

use clap::Parser;

fn main() {
    let cli = lark::cli::Cli::parse();

    // Initialize structured logging with env-based filter; --verbose raises the default
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .try_init();

    lark::cli::run(cli);
}
