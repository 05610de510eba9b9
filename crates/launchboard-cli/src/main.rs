use clap::Parser;
use launchboard_cli::Args;

fn main() -> anyhow::Result<()> {
    // Reports go to stdout, so logs stay on stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    launchboard_cli::run(Args::parse())
}
