use clap::Parser;
use tracing_subscriber::EnvFilter;
use zenland::cli::{self, Cli};
use zenland::config::LoggingConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.logging());
    cli::run(cli).await
}

fn init_logging(config: &LoggingConfig) {
    // RUST_LOG wins; otherwise keep stdout clean for tables
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},zenland={}", config.level, config.level)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let _ = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
