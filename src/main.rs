use anyhow::Result;
use clap::Parser;
use hamwatch::{config, run};

#[derive(Parser, Debug)]
#[command(name = "hamwatch")]
#[command(about = "Desktop notifications for new satellite pass alerts")]
#[command(version)]
struct Args {
    /// Forget all previously seen alerts and notify about everything again
    #[arg(long)]
    reset: bool,

    /// Initialize configuration
    #[arg(long)]
    init: bool,

    /// Path to config file
    #[arg(long, short)]
    config: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("hamwatch=info".parse()?),
        )
        .init();

    if args.init {
        config::init_wizard()?;
        return Ok(());
    }

    let config = config::load(args.config.as_deref(), args.reset)?;

    run::run(&config).await
}
