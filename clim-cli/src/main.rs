//! clim-cli - serve and query Hawaii climate observation data.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "clim-cli",
    version,
    about = "Climate observation API and data toolkit"
)]
struct Cli {
    /// Default log filter when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "CLIM_LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: clim_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();
    clim_cmd::run(cli.command).await
}
