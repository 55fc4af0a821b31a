use std::path::PathBuf;

use clap::Parser;
use relay_core::config::{Overrides, Settings};

#[derive(Parser)]
#[command(name = "lead-relay", about = "Relay lead-capture form submissions to Telegram")]
struct Cli {
    /// TOML file layered over the built-in defaults.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Port to listen on.
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Telegram bot token.
    #[arg(long, env = "BOT_TOKEN", hide_env_values = true)]
    bot_token: Option<String>,

    /// Telegram chat id leads are posted to.
    #[arg(long, env = "CHAT_ID")]
    chat_id: Option<String>,

    /// Print the effective configuration (token masked) and exit.
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let overrides = Overrides {
        port: cli.port,
        bot_token: cli.bot_token,
        chat_id: cli.chat_id,
    };
    let settings = Settings::load(cli.config.as_deref(), &overrides)?;

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&settings.redacted())?);
        return Ok(());
    }

    relay_server::run(settings).await
}
