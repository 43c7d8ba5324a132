//! abot CLI: run the Telegram agent bot with the demo echo agent. Config from env and
//! optional CLI args.

mod demo;

use std::sync::Arc;

use abot_telegram::{run_agent_bot, TelegramConfig};
use agent_runtime::{Agent, AgentFactory, DeliveryStyle, DeliveryTool};
use anyhow::Result;
use clap::{Parser, Subcommand};

use demo::EchoAgent;

#[derive(Parser)]
#[command(name = "abot")]
#[command(about = "Telegram agent bot: run the polling loop with a demo agent", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
        /// Hand agents the fixed-ack delivery tool instead of the error-reporting one.
        #[arg(long)]
        fixed_ack: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token, fixed_ack } => {
            let config = match token {
                Some(token) => TelegramConfig::with_token(token),
                None => TelegramConfig::from_env()?,
            };
            let style = if fixed_ack {
                DeliveryStyle::FixedAck
            } else {
                DeliveryStyle::ErrorReporting
            };
            let factory: Arc<dyn AgentFactory> = Arc::new(
                |tool: DeliveryTool, _user_id: i64| Arc::new(EchoAgent::new(tool)) as Arc<dyn Agent>,
            );
            run_agent_bot(config, factory, style).await
        }
    }
}
