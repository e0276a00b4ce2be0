//! Parley console binary.
//!
//! # Usage
//!
//! ```bash
//! # Talk to the demo trading menu
//! parley-console
//!
//! # Smaller batches and debug logs on stderr
//! parley-console --batch-limit 2 --log-level debug
//! ```

use clap::Parser;
use parley_app::Driver;
use parley_console::{ConsoleError, ConsoleTransport, TradingMenu};
use parley_core::{EngineConfig, UserId};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Parley menu dialog on the console
#[derive(Parser, Debug)]
#[command(name = "parley-console")]
#[command(about = "Menu-driven chat dialog over stdin/stdout")]
#[command(version)]
struct Args {
    /// User id the session is bound to
    #[arg(short, long, default_value = "1")]
    user: u64,

    /// Notices buffered before an automatic send
    #[arg(long, default_value = "4")]
    batch_limit: usize,

    /// USDT balance of a fresh demo account
    #[arg(long, default_value = "1000")]
    starting_balance: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if args.batch_limit == 0 {
        return Err(ConsoleError::Config("--batch-limit must be at least 1".to_owned()).into());
    }

    tracing::info!(user = args.user, batch_limit = args.batch_limit, "Parley console starting");

    let config = EngineConfig { batch_limit: args.batch_limit, ..Default::default() };
    let transport = ConsoleTransport::stdio(UserId(args.user));
    let menu = TradingMenu { starting_balance: args.starting_balance };

    let mut driver = Driver::attach_with_config(transport, menu, config);
    driver.run().await?;

    tracing::info!(restarts = driver.restarts(), "Parley console stopped");
    Ok(())
}
