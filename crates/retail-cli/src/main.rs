mod diagnostics;
mod seller;
mod views;

use std::{path::PathBuf, time::Duration};

use clap::{Parser, Subcommand};
use retail_client::BackendClient;
use retail_core::{AppConfig, StoreType};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "retail-cli")]
#[command(about = "Retail dashboard command line interface")]
struct Cli {
    /// Talk to the resolved backend origins instead of the dashboard gateway
    #[arg(long, global = true)]
    direct: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// One-shot connection status and last data refresh
    Status,
    /// List stores known to the backend
    Stores,
    /// Interactive seller quick dashboard
    Seller {
        /// Store to open (defaults to the first store in the list)
        #[arg(long)]
        store: Option<String>,
        /// Store profile used for recommendations (standard, premium, outlet)
        #[arg(long, default_value = "standard")]
        store_type: StoreType,
    },
    /// Show where the model server would load its sales data from
    DataSource {
        /// Model-server root (overrides `RETAIL_MODEL_SERVER_DIR`)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Show the deployment mode and the backend origins it resolves to
    Resolve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();
    let config = retail_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Status) => {
            views::run_status(&build_client(&config, cli.direct)?).await;
            Ok(())
        }
        Some(Commands::Stores) => {
            views::run_stores(&build_client(&config, cli.direct)?).await;
            Ok(())
        }
        Some(Commands::Seller { store, store_type }) => {
            let client = build_client(&config, cli.direct)?;
            seller::run_seller(&client, store.as_deref(), store_type).await
        }
        Some(Commands::DataSource { dir }) => {
            diagnostics::run_data_source(&config, dir.as_deref())
        }
        Some(Commands::Resolve) => {
            diagnostics::run_resolve(&config);
            Ok(())
        }
        None => {
            println!("retail-cli ready; run `retail-cli --help` for commands");
            Ok(())
        }
    }
}

/// The gateway exposes the same `/api` routes as the backend, so one client
/// type serves both targets.
fn build_client(config: &AppConfig, direct: bool) -> anyhow::Result<BackendClient> {
    let client = if direct {
        BackendClient::from_config(config)?
    } else {
        BackendClient::new(
            vec![config.dashboard_url.clone()],
            Duration::from_secs(config.backend_timeout_secs),
            &config.user_agent,
        )?
    };
    Ok(client)
}
