//! Launchboard - Launch records dashboard

mod config;

use anyhow::Context;
use clap::{Parser, Subcommand};
use config::Config;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "launchboard")]
#[command(about = "Launch records dashboard with success and payload charts")]
#[command(version)]
struct Cli {
    /// Config file (default: launchboard.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Export chart data in batch mode
    Cli {
        /// Pass remaining arguments to launchboard-cli
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Launch web GUI
    Gui {
        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Launch records CSV
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Directory containing static/ and templates/
        #[arg(short, long)]
        assets: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_or_default(cli.config.as_deref())?;
    config.logging.init();

    match cli.command {
        Some(Commands::Cli { args }) => {
            let args = cli_args_with_data(args, &config.data.path);
            let cli_args: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
            run_cli(&cli_args)
        }
        Some(Commands::Gui {
            port,
            host,
            data,
            assets,
        }) => {
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(data) = data {
                config.data.path = data;
            }
            if let Some(assets) = assets {
                config.server.assets_dir = assets;
            }
            run_gui(&config)
        }
        // Default to GUI mode
        None => run_gui(&config),
    }
}

/// Prepend `--data <path>` from the config unless the arguments name a data
/// file themselves.
fn cli_args_with_data(args: Vec<String>, data: &Path) -> Vec<String> {
    let has_data = args
        .iter()
        .take_while(|arg| arg.as_str() != "--")
        .any(|arg| arg == "--data" || arg.starts_with("--data=") || arg.starts_with("-d"));
    if has_data {
        return args;
    }
    let mut full = vec!["--data".to_string(), data.display().to_string()];
    full.extend(args);
    full
}

fn run_cli(args: &[&str]) -> anyhow::Result<()> {
    let mut full_args = vec!["launchboard-cli"];
    full_args.extend(args);
    launchboard_cli::run_cli_main(&full_args)
}

fn run_gui(config: &Config) -> anyhow::Result<()> {
    use std::net::SocketAddr;
    use tokio::net::TcpListener;
    use tokio::runtime::Runtime;

    let table = launchboard_data::load_csv(&config.data.path).with_context(|| {
        format!("failed to load launch data from {}", config.data.path.display())
    })?;
    let state = launchboard_gui::AppState::new(table);
    let assets = launchboard_gui::AssetDirs::from_root(&config.server.assets_dir);
    if !assets.templates_dir.is_dir() {
        tracing::warn!(
            path = %assets.templates_dir.display(),
            "dashboard page not found; set server.assets_dir or --assets"
        );
    }

    let rt = Runtime::new()?;
    rt.block_on(async {
        let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .with_context(|| {
                format!("invalid listen address {}:{}", config.server.host, config.server.port)
            })?;
        let app = launchboard_gui::create_router(state, &assets);
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("dashboard listening on http://{}", addr);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        tracing::info!("dashboard stopped");
        Ok::<(), anyhow::Error>(())
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
