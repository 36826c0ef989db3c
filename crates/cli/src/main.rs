mod config;
mod error;
mod http;
mod session;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use gateway::{Backend, HfBackend, ModelClient, QueryHandler};
use tracing_subscriber::EnvFilter;

use config::Config;
use error::Result;

const CONFIG_FILE: &str = "modelgate.toml";

#[derive(Parser)]
#[command(name = "modelgate")]
#[command(about = "A dual-transport model query gateway", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP query endpoint
    Serve {
        /// Port to bind (overrides config and the PORT variable)
        #[arg(short, long)]
        port: Option<u16>,
        /// Also serve an MCP session on stdin/stdout
        #[arg(long)]
        stdio: bool,
    },
    /// Serve a single MCP session on stdin/stdout
    Stdio,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr: stdout belongs to the MCP session when one runs.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::load_or_default(CONFIG_FILE)?;
    let token = config.token()?;
    let backend = HfBackend::builder(token, &config.backend.model)
        .provider(Some(config.backend.provider.clone()))
        .build();
    tracing::info!(backend = %backend, "gateway starting");

    // One adapter instance, shared by reference with every binding.
    let handler = Arc::new(QueryHandler::new(ModelClient::new(backend)));

    match cli.command.unwrap_or(Commands::Serve {
        port: None,
        stdio: false,
    }) {
        Commands::Serve { port, stdio } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(&config, handler, stdio).await
        }
        Commands::Stdio => Ok(session::build_server(handler)?.serve_stdio().await?),
    }
}

async fn serve<B>(config: &Config, handler: Arc<QueryHandler<B>>, stdio: bool) -> Result<()>
where
    B: Backend + 'static,
{
    let addr = config.bind_addr()?;
    let app = http::router(handler.clone());
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "http listener bound");

    if stdio {
        // The stdio session lives alongside the HTTP listener; when the
        // client hangs up, HTTP keeps serving.
        let server = session::build_server(handler)?;
        let mcp_task = tokio::spawn(async move {
            if let Err(e) = server.serve_stdio().await {
                tracing::error!(error = %e, "mcp session failed");
            }
        });
        let served = axum::serve(listener, app).await;
        mcp_task.abort();
        served?;
    } else {
        axum::serve(listener, app).await?;
    }

    Ok(())
}
