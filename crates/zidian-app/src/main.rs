use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::signal;
use tracing_subscriber::EnvFilter;
use zidian_config::OutputFormat;
use zidian_config::lookup::LookupConfig;
use zidian_core::state::AppState;
use zidian_core::{QueryView, ViewState};
use zidian_lookup::{LookupClient, LookupError, TianApiClient};
use zidian_ui::Renderer;

pub mod controller;
pub mod events;
pub mod profile;


use self::controller::AppController;

#[derive(Parser)]
#[command(name = "zidian", version, about = "汉字释义查询: look up a single Chinese character")]
struct Cli {
    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format: text, html or json
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    log_json: bool,

    /// Look up this character and exit instead of starting a session
    character: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let loaded = profile::load_config(cli.config.as_deref())?;
    let mut config = loaded.config;
    if let Some(format) = cli.format {
        config.ui.format = format;
    }

    init_tracing(&config.log_filter, cli.log_json);

    if let Some(file) = &loaded.file {
        tracing::info!("Loaded config from {}", file.display());
    }
    match &loaded.dotenv {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(e) => tracing::debug!("No .env loaded: {}", e),
    }

    let client: Arc<dyn LookupClient> = Arc::new(build_client(&config.lookup)?);

    if client.metadata().requires_api_key && config.lookup.api_key.is_empty() {
        tracing::warn!("ZIDIAN_API_KEY is not set, lookups will be rejected by the API");
    }

    if let Some(text) = cli.character {
        let renderer = Renderer::from_config(&config.ui);
        let found = lookup_once(client.as_ref(), &text, &renderer).await;
        return Ok(if found {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let state = Arc::new(AppState::new(config));
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(client);

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        result = tasks.join_next() => match result {
            Some(Ok(Ok(()))) => tracing::debug!("Session task finished"),
            Some(Ok(Err(e))) => tracing::error!("Session task failed: {e:#}"),
            Some(Err(e)) => tracing::error!("Session task panicked: {e}"),
            None => {}
        },
    }

    controller.shutdown();
    tasks.shutdown().await;

    Ok(ExitCode::SUCCESS)
}

fn init_tracing(default_filter: &str, json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

fn build_client(config: &LookupConfig) -> Result<TianApiClient, LookupError> {
    let timeout =
        (config.timeout_seconds > 0).then(|| Duration::from_secs(config.timeout_seconds));

    TianApiClient::with_timeout(config.base_url.clone(), config.api_key.clone(), timeout)
}

/// One submission straight from the command line. The argument bypasses the
/// input field, so over-long text is reported rather than truncated.
async fn lookup_once(client: &dyn LookupClient, text: &str, renderer: &Renderer) -> bool {
    let mut view = QueryView::new();
    view.set_query(text);
    view.submit(client).await;

    println!("{}", renderer.render(&view.render()));
    matches!(view.state(), ViewState::Found(_))
}
