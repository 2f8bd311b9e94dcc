use anyhow::Result;
use clap::Parser;
use learnjs::app::LearnApp;
use learnjs::server;
use learnjs::utils::config_loader;
use learnjs::utils::logging;
use learnjs::utils::logging::LogLevel;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = "learnjs.yaml")]
    config: String,
    #[arg(long, env = "LOG_LEVEL" , value_enum)]
    log_level: Option<LogLevel>,
    /// fragment rendered at startup
    #[arg(long, env = "INITIAL_HASH", default_value = "")]
    hash: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Load YAML config
    // -------------------------------

    let args = Args::parse();
    let service_config = config_loader::run(&args.config).await?;
    logging::run(&service_config, args.log_level)?;

    // -------------------------------
    // 2. Build app: router, views, identity federation
    // -------------------------------

    let app = LearnApp::from_config(&service_config)?;
    app.window.set_hash(&args.hash);

    // -------------------------------
    // 3. Initial render + hashchange subscription
    // -------------------------------

    let _router_task = app.app_on_ready();

    // -------------------------------
    // 4. Start http server
    // -------------------------------

    info!("Service starting...");
    server::server::start(&service_config.settings, app).await
}
