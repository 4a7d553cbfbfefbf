use anyhow::Context;
use clap::Parser;
use pipemock_server::{build_router, load_controller, telemetry::init_telemetry, AppState};
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "pipemock-server")]
#[command(about = "Replay canned HTTP exchanges from mock collections")]
struct Args {
    /// Route files (path or glob pattern); built-in tasks routes when omitted
    #[arg(long, env = "PIPEMOCK_ROUTES")]
    routes: Option<String>,

    /// Collection files (path or glob pattern)
    #[arg(long, env = "PIPEMOCK_COLLECTIONS")]
    collections: Option<String>,

    /// Collection to activate at startup
    #[arg(long, env = "PIPEMOCK_COLLECTION")]
    collection: Option<String>,

    /// Address to listen on
    #[arg(long, env = "PIPEMOCK_BIND", default_value = "127.0.0.1:3100")]
    bind: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_telemetry();
    let args = Args::parse();

    let controller = load_controller(
        args.routes.as_deref(),
        args.collections.as_deref(),
        args.collection.as_deref(),
    )?;
    info!(
        collection = ?controller.active_collection_id(),
        routes = controller.get_active_routes().len(),
        "mocks loaded"
    );

    let app = build_router(AppState::new(controller));
    let listener = TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("binding {}", args.bind))?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
