mod api;
mod router;
mod sessions;
mod state;

use std::sync::Arc;

use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    docqa_core::config::load_dotenv();
    let config = docqa_core::Config::from_env();
    config.log_summary();

    // A missing credential is a startup error, not a per-request surprise.
    if !config.llm.is_configured() {
        anyhow::bail!("GOOGLE_API_KEY must be set (environment or .env)");
    }
    let generator = docqa_llm::AnswerGenerator::from_config(&config.llm)?;

    let state = Arc::new(state::AppState::new(&config, generator));
    let app = router::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
