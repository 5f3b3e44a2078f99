//! SentiLeak service: binary entrypoint.
//! Loads settings and lexicons once, then serves the Axum router.

use shuttle_axum::ShuttleAxum;
use tracing::info;

use sentileak::{create_router, AppState, Settings};

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    sentileak::init_tracing();

    let settings = Settings::load()?;
    info!(?settings, "settings resolved");

    // Lexicon files are read here, outside the request path.
    let state = AppState::from_settings(&settings)?;
    let router = create_router(state);

    Ok(router.into())
}
