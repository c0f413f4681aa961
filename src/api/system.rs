use axum::{extract::State, response::Html};
use std::sync::Arc;

use super::{ApiError, AppState};

/// `GET /status/` — liveness page: database reachability, record counts,
/// uptime since the process started.
pub async fn status(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    state.store().ping().await?;

    let users = state.store().user_count().await?;
    let pokemon = state.store().pokemon_count().await?;
    let uptime = state.start_time.elapsed().as_secs();

    Ok(Html(format!(
        "<html><body><b>graphsync v{}</b><br>\
         database: ok<br>\
         users: {users}<br>\
         pokemon: {pokemon}<br>\
         uptime: {uptime}s<br>\
         </body></html>",
        env!("CARGO_PKG_VERSION")
    )))
}
