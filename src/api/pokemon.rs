use axum::{extract::State, response::Html};
use std::sync::Arc;

use super::{ApiError, AppState};

const LISTING_LIMIT: u64 = 50;

/// `GET /pokemon/` — the most recently generated records, newest first.
pub async fn show_recent_pokemon(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, ApiError> {
    let records = state.store().recent_pokemon(LISTING_LIMIT).await?;

    let mut html = String::from("<html><body><b>Name::Number::Type</b><br>");
    for p in records {
        html.push_str(&format!(
            "<li>{}::{}::{}<br>",
            html_escape::encode_text(&p.name),
            p.number,
            html_escape::encode_text(&p.poke_type)
        ));
    }
    html.push_str("</body></html>");

    Ok(Html(html))
}
