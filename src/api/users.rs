use axum::{
    extract::{Path, Query, State},
    response::Html,
};
use sea_orm::ActiveValue;
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::clients::graph::ProfileError;
use crate::entities::facebook_users;
use crate::merge::{field_values, merge_profile_fields};

#[derive(Deserialize)]
pub struct AddUserQuery {
    pub q_user: Option<String>,
}

fn escape(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

/// The add-user form, optionally followed by an outcome fragment.
fn form_page(fragment: &str) -> Html<String> {
    Html(format!(
        "<html><body>\
         <form action=\"/add_user/\" method=\"get\">\
         <input type=\"text\" name=\"q_user\">\
         <input type=\"submit\" value=\"Add user\">\
         </form>\
         {fragment}\
         </body></html>"
    ))
}

/// `GET /add_user/?q_user=<term>`
///
/// Fetches the named profile, merges it into a fresh record, and upserts it.
/// Every failure mode gets its own message on the form; nothing is persisted
/// unless the profile decoded to an object carrying the required fields.
pub async fn add_user(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AddUserQuery>,
) -> Result<Html<String>, ApiError> {
    let Some(q) = params.q_user else {
        return Ok(form_page(""));
    };

    if q.is_empty() {
        return Ok(form_page("<p>Enter a search term.</p>"));
    }

    let profile = match state.source().fetch_profile(&q).await {
        Ok(profile) => profile,
        Err(ProfileError::Http(_) | ProfileError::Network(_)) => {
            return Ok(form_page(
                "<p>Error: Either could not connect to Facebook or user was not found.</p>",
            ));
        }
        Err(ProfileError::Decode(_)) => {
            return Ok(form_page(
                "<p>Error: JSON could not be decoded. Maybe you were redirected to another page.</p>",
            ));
        }
        Err(ProfileError::UnexpectedShape) => {
            return Ok(form_page(
                "<p>Error: response was valid JSON but not a profile object.</p>",
            ));
        }
    };

    let mut user = facebook_users::ActiveModel::default();
    merge_profile_fields(&mut user, &profile);

    // The id is caller-supplied and the name/username columns are NOT NULL;
    // a profile object without them cannot become a row.
    let required_set = matches!(user.id, ActiveValue::Set(_))
        && matches!(user.name, ActiveValue::Set(_))
        && matches!(user.username, ActiveValue::Set(_));
    if !required_set {
        return Ok(form_page(
            "<p>Error: profile response was missing id, name, or username.</p>",
        ));
    }

    state.store().upsert_user(user).await?;

    Ok(form_page("<p>User added.</p>"))
}

/// `GET /all_users/` — `id::name::username` per stored user.
pub async fn show_all_users(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, ApiError> {
    let users = state.store().list_users().await?;

    let mut html = String::from("<html><body><b>ID::Name::Username</b><br>");
    for user in users {
        html.push_str(&format!(
            "<li>{}::{}::{}<br>",
            user.id,
            escape(&user.name),
            escape(&user.username)
        ));
    }
    html.push_str("</body></html>");

    Ok(Html(html))
}

/// `GET /users/{name}/`
///
/// Case-insensitive substring match against every stored username. On
/// multiple matches the lowest id wins; on none, a not-found page.
pub async fn show_user_info(
    State(state): State<Arc<AppState>>,
    Path(input_name): Path<String>,
) -> Result<Html<String>, ApiError> {
    let matches = state.store().find_users_matching(&input_name).await?;

    let Some(user) = matches.first() else {
        return Ok(Html(
            "<html><h1>User not found!</h1></html>".to_string(),
        ));
    };

    let mut html = String::from("<html><body>");
    for (name, value) in field_values(user) {
        html.push_str(&format!("{}: {}<br>", name, escape(&value)));
    }
    html.push_str("</body></html>");

    Ok(Html(html))
}
