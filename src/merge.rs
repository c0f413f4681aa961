//! Field table for the `facebook_users` record kind.
//!
//! The Graph API returns a flat JSON object whose keys may or may not line up
//! with our columns. Instead of reflecting over the entity at runtime, the
//! declared order lives in [`FIELD_NAMES`]: the merge below assigns each
//! declared field in turn, and [`field_values`] renders a stored record
//! zipped against that same order.

use sea_orm::Set;
use serde_json::{Map, Value};

use crate::entities::facebook_users;

/// Declared field names of the user record, in column order.
pub const FIELD_NAMES: [&str; 11] = [
    "id",
    "name",
    "username",
    "description",
    "about",
    "is_published",
    "website",
    "link",
    "number",
    "talking_about_count",
    "likes",
];

/// Copy values from a decoded profile object into the record.
///
/// For each declared field: if the object has a key with that exact name, the
/// value is assigned; otherwise the field keeps its current state. Keys that
/// match no declared field are ignored. A JSON `null` clears a nullable
/// field; a value whose JSON type does not fit the column is left alone
/// (the typed table has nowhere to put it). The `number` column is
/// non-negative, so a negative value is dropped like any other mismatch.
pub fn merge_profile_fields(user: &mut facebook_users::ActiveModel, data: &Map<String, Value>) {
    if let Some(v) = data.get("id")
        && let Some(id) = v.as_i64()
    {
        user.id = Set(id);
    }
    if let Some(v) = data.get("name")
        && let Some(s) = v.as_str()
    {
        user.name = Set(s.to_string());
    }
    if let Some(v) = data.get("username")
        && let Some(s) = v.as_str()
    {
        user.username = Set(s.to_string());
    }
    if let Some(v) = data.get("description")
        && let Some(s) = nullable_str(v)
    {
        user.description = Set(s);
    }
    if let Some(v) = data.get("about")
        && let Some(s) = nullable_str(v)
    {
        user.about = Set(s);
    }
    if let Some(v) = data.get("is_published")
        && let Some(b) = nullable_bool(v)
    {
        user.is_published = Set(b);
    }
    if let Some(v) = data.get("website")
        && let Some(s) = nullable_str(v)
    {
        user.website = Set(s);
    }
    if let Some(v) = data.get("link")
        && let Some(s) = nullable_str(v)
    {
        user.link = Set(s);
    }
    if let Some(v) = data.get("number")
        && let Some(n) = nullable_nonneg(v)
    {
        user.number = Set(n);
    }
    if let Some(v) = data.get("talking_about_count")
        && let Some(n) = nullable_i32(v)
    {
        user.talking_about_count = Set(n);
    }
    if let Some(v) = data.get("likes")
        && let Some(n) = nullable_i32(v)
    {
        user.likes = Set(n);
    }
}

/// Render every declared field of a stored record, paired with its name.
/// Order matches [`FIELD_NAMES`].
#[must_use]
pub fn field_values(user: &facebook_users::Model) -> Vec<(&'static str, String)> {
    fn opt<T: std::fmt::Display>(v: &Option<T>) -> String {
        v.as_ref().map_or_else(|| "None".to_string(), T::to_string)
    }

    let values = [
        user.id.to_string(),
        user.name.clone(),
        user.username.clone(),
        opt(&user.description),
        opt(&user.about),
        opt(&user.is_published),
        opt(&user.website),
        opt(&user.link),
        opt(&user.number),
        opt(&user.talking_about_count),
        opt(&user.likes),
    ];

    FIELD_NAMES.into_iter().zip(values).collect()
}

// `Some(None)` means an explicit JSON null: the caller clears the field.
// A plain `None` means the value had the wrong type and is dropped.
fn nullable_str(v: &Value) -> Option<Option<String>> {
    match v {
        Value::Null => Some(None),
        Value::String(s) => Some(Some(s.clone())),
        _ => None,
    }
}

fn nullable_bool(v: &Value) -> Option<Option<bool>> {
    match v {
        Value::Null => Some(None),
        Value::Bool(b) => Some(Some(*b)),
        _ => None,
    }
}

fn nullable_i32(v: &Value) -> Option<Option<i32>> {
    match v {
        Value::Null => Some(None),
        Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()).map(Some),
        _ => None,
    }
}

// Like `nullable_i32`, but for a column that only admits non-negative values.
fn nullable_nonneg(v: &Value) -> Option<Option<i32>> {
    match v {
        Value::Null => Some(None),
        Value::Number(n) => n.as_u64().and_then(|n| i32::try_from(n).ok()).map(Some),
        _ => None,
    }
}
