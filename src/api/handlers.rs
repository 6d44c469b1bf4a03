// Emoji route handlers module

use hyper::body::Bytes;
use hyper::{Method, Response, StatusCode};
use http_body_util::Full;

use super::params;
use super::response::{error_response, json_response, method_not_allowed};
use crate::config::AppState;

/// GET /emojis - every emoji in load order
pub fn all_emojis(method: &Method, state: &AppState) -> Response<Full<Bytes>> {
    if method != Method::GET {
        return method_not_allowed();
    }
    json_response(StatusCode::OK, &state.store.all())
}

/// GET /emojis/categories/{category} - emojis in a known category
pub fn emojis_by_category(method: &Method, raw: &str, state: &AppState) -> Response<Full<Bytes>> {
    if method != Method::GET {
        return method_not_allowed();
    }
    let category = params::normalize_segment(raw);
    if !state.store.categories().iter().any(|c| *c == category) {
        return error_response(
            StatusCode::NOT_FOUND,
            "emojis with this category do not exist",
        );
    }
    json_response(StatusCode::OK, &state.store.all_by_category(&category))
}

/// GET /emojis/groups/{group} - emojis in a known group
pub fn emojis_by_group(method: &Method, raw: &str, state: &AppState) -> Response<Full<Bytes>> {
    if method != Method::GET {
        return method_not_allowed();
    }
    let group = params::normalize_segment(raw);
    if !state.store.groups().iter().any(|g| *g == group) {
        return error_response(StatusCode::NOT_FOUND, "emojis with this group do not exist");
    }
    json_response(StatusCode::OK, &state.store.all_by_group(&group))
}

/// GET /emojis/random - one uniformly random emoji
pub fn random_emoji(method: &Method, state: &AppState) -> Response<Full<Bytes>> {
    if method != Method::GET {
        return method_not_allowed();
    }
    match state.store.random() {
        Some(emoji) => json_response(StatusCode::OK, emoji),
        // The loader rejects empty datasets, so this is unreachable
        None => error_response(StatusCode::INTERNAL_SERVER_ERROR, "store is empty"),
    }
}

/// GET /emojis/categories/{category}/random - random emoji from a category
pub fn random_by_category(method: &Method, raw: &str, state: &AppState) -> Response<Full<Bytes>> {
    if method != Method::GET {
        return method_not_allowed();
    }
    let category = params::normalize_segment(raw);
    if !state.store.categories().iter().any(|c| *c == category) {
        return error_response(
            StatusCode::NOT_FOUND,
            "emojis with this category do not exist",
        );
    }
    match state.store.random_by_category(&category) {
        Some(emoji) => json_response(StatusCode::OK, emoji),
        None => error_response(StatusCode::INTERNAL_SERVER_ERROR, "category is empty"),
    }
}

/// GET /emojis/groups/{group}/random - random emoji from a group
pub fn random_by_group(method: &Method, raw: &str, state: &AppState) -> Response<Full<Bytes>> {
    if method != Method::GET {
        return method_not_allowed();
    }
    let group = params::normalize_segment(raw);
    if !state.store.groups().iter().any(|g| *g == group) {
        return error_response(StatusCode::NOT_FOUND, "emojis with this group do not exist");
    }
    match state.store.random_by_group(&group) {
        Some(emoji) => json_response(StatusCode::OK, emoji),
        None => error_response(StatusCode::INTERNAL_SERVER_ERROR, "group is empty"),
    }
}

/// GET /emojis/categories - distinct category names in discovery order
pub fn categories(method: &Method, state: &AppState) -> Response<Full<Bytes>> {
    if method != Method::GET {
        return method_not_allowed();
    }
    json_response(StatusCode::OK, &state.store.categories())
}

/// GET /emojis/groups - distinct group names in discovery order
pub fn groups(method: &Method, state: &AppState) -> Response<Full<Bytes>> {
    if method != Method::GET {
        return method_not_allowed();
    }
    json_response(StatusCode::OK, &state.store.groups())
}

/// GET /emojis/search?q={query} - case-insensitive name/tag search
pub fn search(method: &Method, query: Option<&str>, state: &AppState) -> Response<Full<Bytes>> {
    if method != Method::GET {
        return method_not_allowed();
    }
    let q = params::query_param(query, "q").unwrap_or_default();
    if q.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "query parameter 'q' is required");
    }
    json_response(StatusCode::OK, &state.store.search(&q))
}

/// GET /emojis/similar/{name} - emojis related by group or tags
pub fn similar(method: &Method, raw_name: &str, state: &AppState) -> Response<Full<Bytes>> {
    if method != Method::GET {
        return method_not_allowed();
    }
    if raw_name.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "name parameter is required");
    }
    let name = params::normalize_segment(raw_name);
    json_response(StatusCode::OK, &state.store.similar(&name))
}

/// GET /healthz - liveness probe
pub fn health(method: &Method) -> Response<Full<Bytes>> {
    if method != Method::GET {
        return method_not_allowed();
    }
    json_response(StatusCode::OK, &serde_json::json!({ "status": "ok" }))
}
