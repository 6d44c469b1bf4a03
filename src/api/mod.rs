// API module entry
// Route dispatch for the emoji metadata API

mod handlers;
mod params;
mod response;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::HeaderValue;
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::config::AppState;
use crate::logger::{self, AccessLogEntry};

/// Main entry point for HTTP request handling
///
/// Extracts what the routing layer needs from the request, dispatches, and
/// writes one access log line per request.
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();

    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(ToString::to_string);
    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    let http_version = version_str(req.version());

    let mut resp = if let Some(too_large) = check_body_size(&req, state.config.http.max_body_size)
    {
        too_large
    } else {
        respond(&method, &path, query.as_deref(), state.as_ref())
    };

    if state.config.http.enable_cors {
        resp.headers_mut()
            .insert("Access-Control-Allow-Origin", HeaderValue::from_static("*"));
    }

    if state.config.logging.access_log {
        let mut entry =
            AccessLogEntry::new(remote_addr.ip().to_string(), method.to_string(), path);
        entry.query = query;
        entry.http_version = http_version.to_string();
        entry.status = resp.status().as_u16();
        entry.body_bytes = content_length(&resp);
        entry.user_agent = user_agent;
        entry.request_time_us =
            u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(resp)
}

/// Dispatch on path segments to the matching handler
///
/// Every handler enforces the GET-only contract itself; unknown paths get a
/// 404 listing the known endpoints.
fn respond(
    method: &Method,
    path: &str,
    query: Option<&str>,
    state: &AppState,
) -> Response<Full<Bytes>> {
    let trimmed = path.trim_start_matches('/').trim_end_matches('/');
    let segments: Vec<&str> = trimmed.split('/').collect();

    match segments.as_slice() {
        ["emojis"] => handlers::all_emojis(method, state),
        ["emojis", "random"] => handlers::random_emoji(method, state),
        ["emojis", "categories"] => handlers::categories(method, state),
        ["emojis", "categories", category] => {
            handlers::emojis_by_category(method, category, state)
        }
        ["emojis", "categories", category, "random"] => {
            handlers::random_by_category(method, category, state)
        }
        ["emojis", "groups"] => handlers::groups(method, state),
        ["emojis", "groups", group] => handlers::emojis_by_group(method, group, state),
        ["emojis", "groups", group, "random"] => handlers::random_by_group(method, group, state),
        ["emojis", "search"] => handlers::search(method, query, state),
        // A bare /emojis/similar means the required name segment is missing
        ["emojis", "similar"] => handlers::similar(method, "", state),
        ["emojis", "similar", name] => handlers::similar(method, name, state),
        ["healthz"] => handlers::health(method),
        _ => response::not_found_route(),
    }
}

/// Validate Content-Length and reject oversized request bodies
fn check_body_size(
    req: &Request<hyper::body::Incoming>,
    max_body_size: u64,
) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    let size = content_length.to_str().ok()?.parse::<u64>().ok()?;
    if size > max_body_size {
        logger::log_warning(&format!(
            "Request body too large: {size} bytes (max: {max_body_size})"
        ));
        return Some(response::error_response(
            hyper::StatusCode::PAYLOAD_TOO_LARGE,
            "request body too large",
        ));
    }
    None
}

fn content_length(resp: &Response<Full<Bytes>>) -> usize {
    resp.headers()
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

fn version_str(version: Version) -> &'static str {
    if version == Version::HTTP_10 {
        "1.0"
    } else if version == Version::HTTP_2 {
        "2"
    } else {
        "1.1"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::store;
    use http_body_util::BodyExt;
    use hyper::{Method, StatusCode};

    fn test_state() -> AppState {
        let config = Config::load_from("does-not-exist").unwrap();
        let store = store::load(None).unwrap();
        AppState::new(config, store)
    }

    async fn body_json(resp: Response<Full<Bytes>>) -> serde_json::Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_list_all_emojis() {
        let state = test_state();
        let resp = respond(&Method::GET, "/emojis", None, &state);
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "application/json"
        );

        let body = body_json(resp).await;
        let emojis = body.as_array().unwrap();
        assert_eq!(emojis.len(), state.store.all().len());
    }

    #[tokio::test]
    async fn test_post_is_method_not_allowed() {
        let state = test_state();
        for path in [
            "/emojis",
            "/emojis/random",
            "/emojis/categories",
            "/emojis/search",
            "/healthz",
        ] {
            let resp = respond(&Method::POST, path, None, &state);
            assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED, "{path}");
            let body = body_json(resp).await;
            assert_eq!(body["error"], "method not allowed");
        }
    }

    #[tokio::test]
    async fn test_category_path_is_normalized() {
        let state = test_state();
        let resp = respond(
            &Method::GET,
            "/emojis/categories/smileys-and-people",
            None,
            &state,
        );
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        let emojis = body.as_array().unwrap();
        assert!(!emojis.is_empty());
        for emoji in emojis {
            assert_eq!(emoji["category"], "smileys and people");
        }
    }

    #[tokio::test]
    async fn test_unknown_category_is_not_found() {
        let state = test_state();
        let resp = respond(&Method::GET, "/emojis/categories/not-a-category", None, &state);
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = body_json(resp).await;
        assert_eq!(body["error"], "emojis with this category do not exist");
    }

    #[tokio::test]
    async fn test_unknown_group_is_not_found() {
        let state = test_state();
        let resp = respond(&Method::GET, "/emojis/groups/not-a-group", None, &state);
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = body_json(resp).await;
        assert_eq!(body["error"], "emojis with this group do not exist");
    }

    #[tokio::test]
    async fn test_group_listing_filters_exactly() {
        let state = test_state();
        let resp = respond(&Method::GET, "/emojis/groups/animal-mammal", None, &state);
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        for emoji in body.as_array().unwrap() {
            assert_eq!(emoji["group"], "animal mammal");
        }
    }

    #[tokio::test]
    async fn test_random_returns_one_emoji() {
        let state = test_state();
        let resp = respond(&Method::GET, "/emojis/random", None, &state);
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert!(body["name"].is_string());
        assert!(body["glyph"].is_string());
    }

    #[tokio::test]
    async fn test_random_by_category_stays_in_category() {
        let state = test_state();
        for _ in 0..20 {
            let resp = respond(
                &Method::GET,
                "/emojis/categories/food-and-drink/random",
                None,
                &state,
            );
            assert_eq!(resp.status(), StatusCode::OK);
            let body = body_json(resp).await;
            assert_eq!(body["category"], "food and drink");
        }
    }

    #[tokio::test]
    async fn test_random_by_unknown_group_is_not_found() {
        let state = test_state();
        let resp = respond(&Method::GET, "/emojis/groups/nope/random", None, &state);
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_category_and_group_listings() {
        let state = test_state();

        let resp = respond(&Method::GET, "/emojis/categories", None, &state);
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        let listed: Vec<String> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect();
        assert_eq!(listed, state.store.categories());

        let resp = respond(&Method::GET, "/emojis/groups", None, &state);
        let body = body_json(resp).await;
        assert_eq!(body.as_array().unwrap().len(), state.store.groups().len());
    }

    #[tokio::test]
    async fn test_search_requires_query() {
        let state = test_state();
        for query in [None, Some(""), Some("q="), Some("page=1")] {
            let resp = respond(&Method::GET, "/emojis/search", query, &state);
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let body = body_json(resp).await;
            assert_eq!(body["error"], "query parameter 'q' is required");
        }
    }

    #[tokio::test]
    async fn test_search_finds_matches() {
        let state = test_state();
        let resp = respond(&Method::GET, "/emojis/search", Some("q=CAT"), &state);
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["name"].as_str().unwrap())
            .collect();
        assert!(names.contains(&"cat face"));
    }

    #[tokio::test]
    async fn test_similar_requires_name() {
        let state = test_state();
        let resp = respond(&Method::GET, "/emojis/similar", None, &state);
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp).await;
        assert_eq!(body["error"], "name parameter is required");
    }

    #[tokio::test]
    async fn test_similar_excludes_the_emoji_itself() {
        let state = test_state();
        let resp = respond(&Method::GET, "/emojis/similar/dog-face", None, &state);
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        let emojis = body.as_array().unwrap();
        assert!(!emojis.is_empty());
        for emoji in emojis {
            assert_ne!(emoji["name"], "dog face");
        }
    }

    #[tokio::test]
    async fn test_similar_unknown_name_is_empty_list() {
        let state = test_state();
        let resp = respond(&Method::GET, "/emojis/similar/no-such-emoji", None, &state);
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_route_lists_endpoints() {
        let state = test_state();
        let resp = respond(&Method::GET, "/nope", None, &state);
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = body_json(resp).await;
        assert_eq!(body["error"], "not found");
        assert!(body["available_endpoints"].as_array().unwrap().len() > 5);
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let state = test_state();
        let resp = respond(&Method::GET, "/healthz", None, &state);
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_all_emojis_round_trips_through_json() {
        let state = test_state();
        let resp = respond(&Method::GET, "/emojis", None, &state);
        let body = body_json(resp).await;
        let parsed: Vec<crate::store::Emoji> = serde_json::from_value(body).unwrap();

        let mut categories: Vec<&str> =
            parsed.iter().map(|e| e.category.as_str()).collect();
        categories.sort_unstable();
        categories.dedup();
        let mut known: Vec<&str> =
            state.store.categories().iter().map(String::as_str).collect();
        known.sort_unstable();
        assert_eq!(categories, known);
    }
}
