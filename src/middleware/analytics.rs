use std::net::SocketAddr;
use axum::{
    body::Body,
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use crate::state::AppState;

pub const VISITOR_COOKIE: &str = "nanoedit_vid";

/// Per-browser id used for page view dedup and as the GA client id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisitorId(pub String);

// Cookie first, then the client address, then a fresh id
fn resolve_visitor(jar: &CookieJar, headers: &HeaderMap, peer: Option<SocketAddr>) -> VisitorId {
    if let Some(cookie) = jar.get(VISITOR_COOKIE) {
        if !cookie.value().is_empty() {
            return VisitorId(cookie.value().to_string());
        }
    }

    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|addr| !addr.is_empty())
        .map(str::to_string);

    match forwarded.or_else(|| peer.map(|addr| addr.ip().to_string())) {
        Some(addr) => VisitorId(format!("ip-{}", addr)),
        None => VisitorId(uuid::Uuid::new_v4().to_string()),
    }
}

fn visitor_cookie(value: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(VISITOR_COOKIE, value);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.make_permanent();
    cookie
}

// Page views are reported for successful GETs of HTML routes only
pub async fn track_page_views(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();
    let trackable = req.method() == Method::GET && is_page_route(&path);

    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let visitor = resolve_visitor(&jar, req.headers(), peer);

    // Browsers without the cookie get one, so later visits are keyed by it
    let jar = if jar.get(VISITOR_COOKIE).map_or(true, |cookie| cookie.value().is_empty()) {
        jar.add(visitor_cookie(uuid::Uuid::new_v4().to_string()))
    } else {
        jar
    };

    req.extensions_mut().insert(visitor.clone());
    let response = next.run(req).await;

    if trackable && response.status().is_success() {
        state.tracker.track(&visitor.0, &path);
    }
    (jar, response).into_response()
}

fn is_page_route(path: &str) -> bool {
    if path.starts_with("/static") || path.starts_with("/api") {
        return false;
    }
    if path.ends_with("/notifications") || path.ends_with("/status") {
        return false;
    }
    // sitemap.xml, robots.txt and other files
    let last_segment = path.rsplit('/').next().unwrap_or("");
    !last_segment.contains('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderValue};

    #[test]
    fn test_is_page_route() {
        assert!(is_page_route("/"));
        assert!(is_page_route("/blog/edit-photos-with-text-prompts"));
        assert!(is_page_route("/editor/task/kie-1"));
        assert!(!is_page_route("/static/site.css"));
        assert!(!is_page_route("/sitemap.xml"));
        assert!(!is_page_route("/editor/task/kie-1/status"));
        assert!(!is_page_route("/editor/task/kie-1/notifications"));
    }

    #[test]
    fn test_cookie_wins_over_address() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("nanoedit_vid=abc"));
        headers.insert("x-forwarded-for", HeaderValue::from_static("10.0.0.1"));
        let jar = CookieJar::from_headers(&headers);

        assert_eq!(resolve_visitor(&jar, &headers, None), VisitorId("abc".into()));
    }

    #[test]
    fn test_first_forwarded_address_is_used_without_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.7, 10.0.0.1"));
        let jar = CookieJar::from_headers(&headers);
        let peer: SocketAddr = "127.0.0.1:4000".parse().unwrap();

        assert_eq!(
            resolve_visitor(&jar, &headers, Some(peer)),
            VisitorId("ip-203.0.113.7".into())
        );
    }

    #[test]
    fn test_peer_address_is_the_fallback() {
        let headers = HeaderMap::new();
        let jar = CookieJar::from_headers(&headers);
        let peer: SocketAddr = "192.0.2.5:4000".parse().unwrap();

        assert_eq!(
            resolve_visitor(&jar, &headers, Some(peer)),
            VisitorId("ip-192.0.2.5".into())
        );
    }
}
