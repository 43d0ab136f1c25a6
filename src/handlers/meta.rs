use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};
use crate::sitemap;
use crate::state::AppState;

pub async fn serve_sitemap(State(state): State<AppState>) -> impl IntoResponse {
    let entries = sitemap::entries(&state.config.site.base_url);
    tracing::debug!("Serving sitemap with {} URLs", entries.len());
    (
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        sitemap::render(&entries),
    )
}

pub async fn serve_robots(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        sitemap::robots_txt(&state.config.site.base_url),
    )
}
