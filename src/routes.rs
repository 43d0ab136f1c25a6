use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{limit::RequestBodyLimitLayer, services::ServeDir};
use crate::handlers;
use crate::middleware::track_page_views;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let static_dir = state.config.site.static_dir.clone();
    let max_upload = state.config.upload.max_file_size;

    Router::new()
        // Marketing pages
        .route("/", get(handlers::serve_home))
        .route("/blog", get(handlers::serve_blog))
        .route("/blog/:slug", get(handlers::serve_blog_post))
        .route("/case-studies", get(handlers::serve_case_studies))
        .route("/case-studies/:slug", get(handlers::serve_case_study))
        .route("/faq", get(handlers::serve_faq))
        .route("/tutorials", get(handlers::serve_tutorials))
        .route("/tutorials/:slug", get(handlers::serve_tutorial))
        .route("/how-to", get(handlers::serve_how_to))
        .route("/how-to/:slug", get(handlers::serve_how_to_guide))
        .route("/prompts", get(handlers::serve_prompts))
        .route("/gallery", get(handlers::serve_gallery))

        // Editor and generation tasks
        .route("/editor", get(handlers::serve_editor).post(handlers::submit_generation))
        .route("/editor/quick", post(handlers::quick_generate))
        .route("/editor/task/:task_id", get(handlers::view_task))
        .route("/editor/task/:task_id/status", get(handlers::task_status))
        .route("/editor/task/:task_id/notifications", get(handlers::drain_notifications))

        // Crawlers
        .route("/sitemap.xml", get(handlers::serve_sitemap))
        .route("/robots.txt", get(handlers::serve_robots))

        // Static files
        .nest_service("/static", ServeDir::new(static_dir))

        .layer(from_fn_with_state(state.clone(), track_page_views))

        // Upload limits from config
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_upload))

        .with_state(state)
}
