pub mod analytics;
pub mod client;
pub mod config;
pub mod content;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod notifications;
pub mod render;
pub mod routes;
pub mod seo;
pub mod services;
pub mod sitemap;
pub mod state;
