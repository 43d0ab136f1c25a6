mod editor;
mod meta;
mod pages;

pub use editor::{
    drain_notifications, quick_generate, serve_editor, submit_generation, task_status, view_task,
};
pub use meta::{serve_robots, serve_sitemap};
pub use pages::{
    serve_blog, serve_blog_post, serve_case_studies, serve_case_study, serve_faq, serve_gallery,
    serve_home, serve_how_to, serve_how_to_guide, serve_prompts, serve_tutorial, serve_tutorials,
};
