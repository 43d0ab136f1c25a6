use axum::{
    extract::{Path, Query, State},
    response::Html,
};
use crate::content::{
    find_case_study, find_how_to, find_post, find_tutorial, prompt_categories, prompts_in, Page,
    BLOG_POSTS, CASE_STUDIES, FAQ, GALLERY, HOW_TO_GUIDES, PROMPT_TEMPLATES, TUTORIALS,
};
use crate::errors::{AppError, AppResult};
use crate::models::{CategoryQuery, Guide};
use crate::render::escape_html;
use crate::state::AppState;

fn paragraphs(body: &[&str]) -> String {
    body.iter()
        .map(|p| format!("<p>{}</p>", escape_html(p)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn card(href: &str, title: &str, summary: &str) -> String {
    format!(
        r#"<article class="card"><h3><a href="{}">{}</a></h3><p>{}</p></article>"#,
        escape_html(href),
        escape_html(title),
        escape_html(summary)
    )
}

pub async fn serve_home(State(state): State<AppState>) -> AppResult<Html<String>> {
    tracing::debug!("Serving home page");

    let examples = GALLERY
        .iter()
        .take(3)
        .map(|example| {
            format!(
                r#"<figure><img src="{}" alt="{}" loading="lazy"><figcaption>{}</figcaption></figure>"#,
                escape_html(example.image_url),
                escape_html(example.title),
                escape_html(example.text)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let posts = BLOG_POSTS
        .iter()
        .take(2)
        .map(|post| card(&Page::BlogPost(post).path(), post.title, post.summary))
        .collect::<Vec<_>>()
        .join("\n");

    let body = format!(
        r#"<section class="hero">
    <h1>Edit photos by describing the change</h1>
    <p>Replace backgrounds, relight scenes and restyle images with one sentence.</p>
    <a class="button" href="/editor">Open the editor</a>
</section>
<section class="examples">{}</section>
<section class="latest"><h2>From the blog</h2>{}</section>"#,
        examples, posts
    );

    state.render_page(Page::Home, &body)
}

pub async fn serve_blog(State(state): State<AppState>) -> AppResult<Html<String>> {
    let cards = BLOG_POSTS
        .iter()
        .map(|post| card(&Page::BlogPost(post).path(), post.title, post.summary))
        .collect::<Vec<_>>()
        .join("\n");

    state.render_page(Page::Blog, &format!("<h1>Blog</h1>\n{}", cards))
}

pub async fn serve_blog_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Html<String>> {
    let post = find_post(&slug).ok_or_else(|| {
        tracing::warn!("Blog post not found: {}", slug);
        AppError::NotFound(format!("/blog/{}", slug))
    })?;

    let body = format!(
        r#"<article class="post"><h1>{}</h1><p class="meta">{} &middot; {}</p>{}</article>"#,
        escape_html(post.title),
        escape_html(post.published),
        escape_html(post.author),
        paragraphs(post.body)
    );

    state.render_page(Page::BlogPost(post), &body)
}

pub async fn serve_case_studies(State(state): State<AppState>) -> AppResult<Html<String>> {
    let cards = CASE_STUDIES
        .iter()
        .map(|study| card(&Page::CaseStudy(study).path(), study.title, study.summary))
        .collect::<Vec<_>>()
        .join("\n");

    state.render_page(Page::CaseStudies, &format!("<h1>Case studies</h1>\n{}", cards))
}

pub async fn serve_case_study(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Html<String>> {
    let study = find_case_study(&slug)
        .ok_or_else(|| AppError::NotFound(format!("/case-studies/{}", slug)))?;

    let results = study
        .results
        .iter()
        .map(|r| format!("<li>{}</li>", escape_html(r)))
        .collect::<String>();

    let body = format!(
        r#"<article class="case-study"><p class="meta">{}</p><h1>{}</h1><ul class="results">{}</ul>{}</article>"#,
        escape_html(study.customer),
        escape_html(study.title),
        results,
        paragraphs(study.body)
    );

    state.render_page(Page::CaseStudy(study), &body)
}

pub async fn serve_faq(State(state): State<AppState>) -> AppResult<Html<String>> {
    let entries = FAQ
        .iter()
        .map(|entry| {
            format!(
                "<details><summary>{}</summary><p>{}</p></details>",
                escape_html(entry.question),
                escape_html(entry.answer)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    state.render_page(Page::Faq, &format!("<h1>Frequently asked questions</h1>\n{}", entries))
}

fn guide_index(heading: &str, guides: &'static [Guide], page: fn(&'static Guide) -> Page) -> String {
    let cards = guides
        .iter()
        .map(|guide| card(&page(guide).path(), guide.title, guide.summary))
        .collect::<Vec<_>>()
        .join("\n");
    format!("<h1>{}</h1>\n{}", escape_html(heading), cards)
}

fn guide_body(guide: &Guide) -> String {
    let steps = guide
        .steps
        .iter()
        .map(|step| format!("<li>{}</li>", escape_html(step)))
        .collect::<String>();
    format!(
        r#"<article class="guide"><h1>{}</h1><p>{}</p><ol class="steps">{}</ol><a class="button" href="/editor">Try it in the editor</a></article>"#,
        escape_html(guide.title),
        escape_html(guide.summary),
        steps
    )
}

pub async fn serve_tutorials(State(state): State<AppState>) -> AppResult<Html<String>> {
    let body = guide_index("Tutorials", TUTORIALS, Page::Tutorial);
    state.render_page(Page::Tutorials, &body)
}

pub async fn serve_tutorial(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Html<String>> {
    let guide = find_tutorial(&slug)
        .ok_or_else(|| AppError::NotFound(format!("/tutorials/{}", slug)))?;
    state.render_page(Page::Tutorial(guide), &guide_body(guide))
}

pub async fn serve_how_to(State(state): State<AppState>) -> AppResult<Html<String>> {
    let body = guide_index("How-to guides", HOW_TO_GUIDES, Page::HowToGuide);
    state.render_page(Page::HowTo, &body)
}

pub async fn serve_how_to_guide(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Html<String>> {
    let guide = find_how_to(&slug)
        .ok_or_else(|| AppError::NotFound(format!("/how-to/{}", slug)))?;
    state.render_page(Page::HowToGuide(guide), &guide_body(guide))
}

pub async fn serve_prompts(
    State(state): State<AppState>,
    Query(query): Query<CategoryQuery>,
) -> AppResult<Html<String>> {
    let selected = query.category.as_deref().filter(|c| !c.is_empty());
    tracing::debug!("Serving prompt templates, category {:?}", selected);

    let filters = std::iter::once(("All".to_string(), "/prompts".to_string(), selected.is_none()))
        .chain(prompt_categories().into_iter().map(|c| {
            (
                c.to_string(),
                format!("/prompts?category={}", urlencoding::encode(c)),
                selected == Some(c),
            )
        }))
        .map(|(label, href, active)| {
            format!(
                r#"<a class="filter{}" href="{}">{}</a>"#,
                if active { " active" } else { "" },
                escape_html(&href),
                escape_html(&label)
            )
        })
        .collect::<String>();

    let templates = prompts_in(selected);
    let items = if templates.is_empty() {
        "<p>No templates in this category yet.</p>".to_string()
    } else {
        templates
            .iter()
            .map(|t| {
                format!(
                    r#"<li class="prompt" data-id="{}"><code>{}</code> <span class="tags">{}</span> <button class="copy" data-copy="{}">Copy</button></li>"#,
                    escape_html(t.id),
                    escape_html(t.text),
                    escape_html(&t.tags.join(", ")),
                    escape_html(t.text)
                )
            })
            .collect::<String>()
    };

    let body = format!(
        r#"<h1>Prompt templates</h1><nav class="filters">{}</nav><ul class="prompts">{}</ul><p>{} templates available.</p>"#,
        filters,
        items,
        PROMPT_TEMPLATES.len()
    );
    state.render_page(Page::Prompts, &body)
}

pub async fn serve_gallery(State(state): State<AppState>) -> AppResult<Html<String>> {
    let figures = GALLERY
        .iter()
        .map(|example| {
            format!(
                r#"<figure data-category="{}"><img src="{}" alt="{}" loading="lazy"><figcaption><strong>{}</strong><br><code>{}</code></figcaption></figure>"#,
                escape_html(example.category),
                escape_html(example.image_url),
                escape_html(example.title),
                escape_html(example.title),
                escape_html(example.text)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    state.render_page(Page::Gallery, &format!("<h1>Gallery</h1><div class=\"gallery\">{}</div>", figures))
}
