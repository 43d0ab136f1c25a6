use axum::{
    extract::{Extension, Form, Multipart, Path, State, multipart::Field},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Redirect, Response},
};
use bytes::Bytes;
use serde_json::json;
use crate::content::{Page, PROMPT_TEMPLATES};
use crate::errors::{AppError, AppResult, ClientError};
use crate::models::{GenerateForm, GenerationTask, TaskState};
use crate::middleware::VisitorId;
use crate::render::escape_html;
use crate::state::AppState;

const ASPECT_RATIOS: &[&str] = &["1:1", "3:4", "4:3", "9:16", "16:9"];
const RESOLUTIONS: &[&str] = &["1K", "2K", "4K"];
const OUTPUT_FORMATS: &[&str] = &["png", "jpeg"];

fn options(values: &[&str], selected: &str) -> String {
    std::iter::once(r#"<option value="">Default</option>"#.to_string())
        .chain(values.iter().map(|v| {
            format!(
                r#"<option value="{0}"{1}>{0}</option>"#,
                escape_html(v),
                if *v == selected { " selected" } else { "" }
            )
        }))
        .collect()
}

fn recent_tasks_html(tasks: &[GenerationTask]) -> String {
    if tasks.is_empty() {
        return "<p>No generations yet.</p>".to_string();
    }
    let rows = tasks
        .iter()
        .take(10)
        .map(|task| {
            format!(
                r#"<tr><td><a href="/editor/task/{}">{}</a></td><td>{}</td><td>{}</td></tr>"#,
                urlencoding::encode(&task.task_id),
                escape_html(&task.prompt),
                task.state.as_str(),
                task.created_at.format("%Y-%m-%d %H:%M:%S")
            )
        })
        .collect::<String>();
    format!("<table class=\"tasks\"><tr><th>Prompt</th><th>State</th><th>Created</th></tr>{}</table>", rows)
}

async fn render_editor(
    state: &AppState,
    form: &GenerateForm,
    error: Option<&str>,
) -> AppResult<Html<String>> {
    let template = state.template("editor.html")?;

    // The recent list is decoration; the page still works without the backend
    let recent = match state.client.list_tasks().await {
        Ok(tasks) => recent_tasks_html(&tasks),
        Err(e) => {
            tracing::warn!("Could not load recent tasks: {}", e);
            String::new()
        }
    };

    let prompt_options = PROMPT_TEMPLATES
        .iter()
        .map(|t| format!(r#"<option value="{0}">{0}</option>"#, escape_html(t.text)))
        .collect::<String>();

    let error_html = error
        .map(|message| format!(r#"<div class="toast error" role="alert">{}</div>"#, escape_html(message)))
        .unwrap_or_default();

    // Fixed markup first, then the fields carrying user text
    let body = template
        .replace("{{prompt_templates}}", &prompt_options)
        .replace("{{aspect_ratios}}", &options(ASPECT_RATIOS, &form.aspect_ratio))
        .replace("{{resolutions}}", &options(RESOLUTIONS, &form.resolution))
        .replace("{{output_formats}}", &options(OUTPUT_FORMATS, &form.output_format))
        .replace("{{recent_tasks}}", &recent)
        .replace("{{error}}", &error_html)
        .replace("{{image_urls}}", &escape_html(&form.image_urls))
        .replace("{{prompt}}", &escape_html(&form.prompt));

    state.render_page(Page::Editor, &body)
}

pub async fn serve_editor(State(state): State<AppState>) -> AppResult<Html<String>> {
    tracing::info!("Serving editor page");
    render_editor(&state, &GenerateForm::default(), None).await
}

pub async fn submit_generation(
    State(state): State<AppState>,
    Extension(visitor): Extension<VisitorId>,
    Form(form): Form<GenerateForm>,
) -> AppResult<Response> {
    let request = form.clone().into_request();

    match state.client.submit(&request).await {
        Ok(submitted) => {
            state.tracker.event(
                &visitor.0,
                "generation_submitted",
                &json!({ "task_id": submitted.task_id, "images": request.image_input.as_ref().map_or(0, Vec::len) }),
            );
            state.watcher.watch(&submitted.task_id);
            tracing::info!("Redirecting to task {}", submitted.task_id);
            Ok(Redirect::to(&format!(
                "/editor/task/{}",
                urlencoding::encode(&submitted.task_id)
            ))
            .into_response())
        }
        Err(e) => {
            tracing::warn!("Generation submit failed: {}", e);
            let message = e.user_message();

            let status = match &e {
                ClientError::Backend { status, .. } => {
                    StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_REQUEST)
                }
                _ => StatusCode::BAD_GATEWAY,
            };
            let page = render_editor(&state, &form, Some(&message)).await?;
            Ok((status, page).into_response())
        }
    }
}

// Last state seen by a running watch, or a direct fetch otherwise
async fn current_task(state: &AppState, task_id: &str) -> AppResult<GenerationTask> {
    if let Some(task) = state.watcher.last_seen(task_id) {
        if task.is_terminal() || state.watcher.is_watching(task_id) {
            return Ok(task);
        }
    }

    let task = state.client.get_task(task_id).await.map_err(|e| match e {
        ClientError::Backend { status: 404, .. } => AppError::NotFound(format!("task {}", task_id)),
        other => AppError::Client(other),
    })?;
    state.watcher.remember(task.clone());
    if !task.is_terminal() {
        state.watcher.watch(task_id);
    }
    Ok(task)
}

fn task_result_html(task: &GenerationTask) -> String {
    match task.state {
        TaskState::Waiting => {
            r#"<p class="waiting">Your image is being generated. This page updates automatically.</p>"#.to_string()
        }
        TaskState::Success => task
            .result_urls
            .iter()
            .map(|url| {
                format!(
                    r#"<figure><img src="{0}" alt="Generated image"><a class="button" href="{0}" download>Download</a></figure>"#,
                    escape_html(url)
                )
            })
            .collect(),
        TaskState::Fail => format!(
            r#"<div class="toast error" role="alert">{}{}</div><a class="button" href="/editor">Try again</a>"#,
            escape_html(task.fail_msg.as_deref().unwrap_or("Generation failed")),
            task.fail_code
                .as_deref()
                .map(|code| format!(" ({})", escape_html(code)))
                .unwrap_or_default()
        ),
    }
}

pub async fn view_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> AppResult<Html<String>> {
    tracing::info!("Viewing task: {}", task_id);
    let task = current_task(&state, &task_id).await?;

    let template = state.template("task.html")?;
    let body = template
        .replace("{{state}}", task.state.as_str())
        .replace("{{result}}", &task_result_html(&task))
        .replace("{{task_path}}", &urlencoding::encode(&task.task_id))
        .replace("{{task_id}}", &escape_html(&task.task_id))
        .replace("{{prompt}}", &escape_html(&task.prompt));

    let mut seo = Page::Editor.seo(&state.config.site);
    seo.title = format!("Generation {} | {}", task.task_id, state.config.site.name);
    state.render_with_seo(&seo, &body, false)
}

pub async fn task_status(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> AppResult<Json<GenerationTask>> {
    tracing::debug!("Checking status for task: {}", task_id);
    let task = current_task(&state, &task_id).await?;
    Ok(Json(task))
}

pub async fn drain_notifications(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Json<serde_json::Value> {
    Json(json!({ "notifications": state.feed().drain(&task_id) }))
}

// Helper struct to hold form data during the quick-edit upload
#[derive(Default)]
struct QuickEdit {
    prompt: String,
    image: Option<(Bytes, String, String)>,
}

// Helper function to read the quick-edit multipart form
async fn read_quick_edit(multipart: &mut Multipart) -> AppResult<QuickEdit> {
    let mut data = QuickEdit::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::error!("Failed to get next field from multipart form: {}", e);
        AppError::Form(format!("Failed to process form field: {}", e))
    })? {
        match field.name().unwrap_or("") {
            "prompt" => {
                data.prompt = field
                    .text()
                    .await
                    .map_err(|e| AppError::Form(format!("Failed to read prompt: {}", e)))?;
            }
            "image" => {
                data.image = read_image_field(field).await?;
            }
            field_name => {
                tracing::warn!("Unexpected form field: {}", field_name);
            }
        }
    }

    Ok(data)
}

// Empty file inputs arrive as a field with no bytes
async fn read_image_field(field: Field<'_>) -> AppResult<Option<(Bytes, String, String)>> {
    let filename = field.file_name().unwrap_or("image.png").to_string();
    let content_type = field.content_type().unwrap_or("image/png").to_string();
    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::Form(format!("Failed to read image: {}", e)))?;

    tracing::debug!("Received image {} ({} bytes)", filename, bytes.len());
    Ok((!bytes.is_empty()).then_some((bytes, filename, content_type)))
}

/// Single-shot edit without task polling; blocks until the backend answers.
pub async fn quick_generate(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Response> {
    let data = read_quick_edit(&mut multipart).await?;

    let result = match data.image {
        Some((bytes, filename, content_type)) => {
            state
                .client
                .generate_image(bytes, &filename, &content_type, &data.prompt)
                .await
        }
        None => state.client.generate_image_text(&data.prompt).await,
    };

    let body = match result {
        Ok(url) => format!(
            r#"<h1>Your image</h1><figure><img src="{0}" alt="Generated image"><a class="button" href="{0}" download>Download</a></figure>"#,
            escape_html(&url)
        ),
        Err(e) => {
            tracing::warn!("Quick generation failed: {}", e);
            let page = render_editor(
                &state,
                &GenerateForm {
                    prompt: data.prompt,
                    ..Default::default()
                },
                Some(&e.user_message()),
            )
            .await?;
            return Ok((StatusCode::BAD_REQUEST, page).into_response());
        }
    };

    Ok(state.render_page(Page::Editor, &body)?.into_response())
}
