use std::time::Duration;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{multipart, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use crate::errors::{ClientError, ClientResult};
use crate::models::{
    ApiEnvelope, GenerationTask, ImageResult, SubmitRequest, SubmitResponse, TaskBody,
    TaskListBody,
};
use super::poller::TaskSource;
use super::retry::{retry_fixed, RetryPolicy};

/// HTTP client for the local generation backend.
#[derive(Clone)]
pub struct GenerationClient {
    http: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
}

impl GenerationClient {
    pub fn new(base_url: &str, timeout: Duration, retry: RetryPolicy) -> ClientResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // Validation is the backend's; rejections come back as ClientError::Backend
    pub async fn submit(&self, request: &SubmitRequest) -> ClientResult<SubmitResponse> {
        tracing::debug!("Submitting generation task ({} chars)", request.prompt.len());

        let response = self
            .http
            .post(self.url("/api/kie/generate"))
            .json(request)
            .send()
            .await?;

        let submitted: SubmitResponse = read_envelope(response)
            .await
            .map_err(surface_backend_message)?;

        tracing::info!("Submitted task {} ({})", submitted.task_id, submitted.id);
        Ok(submitted)
    }

    pub async fn get_task(&self, task_id: &str) -> ClientResult<GenerationTask> {
        let url = self.url(&format!("/api/kie/task/{}", urlencoding::encode(task_id)));
        let (http, url) = (&self.http, url.as_str());
        let body: TaskBody = retry_fixed(&self.retry, move || async move {
            let response = http.get(url).send().await?;
            read_envelope(response).await
        })
        .await?;

        tracing::trace!("Task {} is {}", task_id, body.task.state.as_str());
        Ok(body.task)
    }

    pub async fn list_tasks(&self) -> ClientResult<Vec<GenerationTask>> {
        let url = self.url("/api/kie/tasks");
        let (http, url) = (&self.http, url.as_str());
        let body: TaskListBody = retry_fixed(&self.retry, move || async move {
            let response = http.get(url).send().await?;
            read_envelope(response).await
        })
        .await?;

        Ok(body.tasks)
    }

    pub async fn generate_image(
        &self,
        image: Bytes,
        filename: &str,
        content_type: &str,
        prompt: &str,
    ) -> ClientResult<String> {
        let part = multipart::Part::bytes(image.to_vec())
            .file_name(filename.to_string())
            .mime_str(content_type)?;
        let form = multipart::Form::new()
            .part("image", part)
            .text("prompt", prompt.to_string());

        let response = self
            .http
            .post(self.url("/api/generate-image"))
            .multipart(form)
            .send()
            .await?;

        read_image_result(response).await
    }

    pub async fn generate_image_text(&self, prompt: &str) -> ClientResult<String> {
        let response = self
            .http
            .post(self.url("/api/generate-image-text"))
            .json(&json!({ "prompt": prompt }))
            .send()
            .await?;

        read_image_result(response).await
    }
}

#[async_trait]
impl TaskSource for GenerationClient {
    async fn fetch_task(&self, task_id: &str) -> ClientResult<GenerationTask> {
        self.get_task(task_id).await
    }
}

// Submission is not retried, so a 5xx carrying a message is shown as-is
fn surface_backend_message(err: ClientError) -> ClientError {
    match err {
        ClientError::Unavailable { status, message } if !message.is_empty() => {
            ClientError::Backend { status, message }
        }
        other => other,
    }
}

fn error_message(status: StatusCode, text: &str) -> String {
    serde_json::from_str::<serde_json::Value>(text)
        .ok()
        .and_then(|value| value.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        })
}

async fn read_envelope<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    let text = response.text().await?;

    if status.is_server_error() {
        return Err(ClientError::Unavailable {
            status: status.as_u16(),
            message: error_message(status, &text),
        });
    }

    if !status.is_success() {
        return Err(ClientError::Backend {
            status: status.as_u16(),
            message: error_message(status, &text),
        });
    }

    let envelope: ApiEnvelope<T> =
        serde_json::from_str(&text).map_err(|e| ClientError::Decode(e.to_string()))?;

    if !envelope.success {
        return Err(ClientError::Backend {
            status: status.as_u16(),
            message: envelope
                .error
                .unwrap_or_else(|| "Request failed".to_string()),
        });
    }

    envelope
        .data
        .ok_or_else(|| ClientError::Decode("response is missing its payload".into()))
}

async fn read_image_result(response: Response) -> ClientResult<String> {
    let status = response.status();
    let text = response.text().await?;

    let result: ImageResult = serde_json::from_str(&text).map_err(|_| ClientError::Backend {
        status: status.as_u16(),
        message: error_message(status, &text),
    })?;

    match (result.success, result.image_url) {
        (true, Some(url)) => Ok(url),
        _ => Err(ClientError::Backend {
            status: status.as_u16(),
            message: result
                .error
                .unwrap_or_else(|| "Image generation failed".to_string()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use axum::{
        extract::{Multipart, Path, State},
        http::StatusCode as AxumStatus,
        response::IntoResponse,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::Value;
    use crate::models::TaskState;

    #[derive(Clone, Default)]
    struct Backend {
        task_calls: Arc<AtomicUsize>,
        // number of 503s served before the task endpoint recovers
        flaky: usize,
    }

    async fn generate(Json(body): Json<Value>) -> impl IntoResponse {
        let prompt = body["prompt"].as_str().unwrap_or_default();
        if prompt.trim().is_empty() {
            return (
                AxumStatus::BAD_REQUEST,
                Json(json!({ "success": false, "error": "Prompt is required" })),
            );
        }
        if prompt == "boom" {
            return (
                AxumStatus::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "error": "Provider quota exhausted" })),
            );
        }
        (
            AxumStatus::OK,
            Json(json!({ "success": true, "taskId": "kie-1", "id": "local-1", "state": "waiting" })),
        )
    }

    fn task_json(task_id: &str, state: &str) -> Value {
        json!({
            "id": "local-1",
            "taskId": task_id,
            "model": "google/nano-banana-edit",
            "state": state,
            "prompt": "a cat",
            "resultUrls": ["https://cdn.example.com/out.png"],
            "createdAt": "2025-01-02T03:03:57Z"
        })
    }

    async fn task(State(backend): State<Backend>, Path(task_id): Path<String>) -> impl IntoResponse {
        let call = backend.task_calls.fetch_add(1, Ordering::SeqCst);
        if call < backend.flaky {
            return (AxumStatus::SERVICE_UNAVAILABLE, Json(json!({ "error": "busy" })));
        }
        if task_id == "missing" {
            return (
                AxumStatus::NOT_FOUND,
                Json(json!({ "success": false, "error": "Task not found" })),
            );
        }
        (
            AxumStatus::OK,
            Json(json!({ "success": true, "task": task_json(&task_id, "success") })),
        )
    }

    async fn tasks() -> Json<Value> {
        Json(json!({ "success": true, "tasks": [task_json("a", "waiting"), task_json("b", "fail")] }))
    }

    async fn generate_image(mut multipart: Multipart) -> Json<Value> {
        let mut prompt = String::new();
        let mut image_len = 0;
        while let Ok(Some(field)) = multipart.next_field().await {
            match field.name().unwrap_or("") {
                "prompt" => prompt = field.text().await.unwrap_or_default(),
                "image" => image_len = field.bytes().await.map(|b| b.len()).unwrap_or(0),
                _ => {}
            }
        }
        if image_len == 0 {
            return Json(json!({ "success": false, "error": "Image is required" }));
        }
        Json(json!({ "success": true, "imageUrl": format!("https://cdn.example.com/{}.png", prompt) }))
    }

    async fn generate_image_text(Json(body): Json<Value>) -> Json<Value> {
        Json(json!({ "success": true, "imageUrl": format!("https://cdn.example.com/{}.png", body["prompt"].as_str().unwrap_or("")) }))
    }

    async fn spawn_backend(backend: Backend) -> GenerationClient {
        let app = Router::new()
            .route("/api/kie/generate", post(generate))
            .route("/api/kie/task/:task_id", get(task))
            .route("/api/kie/tasks", get(tasks))
            .route("/api/generate-image", post(generate_image))
            .route("/api/generate-image-text", post(generate_image_text))
            .with_state(backend);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        GenerationClient::new(
            &format!("http://{}/", addr),
            Duration::from_secs(5),
            RetryPolicy {
                max_retries: 3,
                delay: Duration::from_millis(5),
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_submit_returns_task_id() {
        let client = spawn_backend(Backend::default()).await;
        let submitted = client
            .submit(&SubmitRequest {
                prompt: "a cat".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(submitted.task_id, "kie-1");
        assert_eq!(submitted.state, TaskState::Waiting);
    }

    #[tokio::test]
    async fn test_empty_prompt_surfaces_backend_message_unchanged() {
        let client = spawn_backend(Backend::default()).await;
        let err = client.submit(&SubmitRequest::default()).await.unwrap_err();

        assert!(matches!(err, ClientError::Backend { status: 400, .. }));
        assert_eq!(err.user_message(), "Prompt is required");
    }

    #[tokio::test]
    async fn test_submit_server_error_keeps_message() {
        let client = spawn_backend(Backend::default()).await;
        let err = client
            .submit(&SubmitRequest {
                prompt: "boom".into(),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), "Provider quota exhausted");
    }

    #[tokio::test]
    async fn test_get_task_retries_transient_failures() {
        let backend = Backend {
            flaky: 2,
            ..Default::default()
        };
        let calls = backend.task_calls.clone();
        let client = spawn_backend(backend).await;

        let task = client.get_task("kie-1").await.unwrap();
        assert_eq!(task.state, TaskState::Success);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_get_task_gives_up_after_retries() {
        let backend = Backend {
            flaky: 10,
            ..Default::default()
        };
        let calls = backend.task_calls.clone();
        let client = spawn_backend(backend).await;

        let err = client.get_task("kie-1").await.unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_missing_task_is_not_retried() {
        let backend = Backend::default();
        let calls = backend.task_calls.clone();
        let client = spawn_backend(backend).await;

        let err = client.get_task("missing").await.unwrap_err();
        assert_eq!(err.to_string(), "Task not found");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_list_tasks() {
        let client = spawn_backend(Backend::default()).await;
        let tasks = client.list_tasks().await.unwrap();

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[1].state, TaskState::Fail);
    }

    #[tokio::test]
    async fn test_legacy_endpoints() {
        let client = spawn_backend(Backend::default()).await;

        let url = client
            .generate_image(Bytes::from_static(b"\x89PNG"), "in.png", "image/png", "sunset")
            .await
            .unwrap();
        assert_eq!(url, "https://cdn.example.com/sunset.png");

        let err = client
            .generate_image(Bytes::new(), "in.png", "image/png", "sunset")
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Image is required");

        let url = client.generate_image_text("forest").await.unwrap();
        assert_eq!(url, "https://cdn.example.com/forest.png");
    }
}
