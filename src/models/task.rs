use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

// Lifecycle of a generation task as reported by the provider
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    Waiting,
    Success,
    Fail,
}

impl TaskState {
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskState::Success | TaskState::Fail)
    }

    /// States only move forward: waiting may become anything,
    /// a terminal state may only repeat itself.
    pub fn can_transition_to(self, next: TaskState) -> bool {
        self == TaskState::Waiting || self == next
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TaskState::Waiting => "waiting",
            TaskState::Success => "success",
            TaskState::Fail => "fail",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfig {
    pub aspect_ratio: Option<String>,
    pub resolution: Option<String>,
    pub output_format: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationTask {
    pub id: String,
    pub task_id: String,
    #[serde(default)]
    pub model: String,
    pub state: TaskState,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub image_input: Vec<String>,
    #[serde(flatten)]
    pub output: OutputConfig,
    #[serde(default)]
    pub result_urls: Vec<String>,
    pub fail_code: Option<String>,
    pub fail_msg: Option<String>,
    pub cost_time_ms: Option<u64>,
    pub complete_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl GenerationTask {
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }
}

// Body of POST /api/kie/generate
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_input: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_format: Option<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub task_id: String,
    pub id: String,
    pub state: TaskState,
}

// Envelope shared by every backend answer; `error` is set when success is false
#[derive(Deserialize, Debug)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub error: Option<String>,
    #[serde(flatten)]
    pub data: Option<T>,
}

#[derive(Deserialize, Debug)]
pub struct TaskBody {
    pub task: GenerationTask,
}

#[derive(Deserialize, Debug)]
pub struct TaskListBody {
    pub tasks: Vec<GenerationTask>,
}

// Answer of the legacy single-shot endpoints
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageResult {
    pub success: bool,
    pub image_url: Option<String>,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_terminal_states() {
        assert!(!TaskState::Waiting.is_terminal());
        assert!(TaskState::Success.is_terminal());
        assert!(TaskState::Fail.is_terminal());
    }

    #[test]
    fn test_transitions_are_monotonic() {
        assert!(TaskState::Waiting.can_transition_to(TaskState::Waiting));
        assert!(TaskState::Waiting.can_transition_to(TaskState::Success));
        assert!(TaskState::Waiting.can_transition_to(TaskState::Fail));
        assert!(TaskState::Success.can_transition_to(TaskState::Success));
        assert!(!TaskState::Success.can_transition_to(TaskState::Waiting));
        assert!(!TaskState::Fail.can_transition_to(TaskState::Success));
    }

    #[test]
    fn test_task_from_backend_json() {
        let task: GenerationTask = serde_json::from_value(json!({
            "id": "local-1",
            "taskId": "kie-abc",
            "model": "google/nano-banana-edit",
            "state": "success",
            "prompt": "make the sky purple",
            "imageInput": ["https://cdn.example.com/in.png"],
            "aspectRatio": "16:9",
            "resolution": "2K",
            "outputFormat": "png",
            "resultUrls": ["https://cdn.example.com/out.png"],
            "failCode": null,
            "failMsg": null,
            "costTimeMs": 8200,
            "completeTime": "2025-01-02T03:04:05Z",
            "createdAt": "2025-01-02T03:03:57Z"
        }))
        .unwrap();

        assert_eq!(task.task_id, "kie-abc");
        assert_eq!(task.state, TaskState::Success);
        assert_eq!(task.output.aspect_ratio.as_deref(), Some("16:9"));
        assert_eq!(task.result_urls.len(), 1);
        assert!(task.is_terminal());
    }

    #[test]
    fn test_submit_request_omits_unset_fields() {
        let body = serde_json::to_value(SubmitRequest {
            prompt: "a cat".into(),
            aspect_ratio: Some("1:1".into()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(body, json!({ "prompt": "a cat", "aspectRatio": "1:1" }));
    }

    #[test]
    fn test_error_envelope() {
        let envelope: ApiEnvelope<SubmitResponse> = serde_json::from_value(json!({
            "success": false,
            "error": "Prompt is required"
        }))
        .unwrap();

        assert!(!envelope.success);
        assert!(envelope.data.is_none());
        assert_eq!(envelope.error.as_deref(), Some("Prompt is required"));
    }
}
