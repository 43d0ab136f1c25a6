use serde::Deserialize;

use super::task::SubmitRequest;

// Editor form; image references arrive one URL per line
#[derive(Debug, Clone, Deserialize, Default)]
pub struct GenerateForm {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub image_urls: String,
    #[serde(default)]
    pub aspect_ratio: String,
    #[serde(default)]
    pub resolution: String,
    #[serde(default)]
    pub output_format: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct CategoryQuery {
    pub category: Option<String>,
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl GenerateForm {
    /// Prompt is passed through as typed; the backend owns validation.
    pub fn into_request(self) -> SubmitRequest {
        let images: Vec<String> = self
            .image_urls
            .lines()
            .filter_map(non_empty)
            .collect();

        SubmitRequest {
            prompt: self.prompt,
            image_input: (!images.is_empty()).then_some(images),
            aspect_ratio: non_empty(&self.aspect_ratio),
            resolution: non_empty(&self.resolution),
            output_format: non_empty(&self.output_format),
        }
    }
}
