mod content;
mod forms;
mod seo;
mod task;

pub use content::{BlogPost, CaseStudy, FaqEntry, GalleryExample, Guide, PromptTemplate};
pub use forms::{CategoryQuery, GenerateForm};
pub use seo::{ContentType, SeoConfig};
pub use task::{
    ApiEnvelope, GenerationTask, ImageResult, OutputConfig, SubmitRequest, SubmitResponse,
    TaskBody, TaskListBody, TaskState,
};
