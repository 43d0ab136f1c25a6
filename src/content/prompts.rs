use crate::models::{GalleryExample, PromptTemplate};

pub static PROMPT_TEMPLATES: &[PromptTemplate] = &[
    PromptTemplate {
        id: "bg-studio-white",
        category: "background",
        text: "Replace the background with a seamless white studio backdrop and a soft contact shadow",
        tags: &["ecommerce", "product"],
    },
    PromptTemplate {
        id: "bg-sunset-beach",
        category: "background",
        text: "Place the subject on a beach at sunset with warm backlight",
        tags: &["travel", "portrait"],
    },
    PromptTemplate {
        id: "light-golden-hour",
        category: "lighting",
        text: "Relight the scene as golden hour, long soft shadows, warm tones",
        tags: &["mood"],
    },
    PromptTemplate {
        id: "style-watercolor",
        category: "style",
        text: "Turn this photo into a loose watercolor painting on textured paper",
        tags: &["art"],
    },
    PromptTemplate {
        id: "restore-old-photo",
        category: "restoration",
        text: "Restore this old photo: remove scratches and dust, fix faded colors, keep faces unchanged",
        tags: &["family", "archive"],
    },
    PromptTemplate {
        id: "object-remove",
        category: "cleanup",
        text: "Remove the people in the background and fill the area naturally",
        tags: &["travel"],
    },
];

pub static GALLERY: &[GalleryExample] = &[
    GalleryExample {
        id: "sneaker-studio",
        category: "product",
        title: "Sneaker on studio white",
        text: "Replace the background with a seamless white studio backdrop and a soft contact shadow",
        image_url: "/static/gallery/sneaker-studio.jpg",
        tags: &["ecommerce"],
    },
    GalleryExample {
        id: "portrait-golden-hour",
        category: "portrait",
        title: "Portrait relit at golden hour",
        text: "Relight the scene as golden hour, long soft shadows, warm tones",
        image_url: "/static/gallery/portrait-golden-hour.jpg",
        tags: &["lighting"],
    },
    GalleryExample {
        id: "living-room-staging",
        category: "interior",
        title: "Virtually staged living room",
        text: "Furnish this empty living room in Scandinavian style with natural daylight",
        image_url: "/static/gallery/living-room-staging.jpg",
        tags: &["real estate"],
    },
];

pub fn prompt_categories() -> Vec<&'static str> {
    let mut categories: Vec<&'static str> = PROMPT_TEMPLATES.iter().map(|t| t.category).collect();
    categories.sort_unstable();
    categories.dedup();
    categories
}

pub fn prompts_in(category: Option<&str>) -> Vec<&'static PromptTemplate> {
    PROMPT_TEMPLATES
        .iter()
        .filter(|t| category.map_or(true, |c| t.category == c))
        .collect()
}
