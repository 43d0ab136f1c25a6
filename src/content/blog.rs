use crate::models::BlogPost;

pub static BLOG_POSTS: &[BlogPost] = &[
    BlogPost {
        slug: "edit-photos-with-text-prompts",
        title: "How to Edit Photos with Text Prompts",
        summary: "Describe the change you want in plain words and let the model do the masking, relighting and blending.",
        published: "2025-08-12",
        author: "NanoEdit Team",
        body: &[
            "Traditional photo editors ask you to select, mask and adjust. Prompt-based editing flips that around: you describe the result and the model works out which pixels to touch.",
            "Start with a clear subject and a single change. \"Replace the grey sky with a warm sunset\" works better than a list of five unrelated edits.",
            "When a result is close but not quite right, keep the same image and refine the prompt instead of starting over. Small wording changes often fix lighting or color mismatches.",
        ],
    },
    BlogPost {
        slug: "product-photos-for-ecommerce",
        title: "Studio-Quality Product Photos Without a Studio",
        summary: "Turn phone snapshots into clean catalog images with consistent backgrounds and shadows.",
        published: "2025-09-03",
        author: "NanoEdit Team",
        body: &[
            "Online shoppers decide in seconds, and inconsistent product photos cost conversions. A uniform background across a catalog makes a store look established.",
            "Upload the product shot, then ask for \"a seamless white studio background with a soft contact shadow\". Keep the same prompt for every item to get a consistent set.",
            "For lifestyle shots, describe the scene rather than the product: \"on a marble kitchen counter in morning light\".",
        ],
    },
    BlogPost {
        slug: "consistent-characters-across-images",
        title: "Keeping Characters Consistent Across Images",
        summary: "Use reference images to keep faces, outfits and styles stable across a whole series.",
        published: "2025-10-01",
        author: "NanoEdit Team",
        body: &[
            "Storyboards, comics and ad campaigns need the same character in many scenes. Passing one or more reference images keeps identity stable between generations.",
            "Mention what must stay fixed (\"same face and red jacket\") and what should change (\"now standing in a snowy street\").",
        ],
    },
];

pub fn find_post(slug: &str) -> Option<&'static BlogPost> {
    BLOG_POSTS.iter().find(|post| post.slug == slug)
}
