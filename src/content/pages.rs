use crate::models::{CaseStudy, FaqEntry, Guide};

pub static CASE_STUDIES: &[CaseStudy] = &[
    CaseStudy {
        slug: "boutique-fashion-catalog",
        customer: "Linen & Loom",
        title: "A boutique fashion label reshoots its catalog in an afternoon",
        summary: "Linen & Loom replaced a two-day studio shoot with prompt-based background and lighting edits.",
        results: &["300 product images updated in 4 hours", "38% lower photography spend", "Consistent look across the whole season"],
        body: &[
            "The team photographed every garment on a phone against a plain wall, then applied one shared background prompt to the full set.",
            "Seasonal campaigns now reuse the same catalog photos with new scenes instead of new shoots.",
        ],
    },
    CaseStudy {
        slug: "real-estate-virtual-staging",
        customer: "Harbor Realty",
        title: "Virtual staging for empty listings",
        summary: "Harbor Realty stages empty rooms with furniture and daylight edits before listing.",
        results: &["Listings staged same day", "21% more inquiries on staged listings"],
        body: &[
            "Agents upload the bare room photo and describe the style buyers in that area expect.",
            "Each staged image is labelled as virtually staged in the listing, next to the original photo.",
        ],
    },
];

pub static FAQ: &[FaqEntry] = &[
    FaqEntry {
        question: "What can I edit with NanoEdit?",
        answer: "Backgrounds, lighting, colors, objects, clothing and styles. Describe the change in plain language and optionally attach reference images.",
    },
    FaqEntry {
        question: "How long does a generation take?",
        answer: "Most edits finish in 10 to 30 seconds. The editor checks progress every two seconds and lets you know as soon as the image is ready.",
    },
    FaqEntry {
        question: "Which output formats are supported?",
        answer: "PNG and JPEG, at 1K, 2K or 4K resolution, in square, portrait or landscape aspect ratios.",
    },
    FaqEntry {
        question: "Do you keep my images?",
        answer: "Uploaded images are used only to produce your edit. Results stay private unless you choose to share them in the gallery.",
    },
    FaqEntry {
        question: "What happens if a generation fails?",
        answer: "You will see the reason reported by the model, and you can adjust your prompt and submit again. Failed generations are not charged.",
    },
];

pub static TUTORIALS: &[Guide] = &[
    Guide {
        slug: "first-edit",
        title: "Your First Edit in Five Minutes",
        summary: "A guided walk through uploading a photo, writing a prompt and downloading the result.",
        steps: &[
            "Open the editor and paste the link of the image you want to change.",
            "Write one sentence describing the change, for example \"make it look like golden hour\".",
            "Pick an aspect ratio and output format, then press Generate.",
            "Wait for the ready notification and download the result.",
        ],
    },
    Guide {
        slug: "reference-images",
        title: "Working with Reference Images",
        summary: "Combine several images to transfer style, outfits or objects.",
        steps: &[
            "Add the main photo as the first image link.",
            "Add up to four reference images, one link per line.",
            "Say which element to take from which image, for example \"use the jacket from the second image\".",
        ],
    },
];

pub static HOW_TO_GUIDES: &[Guide] = &[
    Guide {
        slug: "remove-background",
        title: "How to Remove or Replace a Background",
        summary: "Clean cut-outs and new scenes from a single prompt.",
        steps: &[
            "Upload a photo with a clearly visible subject.",
            "Prompt \"replace the background with a plain white studio backdrop\" or describe a new scene.",
            "Choose PNG output if you need a clean edge for further design work.",
        ],
    },
    Guide {
        slug: "restore-old-photos",
        title: "How to Restore Old Photos",
        summary: "Repair scratches, fix faded colors and sharpen details.",
        steps: &[
            "Scan or photograph the print in even light.",
            "Prompt \"restore this photo: remove scratches and dust, fix faded colors, keep faces unchanged\".",
            "Compare with the original and refine the prompt if faces changed.",
        ],
    },
];

pub fn find_case_study(slug: &str) -> Option<&'static CaseStudy> {
    CASE_STUDIES.iter().find(|study| study.slug == slug)
}

pub fn find_tutorial(slug: &str) -> Option<&'static Guide> {
    TUTORIALS.iter().find(|guide| guide.slug == slug)
}

pub fn find_how_to(slug: &str) -> Option<&'static Guide> {
    HOW_TO_GUIDES.iter().find(|guide| guide.slug == slug)
}
