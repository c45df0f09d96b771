use crate::{feedback::upload::ImageAttachment, integrations::github::NewIssue};

pub const TITLE_PREFIX: &str = "[FEEDBACK] ";
pub const TITLE_MAX_CHARS: usize = 100;
pub const NO_IMAGE: &str = "no image attached";

/// Everything the issue body is assembled from.
#[derive(Debug)]
pub struct IssueDraft<'a> {
    pub text: &'a str,
    pub title: Option<&'a str>,
    pub labels: &'a [String],
    pub image: &'a ImageAttachment,
    pub image_width: u32,
    pub package_info: Option<String>,
    pub device_info: Option<String>,
    pub extra_data: Option<&'a str>,
}

pub fn default_title(text: &str) -> String {
    let head: String = text.chars().take(TITLE_MAX_CHARS).collect();
    format!("{TITLE_PREFIX}{head}")
}

fn image_section(image: &ImageAttachment, width: u32) -> String {
    match image.url() {
        Some(url) => format!("<img src=\"{url}\" width=\"{width}\" />"),
        None => NO_IMAGE.to_string(),
    }
}

fn block_section(heading: &str, block: Option<&str>) -> String {
    match block {
        Some(block) if !block.is_empty() => format!("\n\n### {heading}\n```\n{block}\n```"),
        _ => String::new(),
    }
}

fn extra_section(extra: Option<&str>) -> String {
    match extra {
        Some(extra) if !extra.is_empty() => format!("\n\n### Extra data\n{extra}"),
        _ => String::new(),
    }
}

/// Sections that are disabled or empty still leave their separators behind.
pub fn compose_body(draft: &IssueDraft<'_>) -> String {
    format!(
        "{} \n\n {} {} {} {}",
        draft.text,
        image_section(draft.image, draft.image_width),
        block_section("Package info", draft.package_info.as_deref()),
        block_section("Device info", draft.device_info.as_deref()),
        extra_section(draft.extra_data),
    )
}

pub fn compose(draft: &IssueDraft<'_>) -> NewIssue {
    let title = match draft.title.map(str::trim) {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => default_title(draft.text),
    };

    NewIssue {
        title,
        body: compose_body(draft),
        labels: draft.labels.to_vec(),
    }
}
