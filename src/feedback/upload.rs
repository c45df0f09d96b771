use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::integrations::{
    github::{CreateFile, GithubApi},
    repository::RepositorySlug,
};

pub const COMMIT_MESSAGE: &str = "Upload feedback screenshot";
const DEFAULT_EXTENSION: &str = "png";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Screenshot {
    pub bytes: Vec<u8>,
    /// Only its extension is used.
    pub filename: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadedImage {
    pub file_name: String,
    pub path: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    NoScreenshot,
    UploadFailed(String),
}

/// Outcome of the upload step; a failed upload never aborts the submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageAttachment {
    Uploaded(UploadedImage),
    Skipped(SkipReason),
}

impl ImageAttachment {
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Uploaded(image) => Some(&image.url),
            Self::Skipped(_) => None,
        }
    }
}

fn extension(filename: &str) -> &str {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or(DEFAULT_EXTENSION)
}

pub fn raw_url(repo: &RepositorySlug, branch: &str, path: &str) -> String {
    format!(
        "https://github.com/{}/{}/blob/{branch}/{path}?raw=true",
        repo.owner, repo.name
    )
}

/// Commits the screenshot under `images/<uuid>.<ext>` and links to its raw content.
pub async fn upload_image<A: GithubApi + ?Sized>(
    api: &A,
    repo: &RepositorySlug,
    branch: &str,
    screenshot: Option<&Screenshot>,
) -> ImageAttachment {
    let Some(screenshot) = screenshot else {
        return ImageAttachment::Skipped(SkipReason::NoScreenshot);
    };

    let file_name = format!("{}.{}", Uuid::new_v4(), extension(&screenshot.filename));
    let path = format!("images/{file_name}");
    let file = CreateFile {
        message: COMMIT_MESSAGE.to_string(),
        content: STANDARD.encode(&screenshot.bytes),
        path: path.clone(),
        branch: branch.to_string(),
    };

    debug!("upload: storing {} bytes at {repo}:{path}", screenshot.bytes.len());

    match api.create_file(repo, &file).await {
        Ok(()) => ImageAttachment::Uploaded(UploadedImage {
            url: raw_url(repo, branch, &path),
            file_name,
            path,
        }),
        Err(e) => {
            warn!("upload: skipped, storing screenshot in {repo} failed: {e:?}");
            ImageAttachment::Skipped(SkipReason::UploadFailed(e.to_string()))
        }
    }
}
