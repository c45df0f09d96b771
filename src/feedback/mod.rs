//! The feedback workflow: upload the screenshot, compose the body, create the issue.

use tracing::{debug, info};

use crate::{
    error::FeedbackError,
    integrations::{
        github::{GithubApi, GithubClient, GithubTarget, Issue},
        repository::RepositorySlug,
    },
};

pub mod issue;
pub mod metadata;
pub mod upload;

use self::{
    issue::IssueDraft,
    metadata::{DeviceInfo, MetadataFields, PackageInfo},
};
pub use self::upload::{ImageAttachment, Screenshot};

/// A single user submission, consumed once.
#[derive(Clone, Debug, Default)]
pub struct Feedback {
    pub text: String,
    pub screenshot: Option<Screenshot>,
}

#[derive(Clone, Debug)]
pub struct FeedbackOptions {
    pub title: Option<String>,
    pub labels: Vec<String>,
    pub package_info: bool,
    pub device_info: bool,
    pub extra_data: Option<String>,
    pub allow_empty_text: bool,
    pub allow_prod_emulator_feedback: bool,
    pub image_width: u32,
}

impl Default for FeedbackOptions {
    fn default() -> Self {
        Self {
            title: None,
            labels: vec![],
            package_info: true,
            device_info: true,
            extra_data: None,
            allow_empty_text: false,
            allow_prod_emulator_feedback: false,
            image_width: 300,
        }
    }
}

/// What the submitting side looks like.
#[derive(Clone, Debug, Default)]
pub struct Environment {
    pub production: bool,
    pub device: DeviceInfo,
    pub package: PackageInfo,
}

impl Environment {
    pub fn detect() -> Self {
        Self {
            production: !cfg!(debug_assertions),
            device: DeviceInfo::detect(),
            package: PackageInfo::current(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    Created(Issue),
    /// Empty feedback was refused before anything was sent.
    Cancelled,
}

/// Files `feedback` in the configured repository with a fresh GitHub client.
pub async fn upload_to_github(
    target: &GithubTarget,
    feedback: &Feedback,
    options: &FeedbackOptions,
) -> Result<Submission, FeedbackError> {
    let repo = RepositorySlug::parse(&target.repository)?;
    let api = GithubClient::new(target)?;

    submit(&api, &repo, &target.branch, feedback, options, &Environment::detect()).await
}

pub async fn submit<A: GithubApi + ?Sized>(
    api: &A,
    repo: &RepositorySlug,
    branch: &str,
    feedback: &Feedback,
    options: &FeedbackOptions,
    env: &Environment,
) -> Result<Submission, FeedbackError> {
    if env.production
        && !options.allow_prod_emulator_feedback
        && env.device.is_mobile()
        && env.device.is_emulator()
    {
        return Err(FeedbackError::EmulatorNotAllowed);
    }

    if !options.allow_empty_text && feedback.text.trim().is_empty() {
        info!("feedback: cancelled, empty text for {repo}");
        return Ok(Submission::Cancelled);
    }

    let image = upload::upload_image(api, repo, branch, feedback.screenshot.as_ref()).await;
    debug!("feedback: image step finished with {image:?}");

    let draft = IssueDraft {
        text: &feedback.text,
        title: options.title.as_deref(),
        labels: &options.labels,
        image: &image,
        image_width: options.image_width,
        package_info: options.package_info.then(|| env.package.render()),
        device_info: options.device_info.then(|| env.device.render()),
        extra_data: options.extra_data.as_deref(),
    };
    let new_issue = issue::compose(&draft);

    let created = api
        .create_issue(repo, &new_issue)
        .await
        .map_err(FeedbackError::Github)?;

    info!("feedback: created issue #{} in {repo}", created.number);
    Ok(Submission::Created(created))
}
