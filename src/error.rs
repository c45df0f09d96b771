use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("invalid repository url '{0}', expected .../<owner>/<repo>[.git]")]
    InvalidRepositoryUrl(String),

    #[error("feedback from emulators and simulators is disabled in production builds")]
    EmulatorNotAllowed,

    #[error("could not build GitHub client: {0}")]
    Client(#[from] octocrab::Error),

    #[error("GitHub request failed: {0:#}")]
    Github(anyhow::Error),
}
