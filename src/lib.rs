//! Files user feedback as GitHub issues, optionally with an uploaded screenshot.
//!
//! [`feedback::upload_to_github`] is the entry point; it needs no UI and is what
//! the `/feedback` command of the bot calls once the capture modal is submitted.

pub mod error;
pub mod feedback;
pub mod integrations;

pub use error::FeedbackError;
pub use feedback::{upload_to_github, Feedback, FeedbackOptions, Screenshot, Submission};
pub use integrations::{github::GithubTarget, repository::RepositorySlug};
