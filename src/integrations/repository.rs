use std::{fmt, str::FromStr};

use crate::error::FeedbackError;

/// Owner/name pair addressing a single GitHub repository.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepositorySlug {
    pub owner: String,
    pub name: String,
}

impl RepositorySlug {
    /// Parses `.../<owner>/<repo>` or `.../<owner>/<repo>.git`.
    pub fn parse(url: &str) -> Result<Self, FeedbackError> {
        let invalid = || FeedbackError::InvalidRepositoryUrl(url.to_string());

        let mut segments = url.rsplit('/');
        let name = segments.next().ok_or_else(invalid)?;
        let owner = segments.next().ok_or_else(invalid)?;
        let name = name.strip_suffix(".git").unwrap_or(name);

        if owner.is_empty() || name.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl FromStr for RepositorySlug {
    type Err = FeedbackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RepositorySlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
