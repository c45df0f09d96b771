use anyhow::Result;
use async_trait::async_trait;
use octocrab::{service::middleware::retry::RetryConfig, Octocrab};
use serde::{Deserialize, Serialize};

use crate::{error::FeedbackError, integrations::repository::RepositorySlug};

/// Where feedback ends up and how to authenticate there.
#[derive(Clone, Debug)]
pub struct GithubTarget {
    pub repository: String, // "https://github.com/owner/repo"
    pub token: String,      // PAT / App token, needs contents + issues write
    pub branch: String,     // branch screenshots are committed to
    pub api_base: Option<String>,
}

/// Body of `PUT /repos/{owner}/{repo}/contents/{path}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateFile {
    pub message: String,
    pub content: String, // base64
    pub path: String,
    pub branch: String,
}

/// Body of `POST /repos/{owner}/{repo}/issues`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewIssue {
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub html_url: String,
}

#[derive(Debug, Deserialize)]
struct FileCreated {
    content: Option<CreatedContent>,
}

#[derive(Debug, Deserialize)]
struct CreatedContent {
    path: String,
}

/// The two GitHub calls a feedback submission needs.
#[async_trait]
pub trait GithubApi: Send + Sync {
    async fn create_file(&self, repo: &RepositorySlug, file: &CreateFile) -> Result<()>;
    async fn create_issue(&self, repo: &RepositorySlug, issue: &NewIssue) -> Result<Issue>;
}

pub struct GithubClient {
    octo: Octocrab,
}

impl GithubClient {
    pub fn new(target: &GithubTarget) -> Result<Self, FeedbackError> {
        // Issue creation is not idempotent, a retried POST can file the same issue twice.
        let mut builder = octocrab::OctocrabBuilder::default()
            .personal_token(target.token.clone())
            .add_retry_config(RetryConfig::None);
        if let Some(base) = &target.api_base {
            builder = builder.base_uri(base.as_str())?;
        }

        Ok(Self {
            octo: builder.build()?,
        })
    }
}

#[async_trait]
impl GithubApi for GithubClient {
    async fn create_file(&self, repo: &RepositorySlug, file: &CreateFile) -> Result<()> {
        let route = format!(
            "/repos/{}/{}/contents/{}",
            repo.owner, repo.name, file.path
        );
        let created: FileCreated = self.octo.put(route, Some(file)).await?;

        match created.content {
            Some(content) if content.path == file.path => Ok(()),
            Some(content) => Err(anyhow::anyhow!(
                "GitHub stored '{}' instead of '{}'",
                content.path,
                file.path
            )),
            None => Err(anyhow::anyhow!("GitHub did not confirm '{}'", file.path)),
        }
    }

    async fn create_issue(&self, repo: &RepositorySlug, issue: &NewIssue) -> Result<Issue> {
        let route = format!("/repos/{}/{}/issues", repo.owner, repo.name);
        let created: Issue = self.octo.post(route, Some(issue)).await?;
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use mockito::{Matcher, Server};
    use serde_json::json;

    use super::*;

    fn client(server: &Server) -> GithubClient {
        GithubClient::new(&GithubTarget {
            repository: "https://github.com/acme/app".into(),
            token: "test-token".into(),
            branch: "main".into(),
            api_base: Some(server.url()),
        })
        .unwrap()
    }

    fn acme() -> RepositorySlug {
        RepositorySlug::parse("acme/app").unwrap()
    }

    #[tokio::test]
    async fn create_file_puts_base64_content() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("PUT", "/repos/acme/app/contents/images/shot.png")
            .match_body(Matcher::PartialJson(json!({
                "message": "Upload feedback screenshot",
                "content": "aGVsbG8=",
                "path": "images/shot.png",
                "branch": "main",
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(json!({"content": {"path": "images/shot.png", "sha": "abc"}}).to_string())
            .expect(1)
            .create_async()
            .await;

        let file = CreateFile {
            message: "Upload feedback screenshot".into(),
            content: "aGVsbG8=".into(),
            path: "images/shot.png".into(),
            branch: "main".into(),
        };
        client(&server).create_file(&acme(), &file).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn create_file_surfaces_api_errors() {
        let mut server = Server::new_async().await;
        server
            .mock("PUT", "/repos/acme/app/contents/images/shot.png")
            .with_status(422)
            .with_header("content-type", "application/json")
            .with_body(json!({"message": "Invalid request"}).to_string())
            .create_async()
            .await;

        let file = CreateFile {
            message: "Upload feedback screenshot".into(),
            content: "aGVsbG8=".into(),
            path: "images/shot.png".into(),
            branch: "main".into(),
        };

        assert!(client(&server).create_file(&acme(), &file).await.is_err());
    }

    #[tokio::test]
    async fn create_file_is_sent_once_on_server_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("PUT", "/repos/acme/app/contents/images/shot.png")
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body(json!({"message": "Server Error"}).to_string())
            .expect(1)
            .create_async()
            .await;

        let file = CreateFile {
            message: "Upload feedback screenshot".into(),
            content: "aGVsbG8=".into(),
            path: "images/shot.png".into(),
            branch: "main".into(),
        };

        assert!(client(&server).create_file(&acme(), &file).await.is_err());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn create_issue_is_sent_once_on_bad_gateway() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/repos/acme/app/issues")
            .with_status(502)
            .with_header("content-type", "application/json")
            .with_body(json!({"message": "Bad Gateway"}).to_string())
            .expect(1)
            .create_async()
            .await;

        let issue = NewIssue {
            title: "[FEEDBACK] button broken".into(),
            body: "button broken".into(),
            labels: vec![],
        };

        assert!(client(&server).create_issue(&acme(), &issue).await.is_err());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn create_issue_posts_title_body_and_labels() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/repos/acme/app/issues")
            .match_body(Matcher::Json(json!({
                "title": "[FEEDBACK] button broken",
                "body": "button broken",
                "labels": ["feedback"],
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "number": 7,
                    "title": "[FEEDBACK] button broken",
                    "html_url": "https://github.com/acme/app/issues/7",
                })
                .to_string(),
            )
            .expect(1)
            .create_async()
            .await;

        let issue = NewIssue {
            title: "[FEEDBACK] button broken".into(),
            body: "button broken".into(),
            labels: vec!["feedback".into()],
        };
        let created = client(&server).create_issue(&acme(), &issue).await.unwrap();

        mock.assert_async().await;
        assert_eq!(created.number, 7);
        assert_eq!(created.html_url, "https://github.com/acme/app/issues/7");
    }

    #[tokio::test]
    async fn create_issue_propagates_auth_failure() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/repos/acme/app/issues")
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(json!({"message": "Bad credentials"}).to_string())
            .create_async()
            .await;

        let issue = NewIssue {
            title: "t".into(),
            body: "b".into(),
            labels: vec![],
        };

        assert!(client(&server).create_issue(&acme(), &issue).await.is_err());
    }
}
