use std::sync::Arc;

use feedbot::{upload_to_github, Feedback, FeedbackError, Screenshot, Submission};
use poise::serenity_prelude as serenity;
use tracing::{debug, info, warn};

use crate::{ctx_data::CtxData, Context, Error, Result};

#[derive(Debug, poise::Modal)]
#[name = "Send feedback"]
struct FeedbackModal {
    #[name = "What happened?"]
    #[placeholder = "Describe the problem or idea"]
    #[paragraph]
    #[max_length = 4000]
    text: Option<String>,
    #[name = "Title"]
    #[placeholder = "Leave empty to use the start of your feedback"]
    #[max_length = 100]
    title: Option<String>,
}

fn is_image(attachment: &serenity::Attachment) -> bool {
    attachment
        .content_type
        .as_deref()
        .is_some_and(|ct| ct.starts_with("image/"))
}

async fn fetch_screenshot(attachment: Option<serenity::Attachment>) -> Result<Option<Screenshot>> {
    let Some(attachment) = attachment else {
        return Ok(None);
    };

    if !is_image(&attachment) {
        info!(
            "feedback: ignoring attachment {} ({:?})",
            attachment.filename, attachment.content_type
        );
        return Ok(None);
    }

    debug!("feedback: downloading {} ({} bytes)", attachment.filename, attachment.size);
    let bytes = attachment.download().await?;

    Ok(Some(Screenshot {
        bytes,
        filename: attachment.filename,
    }))
}

fn failure_reply(error: &FeedbackError) -> String {
    format!("⚠️ Could not file feedback: {error}")
}

/// Send feedback to the maintainers as a GitHub issue
#[poise::command(slash_command)]
pub async fn feedback(
    ctx: poise::ApplicationContext<'_, Arc<CtxData>, Error>,
    #[description = "Screenshot to attach"] screenshot: Option<serenity::Attachment>,
    #[description = "Anything else worth knowing (optional)"] extra: Option<String>,
) -> Result<()> {
    use poise::Modal as _;

    let reply_ctx: Context<'_> = poise::Context::Application(ctx);
    let data = reply_ctx.data();

    let Some(modal) = FeedbackModal::execute(ctx).await? else {
        debug!("feedback: modal dismissed by {}", reply_ctx.author().name);
        return Ok(());
    };

    let feedback = Feedback {
        text: modal.text.unwrap_or_default(),
        screenshot: fetch_screenshot(screenshot).await?,
    };
    let options = data.settings.feedback_options(modal.title, extra);

    match upload_to_github(&data.github, &feedback, &options).await {
        Ok(Submission::Created(issue)) => {
            info!("feedback: {} filed issue #{}", reply_ctx.author().name, issue.number);
            reply_ctx
                .say(format!("📬 Thanks! Created: {}", issue.html_url))
                .await?;
        }
        Ok(Submission::Cancelled) => {
            reply_ctx
                .say("ℹ️ Feedback was empty, nothing was sent.")
                .await?;
        }
        Err(e) => {
            warn!("feedback: submission failed: {e:?}");
            reply_ctx.say(failure_reply(&e)).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attachment(content_type: Option<&str>) -> serenity::Attachment {
        serde_json::from_value(serde_json::json!({
            "id": "1",
            "filename": "screen.png",
            "height": null,
            "width": null,
            "proxy_url": "https://media.discordapp.net/screen.png",
            "size": 3,
            "url": "https://cdn.discordapp.com/screen.png",
            "content_type": content_type,
        }))
        .unwrap()
    }

    #[test]
    fn only_images_are_screenshots() {
        assert!(is_image(&attachment(Some("image/png"))));
        assert!(!is_image(&attachment(Some("application/pdf"))));
        assert!(!is_image(&attachment(None)));
    }

    #[test]
    fn failures_are_reported_by_cause() {
        assert_eq!(
            failure_reply(&FeedbackError::EmulatorNotAllowed),
            "⚠️ Could not file feedback: feedback from emulators and simulators is disabled in production builds"
        );
        assert!(failure_reply(&FeedbackError::InvalidRepositoryUrl("acme".into()))
            .contains("invalid repository url 'acme'"));
    }

    #[tokio::test]
    async fn no_attachment_means_no_screenshot() {
        assert_eq!(fetch_screenshot(None).await.unwrap(), None);
    }

    #[tokio::test]
    async fn non_image_is_not_downloaded() {
        let pdf = attachment(Some("application/pdf"));
        assert_eq!(fetch_screenshot(Some(pdf)).await.unwrap(), None);
    }
}
